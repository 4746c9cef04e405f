use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::schedules::services::ScheduleRunner;

/// Schedules that would fire at the current minute
/// GET /api/schedules/due
pub async fn list_due(runner: web::Data<Arc<ScheduleRunner>>) -> Result<HttpResponse, AppError> {
    let due = runner.due_now().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": due.len(),
        "schedules": due,
    })))
}

/// Configure schedule routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/schedules").route("/due", web::get().to(list_due)));
}
