use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::analytics::services::AnalyticsService;

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub window_months: Option<u32>,
}

/// Month buckets, client growth and amount distribution
/// GET /api/analytics/monthly?window_months=6
pub async fn monthly(
    service: web::Data<Arc<AnalyticsService>>,
    query: web::Query<MonthlyQuery>,
) -> Result<HttpResponse, AppError> {
    let analytics = service.monthly(query.window_months).await?;
    Ok(HttpResponse::Ok().json(analytics))
}

/// GET /api/analytics/dashboard
pub async fn dashboard(service: web::Data<Arc<AnalyticsService>>) -> Result<HttpResponse, AppError> {
    let summary = service.dashboard().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Configure analytics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/monthly", web::get().to(monthly))
            .route("/dashboard", web::get().to(dashboard)),
    );
}
