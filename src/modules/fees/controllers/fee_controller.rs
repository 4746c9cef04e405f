use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::fees::models::ChannelType;
use crate::modules::fees::services::FeeResolver;

#[derive(Debug, Deserialize)]
pub struct FeeQuoteRequest {
    pub amount_kes: Decimal,
    /// Wire name or UI label; omitted means send money
    pub channel: Option<String>,
}

/// List brackets for one channel, lowest first
/// GET /api/fees/{channel}
pub async fn list_brackets(
    resolver: web::Data<Arc<FeeResolver>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let channel: ChannelType = path.into_inner().parse()?;
    let brackets = resolver.table().brackets_for(channel);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "channel": channel,
        "brackets": brackets,
    })))
}

/// Overlaps and gaps in the loaded fee table
/// GET /api/fees/validation
pub async fn validate_table(resolver: web::Data<Arc<FeeResolver>>) -> HttpResponse {
    let issues = resolver.table().validate();

    HttpResponse::Ok().json(serde_json::json!({
        "valid": issues.is_empty(),
        "issues": issues,
    }))
}

/// Fee for a KES amount
/// POST /api/fees/quote
pub async fn quote_fee(
    resolver: web::Data<Arc<FeeResolver>>,
    body: web::Json<FeeQuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let channel = ChannelType::from_optional(request.channel.as_deref())?;
    let resolution = resolver.resolve(request.amount_kes, channel)?;

    if resolution.outcome.is_warning() {
        tracing::warn!(
            amount_kes = %request.amount_kes,
            channel = %channel,
            outcome = ?resolution.outcome,
            "Fee resolved from incomplete configuration"
        );
    }

    Ok(HttpResponse::Ok().json(resolution))
}

/// Configure fee routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/fees")
            .route("/validation", web::get().to(validate_table))
            .route("/quote", web::post().to(quote_fee))
            .route("/{channel}", web::get().to(list_brackets)),
    );
}
