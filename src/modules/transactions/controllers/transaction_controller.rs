use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::fees::models::ChannelType;
use crate::modules::transactions::services::PayoutCalculator;

#[derive(Debug, Deserialize)]
pub struct PayoutQuoteRequest {
    pub principal_kd: Decimal,
    pub rate_kes_per_kd: Decimal,
    pub channel: Option<String>,
    /// Manually entered fee that replaces the tiered lookup
    pub fee_override: Option<Decimal>,
}

/// Payout figures for a prospective transaction
/// POST /api/payouts/quote
pub async fn quote_payout(
    calculator: web::Data<Arc<PayoutCalculator>>,
    body: web::Json<PayoutQuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let channel = ChannelType::from_optional(request.channel.as_deref())?;

    let breakdown = calculator.compute_payout_with_override(
        request.principal_kd,
        request.rate_kes_per_kd,
        channel,
        request.fee_override,
    )?;

    if let Some(outcome) = breakdown.fee_outcome.filter(|o| o.is_warning()) {
        tracing::warn!(
            amount_kes = %breakdown.amount_kes,
            channel = %channel,
            outcome = ?outcome,
            "Payout fee resolved from incomplete configuration"
        );
    }

    Ok(HttpResponse::Ok().json(breakdown))
}

/// Configure payout routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/payouts").route("/quote", web::post().to(quote_payout)));
}
