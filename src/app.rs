//! Service graph and route table shared by the binary and the HTTP tests

use std::sync::Arc;

use actix_web::web;

use crate::modules::analytics::services::AnalyticsService;
use crate::modules::fees::services::FeeResolver;
use crate::modules::schedules::services::ScheduleRunner;
use crate::modules::transactions::services::PayoutCalculator;
use crate::modules::{analytics, fees, health, schedules, transactions};

/// Services handed to request handlers through `web::Data`
#[derive(Clone)]
pub struct AppServices {
    pub fee_resolver: Arc<FeeResolver>,
    pub payout_calculator: Arc<PayoutCalculator>,
    pub analytics: Arc<AnalyticsService>,
    pub schedule_runner: Arc<ScheduleRunner>,
}

impl AppServices {
    /// Register services and all routes on an app or scope
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.fee_resolver.clone()))
            .app_data(web::Data::new(self.payout_calculator.clone()))
            .app_data(web::Data::new(self.analytics.clone()))
            .app_data(web::Data::new(self.schedule_runner.clone()))
            .configure(health::controllers::configure)
            .service(
                web::scope("/api")
                    .configure(fees::controllers::configure)
                    .configure(transactions::controllers::configure)
                    .configure(analytics::controllers::configure)
                    .configure(schedules::controllers::configure),
            );
    }
}
