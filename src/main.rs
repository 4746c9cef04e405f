use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kdconnect::config::{Config, FeeTableSource, LogFormat};
use kdconnect::core::traits::{Clock, SystemClock};
use kdconnect::modules::analytics::services::{AnalyticsAggregator, AnalyticsService};
use kdconnect::modules::clients::repositories::PgClientRepository;
use kdconnect::modules::fees::repositories::{load_fee_table, PgFeeRepository};
use kdconnect::modules::fees::services::{FeeResolver, FeeTable};
use kdconnect::modules::float_deposits::repositories::PgFloatDepositRepository;
use kdconnect::modules::schedules::repositories::PgScheduleRepository;
use kdconnect::modules::schedules::services::{
    HttpReportDispatcher, ScheduleMatcher, ScheduleRunner,
};
use kdconnect::modules::transactions::repositories::PgTransactionRepository;
use kdconnect::modules::transactions::services::PayoutCalculator;
use kdconnect::AppServices;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("kdconnect={},actix_web=info", config.app.log_level).into());
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting KD Connect back office");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let timezone = config.business_timezone()?;

    // Create database connection pool
    let db_pool = config.database.create_pool().await?;
    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.max_connections
    );

    let fee_table = match config.app.fee_table_source {
        FeeTableSource::Builtin => FeeTable::standard(),
        FeeTableSource::Database => load_fee_table(&PgFeeRepository::new(db_pool.clone())).await?,
    };
    for issue in fee_table.validate() {
        tracing::warn!(
            channel = %issue.channel,
            kind = ?issue.kind,
            "Fee table issue between brackets {}..{} and {}..{}",
            issue.lower.min_amount,
            issue.lower.max_amount,
            issue.upper.min_amount,
            issue.upper.max_amount
        );
    }
    tracing::info!(brackets = fee_table.len(), "Fee table loaded");

    let fee_resolver = FeeResolver::new(Arc::new(fee_table));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let schedule_repo = Arc::new(PgScheduleRepository::new(db_pool.clone()));

    let dispatcher = HttpReportDispatcher::new(
        config.scheduler.report_function_url.clone().unwrap_or_default(),
        config.scheduler.report_function_key.clone().unwrap_or_default(),
    );
    let schedule_runner = Arc::new(ScheduleRunner::new(
        schedule_repo,
        Arc::new(dispatcher),
        ScheduleMatcher::new(timezone),
        clock.clone(),
        Duration::from_secs(config.scheduler.tick_seconds),
    ));

    let services = AppServices {
        fee_resolver: Arc::new(fee_resolver.clone()),
        payout_calculator: Arc::new(PayoutCalculator::new(fee_resolver)),
        analytics: Arc::new(AnalyticsService::new(
            Arc::new(PgTransactionRepository::new(db_pool.clone())),
            Arc::new(PgClientRepository::new(db_pool.clone())),
            Arc::new(PgFloatDepositRepository::new(db_pool.clone())),
            AnalyticsAggregator::new(timezone),
            clock,
            config.app.analytics_window_months,
        )),
        schedule_runner: schedule_runner.clone(),
    };

    if config.scheduler.enabled {
        tokio::spawn(schedule_runner.start());
    } else {
        tracing::info!("Report scheduler disabled");
    }

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .configure(|cfg| services.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
