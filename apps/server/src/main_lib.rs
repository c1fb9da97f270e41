use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
};
use goalpost_core::{
    dashboard::{DashboardService, DashboardServiceTrait},
    goals::{GoalService, GoalServiceTrait},
};
use goalpost_storage_sqlite::{
    create_pool, goals::GoalRepository, init, log_entries::LogEntryRepository, run_migrations,
    spawn_writer,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("GP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone())?;

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let log_entry_repository = Arc::new(LogEntryRepository::new(pool.clone()));

    let goal_service = Arc::new(GoalService::new(
        goal_repository.clone(),
        log_entry_repository.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        goal_repository,
        log_entry_repository,
    ));

    let auth = match config.jwt_secret.as_deref() {
        Some(raw) => {
            let secret = decode_secret_key(raw)?;
            tracing::info!("Bearer token authentication enabled");
            Some(Arc::new(AuthManager::new(&secret)))
        }
        None => {
            tracing::warn!("GP_JWT_SECRET not set; trusting the X-User-Id header");
            None
        }
    };

    Ok(Arc::new(AppState {
        goal_service,
        dashboard_service,
        auth,
    }))
}
