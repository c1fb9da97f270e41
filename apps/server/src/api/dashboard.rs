use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::Utc;
use goalpost_core::dashboard::DashboardSummary;

use crate::{auth::ActingUser, error::ApiResult, main_lib::AppState};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state.dashboard_service.get_summary(&user_id, Utc::now())?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
