use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use goalpost_core::log_entries::{LogProgressInput, ProgressLogged};

use crate::{auth::ActingUser, error::ApiResult, main_lib::AppState};

async fn log_progress(
    Path(goal_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    payload: Result<Json<LogProgressInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProgressLogged>)> {
    let Json(input) = payload?;
    let logged = state
        .goal_service
        .log_progress(&user_id, &goal_id, input)
        .await?;
    if logged.newly_completed {
        tracing::info!(goal_id = %goal_id, "Goal completed");
    }
    Ok((StatusCode::CREATED, Json(logged)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/goals/{id}/log", post(log_progress))
}
