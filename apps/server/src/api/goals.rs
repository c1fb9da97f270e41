use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use goalpost_core::goals::{GoalDetail, GoalUpdate, GoalWithProgress, NewGoal};
use serde::Serialize;

use crate::{auth::ActingUser, error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
struct ArchivedCount {
    count: i64,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<Vec<GoalWithProgress>>> {
    let goals = state.goal_service.list_goals(&user_id)?;
    Ok(Json(goals))
}

async fn list_archived_goals(
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<Vec<GoalWithProgress>>> {
    let goals = state.goal_service.list_archived_goals(&user_id)?;
    Ok(Json(goals))
}

async fn count_archived_goals(
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<ArchivedCount>> {
    let count = state.goal_service.count_archived_goals(&user_id)?;
    Ok(Json(ArchivedCount { count }))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    payload: Result<Json<NewGoal>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GoalWithProgress>)> {
    let Json(new_goal) = payload?;
    let goal = state.goal_service.create_goal(&user_id, new_goal).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<GoalDetail>> {
    let detail = state.goal_service.get_goal_detail(&user_id, &id)?;
    Ok(Json(detail))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
    payload: Result<Json<GoalUpdate>, JsonRejection>,
) -> ApiResult<Json<GoalWithProgress>> {
    let Json(update) = payload?;
    let goal = state.goal_service.update_goal(&user_id, &id, update).await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn archive_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<GoalWithProgress>> {
    let goal = state.goal_service.archive_goal(&user_id, &id).await?;
    Ok(Json(goal))
}

async fn restore_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ActingUser(user_id)): Extension<ActingUser>,
) -> ApiResult<Json<GoalWithProgress>> {
    let goal = state.goal_service.restore_goal(&user_id, &id).await?;
    Ok(Json(goal))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/archived", get(list_archived_goals))
        .route("/goals/archived/count", get(count_archived_goals))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/archive", post(archive_goal))
        .route("/goals/{id}/restore", post(restore_goal))
}
