use std::sync::Arc;

use axum::{routing::get, Json, Router};
use goalpost_core::goals::{GoalCategory, GoalCategoryInfo, GoalType, GoalTypeInfo};

use crate::main_lib::AppState;

/// Goal types offered when creating or editing a goal.
async fn list_goal_types() -> Json<Vec<GoalTypeInfo>> {
    Json(GoalType::SELECTABLE.into_iter().map(GoalTypeInfo::from).collect())
}

async fn list_goal_categories() -> Json<Vec<GoalCategoryInfo>> {
    Json(GoalCategory::ALL.into_iter().map(GoalCategoryInfo::from).collect())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goal-types", get(list_goal_types))
        .route("/goal-categories", get(list_goal_categories))
}
