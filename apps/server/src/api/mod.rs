use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth::require_user, config::Config, main_lib::AppState};

mod dashboard;
mod goals;
mod health;
mod log_entries;
mod metadata;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{o}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors.allow_methods(Any).allow_headers(Any);

    let protected = Router::new()
        .merge(goals::router())
        .merge(log_entries::router())
        .merge(dashboard::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let api = Router::new()
        .merge(health::router())
        .merge(metadata::router())
        .merge(protected)
        .with_state(state);

    Ok(Router::new()
        .nest("/api/v1", api)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(config.request_timeout)))
}
