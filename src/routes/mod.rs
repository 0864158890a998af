mod common;
mod school;

pub use common::common_routes;
pub use school::school_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full application: operational routes at the root, the school API under `/api`.
pub fn app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", school_routes(state))
        .layer(RequestBodyLimitLayer::new(settings.body_limit))
        .layer(TraceLayer::new_for_http())
}
