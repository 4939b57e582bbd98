use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{get_snippet_handler, health_handler, publish_snippet_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/v1/snippets",
                Router::new()
                    .route("/", post(publish_snippet_handler))
                    .route("/{code}", get(get_snippet_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
