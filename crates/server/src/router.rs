use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/guide", get(handlers::guide_handler))
        .route("/auth/login", post(handlers::login_handler))
        .route("/auth/logout", post(handlers::logout_handler))
        .route("/auth/session", get(handlers::session_info_handler))
        .route("/generate", post(handlers::generate_handler))
        .route(
            "/snippet",
            get(handlers::get_snippet_handler).delete(handlers::clear_snippet_handler),
        )
        .route("/snippet/download", get(handlers::download_snippet_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
