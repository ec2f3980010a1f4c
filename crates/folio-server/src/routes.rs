//! Router assembly

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{
    checkout_session, contact_info, create_checkout, get_service, health_check, list_services,
    newsletter_info, not_found, submit_contact, subscribe_newsletter,
};
use crate::state::AppState;

/// JSON API, mounted under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Checkout
        .route("/checkout", post(create_checkout))
        .route("/checkout/session/{id}", get(checkout_session))
        // Companion forms
        .route("/contact", get(contact_info).post(submit_contact))
        .route("/newsletter", get(newsletter_info).post(subscribe_newsletter))
        // Catalog
        .route("/services", get(list_services))
        .route("/services/{slug}", get(get_service))
        .fallback(not_found)
}

/// API plus health check, with CORS and request tracing
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// [`app`] serving the compiled frontend for every other path.
///
/// Unknown paths get `index.html` so client-side routes survive a reload.
pub fn app_with_static(state: AppState, static_dir: &Path) -> Router {
    let index = ServeFile::new(static_dir.join("index.html"));
    app(state).fallback_service(ServeDir::new(static_dir).fallback(index))
}
