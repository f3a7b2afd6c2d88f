use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Reminders
        .route(
            "/reminders",
            post(handlers::create_reminder).get(handlers::list_reminders),
        )
        .route("/reminders/upcoming/:user_id", get(handlers::upcoming_reminders))
        .route(
            "/reminders/:id",
            get(handlers::get_user_reminders)
                .put(handlers::update_reminder)
                .delete(handlers::delete_reminder),
        )
        .route("/reminders/:id/complete", post(handlers::complete_reminder))
        // Products
        .route(
            "/products",
            post(handlers::create_product).get(handlers::list_products),
        )
        .route("/products/:product_id", get(handlers::get_product))
        // Recommendations
        .route("/recommend/:user_id", post(handlers::recommend_products))
        .route("/recommend/:user_id/skincare", post(handlers::recommend_skincare))
        .route("/recommend/:user_id/makeup", post(handlers::recommend_makeup))
        .route(
            "/recommend/:user_id/personalized",
            post(handlers::recommend_personalized),
        )
        .route(
            "/recommend/:user_id/trending",
            get(handlers::trending_recommendations),
        )
        .route(
            "/recommendations/:user_id",
            get(handlers::recommendation_history),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .with_state(state)
}
