pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::horoscope;
use crate::payments;
use crate::readings::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Readings
        .route("/api/v1/readings/generate", post(handlers::handle_generate))
        .route("/api/v1/readings", get(handlers::handle_list))
        .route("/api/v1/readings/:id", delete(handlers::handle_delete))
        .route("/api/v1/readings/:id/name", patch(handlers::handle_rename))
        .route(
            "/api/v1/readings/:id/translate",
            post(handlers::handle_translate),
        )
        // Horoscope
        .route(
            "/api/v1/horoscope/daily",
            post(horoscope::handle_daily_horoscope),
        )
        // Payments
        .route("/api/v1/orders", post(payments::orders::handle_create_order))
        .route(
            "/api/v1/payments/webhook",
            post(payments::webhook::handle_payment_webhook),
        )
        .with_state(state)
}
