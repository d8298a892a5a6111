//! Payment-capture webhook.
//!
//! Verifies an HMAC-SHA256 signature over the raw request body before
//! anything is parsed. Only `payment.captured` events act; the order is
//! looked up by the provider's order id across all owners and completed
//! exactly once.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::storage::CompletionOutcome;

pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    payload: WebhookPayload,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookPayload {
    payment: Option<PaymentWrapper>,
}

#[derive(Debug, Deserialize)]
struct PaymentWrapper {
    entity: PaymentEntity,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: String,
    order_id: String,
}

/// Constant-time verification of the hex-encoded HMAC-SHA256 signature
/// over the raw body.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// POST /api/v1/payments/webhook
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Signature not found"})),
        );
    };

    if !verify_signature(&state.config.razorpay_webhook_secret, &body, signature) {
        warn!("Payment webhook rejected: signature mismatch");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid signature"})),
        );
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!("Payment webhook rejected: malformed event payload: {err}");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Malformed event payload"})),
            );
        }
    };

    if event.event != "payment.captured" {
        return (StatusCode::OK, Json(json!({"status": "ok"})));
    }

    let Some(payment) = event.payload.payment else {
        warn!("payment.captured event without a payment entity");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Malformed event payload"})),
        );
    };
    let entity = payment.entity;

    match state.orders.complete(&entity.order_id, &entity.id).await {
        Ok(CompletionOutcome::Completed(order_id)) => {
            info!("Order {order_id} updated to completed");
            (StatusCode::OK, Json(json!({"status": "ok"})))
        }
        Ok(CompletionOutcome::AlreadyCompleted) => {
            info!(
                "Ignoring duplicate payment.captured for order {}",
                entity.order_id
            );
            (StatusCode::OK, Json(json!({"status": "ok"})))
        }
        Ok(CompletionOutcome::NotFound) => {
            error!("No order found for external order id {}", entity.order_id);
            (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Order not found"})),
            )
        }
        Err(err) => {
            error!("Failed to update order {}: {err}", entity.order_id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to update order"})),
            )
        }
    }
}
