//! Order creation. Orders are created `pending` against an order id
//! already issued by the payment provider; the webhook completes them.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::order::OrderRow;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub owner_id: Uuid,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub external_order_id: String,
}

/// POST /api/v1/orders
pub async fn handle_create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderRow>), AppError> {
    if request.amount <= 0 {
        return Err(AppError::Validation(
            "amount: must be a positive number of minor units".to_string(),
        ));
    }
    let currency = request.currency.trim();
    if currency.is_empty() {
        return Err(AppError::Validation("currency: must not be empty".to_string()));
    }
    let external_order_id = request.external_order_id.trim();
    if external_order_id.is_empty() {
        return Err(AppError::Validation(
            "externalOrderId: must not be empty".to_string(),
        ));
    }

    let order = state
        .orders
        .create(request.owner_id, request.amount, currency, external_order_id)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}
