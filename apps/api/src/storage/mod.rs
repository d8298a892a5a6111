//! Persistence Adapter — injected storage interfaces.
//!
//! Handlers and flows talk to `ReadingStore`/`OrderStore` trait objects
//! carried in `AppState`, never to the database directly. Production wires
//! in the Postgres adapter; tests substitute the in-memory fake.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::order::OrderRow;
use crate::models::reading::ReadingRow;
use crate::readings::assembler::ReadingSections;

pub mod postgres;

#[cfg(test)]
pub mod memory;

/// Store-level error type. Backend-specific failures (sqlx etc.) are
/// flattened into `Unexpected` so callers and fakes share one contract.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Unexpected(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(err.to_string())
    }
}

/// The originating request metadata plus assembled sections for one save.
#[derive(Debug, Clone)]
pub struct NewReading {
    pub birth_date: NaiveDate,
    pub birth_time: String,
    pub birth_place: String,
    pub sections: ReadingSections,
}

/// Per-owner reading records. Every operation takes the owner id
/// explicitly; a record never leaks across owners.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Appends a new record with a server-assigned id and timestamp.
    /// Repeated calls create duplicate records; idempotency is not
    /// guaranteed.
    async fn save(&self, owner_id: Uuid, reading: NewReading) -> Result<ReadingRow, StoreError>;

    /// All of the owner's readings, newest first. An owner with no
    /// readings yields an empty vec, not an error.
    async fn list(&self, owner_id: Uuid) -> Result<Vec<ReadingRow>, StoreError>;

    /// `NotFound` if the id does not exist or belongs to another owner.
    async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<ReadingRow, StoreError>;

    /// Removes one record. `NotFound` if the id does not belong to the
    /// owner; other records are untouched.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<(), StoreError>;

    /// Updates the display-name field only.
    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> Result<(), StoreError>;

    /// Merges one language's translated sections into the record's
    /// translation cache.
    async fn cache_translation(
        &self,
        owner_id: Uuid,
        id: Uuid,
        language: &str,
        sections: &ReadingSections,
    ) -> Result<(), StoreError>;
}

/// Outcome of a webhook-driven completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The order transitioned pending -> completed.
    Completed(Uuid),
    /// A duplicate delivery: the order was already completed and was not
    /// mutated.
    AlreadyCompleted,
    /// No order carries this external id.
    NotFound,
}

/// Per-owner payment orders. Completion looks up across all owners because
/// the webhook only knows the provider's order id.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(
        &self,
        owner_id: Uuid,
        amount: i64,
        currency: &str,
        external_order_id: &str,
    ) -> Result<OrderRow, StoreError>;

    /// Marks the order completed and records the payment id, only if it is
    /// currently pending. The pending -> completed transition happens
    /// exactly once.
    async fn complete(
        &self,
        external_order_id: &str,
        payment_id: &str,
    ) -> Result<CompletionOutcome, StoreError>;
}
