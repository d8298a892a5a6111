use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::storage::{OrderStore, ReadingStore};

/// Shared application state injected into all route handlers via Axum
/// extractors. Storage is held behind trait objects so tests can swap in
/// the in-memory fake.
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<dyn ReadingStore>,
    pub orders: Arc<dyn OrderStore>,
    pub llm: LlmClient,
    pub config: Config,
}

/// State over the in-memory fake, plus a handle to it for assertions.
/// The LLM client carries a dummy key; tests must not reach the network.
#[cfg(test)]
pub fn test_state() -> (AppState, Arc<crate::storage::memory::InMemoryStore>) {
    let store = Arc::new(crate::storage::memory::InMemoryStore::new());
    let state = AppState {
        readings: store.clone(),
        orders: store.clone(),
        llm: LlmClient::new("test-key".to_string()),
        config: Config {
            database_url: "postgres://localhost/unused".to_string(),
            anthropic_api_key: "test-key".to_string(),
            razorpay_webhook_secret: "test_webhook_secret".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        },
    };
    (state, store)
}
