use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Completion backend. `LlmClient` in production; a stub in tests.
    pub completion: Arc<dyn CompletionClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            sessions: SessionStore::new(config.session_ttl),
            completion,
            config,
        }
    }
}
