use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::rewriter::generator::ContentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only immutable services; nothing here is cached or mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable generation backend. Default: LlmContentGenerator.
    pub generator: Arc<dyn ContentGenerator>,
    pub config: Config,
}
