use crate::config::Config;
use crate::rfp::composer::PromptComposer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; nothing here is shared mutably between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Wraps the text generator (Gemini in production, a recorder in tests).
    pub composer: PromptComposer,
}
