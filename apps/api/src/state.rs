use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::github::GithubApi;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: every lookup is independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Format dispatch for uploads. Default readers: pdf-extract and dotext.
    pub extractor: TextExtractor,
    /// Pluggable GitHub backend. Default: `GithubClient` against the public API.
    pub github: Arc<dyn GithubApi>,
}
