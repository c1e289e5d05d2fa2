use std::sync::Arc;

use brainstorm_application::SessionService;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    /// Normalized route prefix (`""` or `/segment...`), used for `Location` headers.
    pub api_prefix: Arc<str>,
}

impl AppState {
    pub fn new(session_service: SessionService, api_prefix: &str) -> Self {
        Self {
            session_service: Arc::new(session_service),
            api_prefix: normalize_prefix(api_prefix).into(),
        }
    }

    /// Absolute path of a resource under the API prefix.
    pub fn location(&self, path: &str) -> String {
        format!("{}{}", self.api_prefix, path)
    }
}

/// Trims slashes and whitespace, then re-adds a single leading slash.
/// An empty or `/` prefix normalizes to `""`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
