//! Application state shared across handlers

use std::sync::Arc;
use std::time::Instant;

use subtle::ConstantTimeEq;

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    api_key: String,
    start_time: Instant,
}

impl AppState {
    pub fn new(db: Database, api_key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db,
                api_key: api_key.into(),
                start_time: Instant::now(),
            }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Compare a presented api-key against the configured secret in
    /// constant time.
    pub fn api_key_matches(&self, presented: &str) -> bool {
        presented
            .as_bytes()
            .ct_eq(self.inner.api_key.as_bytes())
            .into()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_matching() {
        let db = Database::open_in_memory().unwrap();
        let state = AppState::new(db, "hunter2");

        assert!(state.api_key_matches("hunter2"));
        assert!(!state.api_key_matches("hunter3"));
        assert!(!state.api_key_matches(""));
        assert!(!state.api_key_matches("hunter2-and-more"));
    }
}
