//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the data source and a map of live inventory table sessions.
//! Sessions are in-memory only and disappear on restart, on delete, or when
//! the idle sweeper finds them unused for longer than the configured limit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::source::DataSource;
use crate::table::PartsTable;

/// One open parts table and the last time a client touched it.
pub struct TableSession {
    pub table: PartsTable,
    pub last_used: Instant,
}

impl TableSession {
    #[must_use]
    pub fn new(table: PartsTable) -> Self {
        Self { table, last_used: Instant::now() }
    }

    pub fn touch(&mut self) {
        self.last_used = Instant::now();
    }

    #[must_use]
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_used)
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub tables: Arc<RwLock<HashMap<Uuid, TableSession>>>,
    /// Pause before each chat reply.
    pub chat_delay: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, chat_delay: Duration) -> Self {
        Self { source, tables: Arc::new(RwLock::new(HashMap::new())), chat_delay }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use serde_json::Value;

    use super::*;
    use crate::source::types::{DashboardPayload, ModelPayload, PredictPayload};
    use crate::source::{FixtureSource, SourceError};

    /// Source whose every fetch fails with the given upstream status.
    pub struct FailingSource {
        pub status: u16,
    }

    #[async_trait::async_trait]
    impl DataSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn dashboard(&self) -> Result<DashboardPayload, SourceError> {
            Err(SourceError::FetchFailed { status: self.status })
        }

        async fn build_models(&self) -> Result<ModelPayload, SourceError> {
            Err(SourceError::FetchFailed { status: self.status })
        }

        async fn predict(&self) -> Result<PredictPayload, SourceError> {
            Err(SourceError::FetchFailed { status: self.status })
        }

        async fn inventory(&self) -> Result<Vec<Value>, SourceError> {
            Err(SourceError::FetchFailed { status: self.status })
        }
    }

    /// `AppState` over the bundled fixtures with no artificial delays.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Arc::new(FixtureSource::new(Duration::ZERO)), Duration::ZERO)
    }

    /// `AppState` whose source always fails.
    #[must_use]
    pub fn failing_app_state(status: u16) -> AppState {
        AppState::new(Arc::new(FailingSource { status }), Duration::ZERO)
    }

    /// Seed a table session and return its ID.
    pub async fn seed_table(state: &AppState, table: PartsTable) -> Uuid {
        let id = Uuid::new_v4();
        state.tables.write().await.insert(id, TableSession::new(table));
        id
    }
}
