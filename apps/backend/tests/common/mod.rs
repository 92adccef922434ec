//! Common test utilities and fixtures for integration tests.
//!
//! Every context runs fully in memory: the built-in catalog (or a parsed
//! fixture file) backs the verse repository and progress lives in the
//! shared tracker.

pub mod fixtures;

use std::time::Duration;

use axum::Router;
use axum_test::TestServer;

use verse_core::catalog::default_verses;
use verse_core::{GradingSettings, MasteryRecord, VerseRecord};
use verse_recall_backend::{build_router, AppState};

/// Test context holding application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Context over the built-in catalog with default settings.
    ///
    /// Must be created inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_verses(default_verses())
    }

    pub fn with_verses(verses: Vec<VerseRecord>) -> Self {
        let state = AppState::new(verses, GradingSettings::default(), 3)
            .expect("default settings are valid");
        let app = build_router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Wait for the progress worker to catch up with a verse.
    ///
    /// Attempts are recorded in the background, so a response can arrive
    /// before the tracker reflects it.
    pub async fn wait_for_progress<F>(&self, verse_id: &str, done: F) -> MasteryRecord
    where
        F: Fn(&MasteryRecord) -> bool,
    {
        for _ in 0..200 {
            if let Some(record) = self.state.tracker.read().await.get(verse_id) {
                if done(record) {
                    return record.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("progress for {verse_id} was never recorded");
    }
}
