//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use usercache::adapters::clock::ManualClock;
use usercache::adapters::http::MockHttpClient;
use usercache::adapters::logging::RecordingLogger;
use usercache::adapters::storage::MemoryStore;
use usercache::domain::models::{Preferences, Theme, User};
use usercache::UserService;

/// Fixed starting instant for manual clocks.
#[allow(dead_code)]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

/// A service wired to in-memory collaborators, with handles kept for assertions.
#[allow(dead_code)]
pub struct TestService {
    pub http: Arc<MockHttpClient>,
    pub logger: Arc<RecordingLogger>,
    pub storage: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub service: Arc<UserService>,
}

/// Build a service around a mock HTTP client with the given latency.
#[allow(dead_code)]
pub fn test_service_with_latency(latency: Duration) -> TestService {
    let http = Arc::new(MockHttpClient::with_latency(latency));
    let logger = Arc::new(RecordingLogger::new());
    let storage = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(epoch()));
    let service = Arc::new(
        UserService::new(http.clone(), logger.clone(), storage.clone()).with_clock(clock.clone()),
    );

    TestService {
        http,
        logger,
        storage,
        clock,
        service,
    }
}

#[allow(dead_code)]
pub fn test_service() -> TestService {
    test_service_with_latency(Duration::ZERO)
}

#[allow(dead_code)]
pub fn user(id: &str) -> User {
    User::new(id, format!("User {id}"), format!("user{id}@example.org"))
}

#[allow(dead_code)]
pub fn user_with_prefs(id: &str) -> User {
    user(id).with_preferences(Preferences {
        theme: Theme::Light,
        notifications: true,
        language: "de".to_string(),
    })
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
