//! User service: cached, de-duplicated user fetches with storage fallback.
//!
//! Reads go cache → remote → persisted copy. Cache validity is governed by a
//! single freshness timestamp shared by every entry (the instant of the last
//! successful remote fetch), not by per-entry ages. Remote fetches are
//! serialized through one in-flight flag per service instance; callers that
//! find it set poll every [`IN_FLIGHT_POLL_INTERVAL`] until it clears.

use moka::future::Cache;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::adapters::clock::SystemClock;
use crate::domain::errors::{HttpError, ServiceError, ServiceResult, StorageError};
use crate::domain::models::{Preferences, PreferencesUpdate, ServiceConfig, User};
use crate::domain::ports::{Clock, HttpClient, KeyValueStore, Logger};
use crate::services::scoring;

/// Default freshness window for cached users.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_millis(60_000);

/// Delay between checks while another fetch is in flight.
pub const IN_FLIGHT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Storage key under which a user's last fetched copy is persisted.
pub fn storage_key(id: &str) -> String {
    format!("user_{id}")
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Holds the in-flight flag for the duration of a remote fetch.
///
/// Releasing happens in `Drop`, so the flag clears on every exit path
/// including early returns and cancelled futures.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Cached, de-duplicated user lookups with a persisted fallback copy.
pub struct UserService {
    http: Arc<dyn HttpClient>,
    logger: Arc<dyn Logger>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    cache_duration: Duration,
    cache: Cache<String, User>,
    /// Milliseconds since the epoch of the last successful remote fetch; 0 when cleared.
    last_fetch_ms: AtomicI64,
    in_flight: AtomicBool,
}

impl UserService {
    /// Create a service on the system clock with the default cache duration.
    pub fn new(
        http: Arc<dyn HttpClient>,
        logger: Arc<dyn Logger>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            http,
            logger,
            storage,
            clock: Arc::new(SystemClock),
            cache_duration: DEFAULT_CACHE_DURATION,
            cache: Cache::builder().build(),
            last_fetch_ms: AtomicI64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Apply the cache duration from configuration.
    pub fn with_config(self, config: &ServiceConfig) -> Self {
        self.with_cache_duration(Duration::from_millis(config.cache_duration_ms))
    }

    /// Override the freshness window.
    pub const fn with_cache_duration(mut self, cache_duration: Duration) -> Self {
        self.cache_duration = cache_duration;
        self
    }

    /// Replace the clock used for freshness and scoring.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current freshness window.
    pub const fn cache_duration(&self) -> Duration {
        self.cache_duration
    }

    /// Fetch a user by id.
    ///
    /// Serves a cached copy while the shared freshness window is open,
    /// otherwise waits for any in-flight fetch to finish and fetches from
    /// the remote API. When the remote call fails, a previously persisted
    /// copy is returned instead (without repopulating the cache).
    pub async fn fetch_by_id(&self, id: &str) -> ServiceResult<User> {
        if id.is_empty() {
            return Err(ServiceError::InvalidId);
        }

        loop {
            if let Some(user) = self.fresh_cached(id).await {
                debug!(id, "user cache hit");
                self.logger.log("cache hit", Some(json!({ "id": id, "source": "cache" })));
                return Ok(user);
            }

            if let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight) {
                return self.fetch_remote(id).await;
            }

            debug!(id, "fetch already in flight, polling");
            tokio::time::sleep(IN_FLIGHT_POLL_INTERVAL).await;
        }
    }

    /// Merge `update` into the user's preferences and submit them.
    ///
    /// The merged set wins over whatever preferences the server echoes back.
    /// Cache and storage are only written once the POST succeeds.
    pub async fn update_preferences(
        &self,
        id: &str,
        update: PreferencesUpdate,
    ) -> ServiceResult<User> {
        if id.is_empty() {
            return Err(ServiceError::InvalidId);
        }

        match self.submit_preferences(id, &update).await {
            Ok(user) => {
                self.cache.insert(id.to_string(), user.clone()).await;
                self.persist(id, &user).await;
                info!(id, "preferences updated");
                self.logger.log("preferences updated", Some(json!({ "id": id })));
                Ok(user)
            }
            Err(source) => {
                self.logger.error(
                    "preferences update failed",
                    Some(json!({ "id": id, "error": source.to_string() })),
                );
                Err(ServiceError::PreferencesUpdateFailed {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }

    /// Score a user as of the service clock's current instant.
    pub fn score_of(&self, user: Option<&User>) -> i64 {
        scoring::score_of(user, self.clock.now())
    }

    /// Fetch a user and score it.
    pub async fn score_user(&self, id: &str) -> ServiceResult<i64> {
        let user = self.fetch_by_id(id).await?;
        Ok(self.score_of(Some(&user)))
    }

    /// Drop every cached user and reset the freshness clock.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
        self.last_fetch_ms.store(0, Ordering::Release);
        debug!("user cache cleared");
    }

    /// Remove a user from the cache and from persistent storage.
    ///
    /// Storage failures are logged and swallowed.
    pub async fn forget(&self, id: &str) {
        self.cache.invalidate(id).await;
        if let Err(err) = self.storage.remove_item(&storage_key(id)).await {
            self.logger.error(
                "failed to remove persisted user",
                Some(json!({ "id": id, "error": err.to_string() })),
            );
        }
    }

    /// Cached entry for `id`, ignoring freshness.
    pub async fn cached(&self, id: &str) -> Option<User> {
        self.cache.get(id).await
    }

    /// True while a remote fetch holds the in-flight flag.
    pub fn is_fetch_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    async fn fresh_cached(&self, id: &str) -> Option<User> {
        let user = self.cache.get(id).await?;
        let age_ms = self.clock.now_millis() - self.last_fetch_ms.load(Ordering::Acquire);
        let window_ms = i64::try_from(self.cache_duration.as_millis()).unwrap_or(i64::MAX);
        (age_ms < window_ms).then_some(user)
    }

    async fn fetch_remote(&self, id: &str) -> ServiceResult<User> {
        match self.get_user(id).await {
            Ok(user) => {
                self.cache.insert(id.to_string(), user.clone()).await;
                self.last_fetch_ms
                    .store(self.clock.now_millis(), Ordering::Release);
                self.persist(id, &user).await;
                self.logger.log("user fetched", Some(json!({ "id": id, "source": "remote" })));
                Ok(user)
            }
            Err(err) => {
                warn!(id, error = %err, "remote fetch failed, trying storage");
                self.logger.error(
                    "remote fetch failed",
                    Some(json!({ "id": id, "error": err.to_string() })),
                );

                match self.load_persisted(id).await {
                    Some(user) => {
                        self.logger.log(
                            "serving persisted user",
                            Some(json!({ "id": id, "source": "storage" })),
                        );
                        Ok(user)
                    }
                    None => Err(ServiceError::FetchFailed {
                        id: id.to_string(),
                        source: err,
                    }),
                }
            }
        }
    }

    async fn get_user(&self, id: &str) -> Result<User, HttpError> {
        let value = self.http.get(&format!("/users/{id}")).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn submit_preferences(
        &self,
        id: &str,
        update: &PreferencesUpdate,
    ) -> Result<User, BoxError> {
        let current = self.fetch_by_id(id).await?;
        let merged = Preferences::merged(current.preferences.as_ref(), update);

        let body = serde_json::to_value(&merged)?;
        let response = self
            .http
            .post(&format!("/users/{id}/preferences"), body)
            .await?;

        let mut updated: User = serde_json::from_value(response)?;
        updated.preferences = Some(merged);
        Ok(updated)
    }

    async fn persist(&self, id: &str, user: &User) {
        let result = match serde_json::to_string(user) {
            Ok(serialized) => self.storage.set_item(&storage_key(id), &serialized).await,
            Err(err) => Err(StorageError::from(err)),
        };

        if let Err(err) = result {
            warn!(id, error = %err, "failed to persist user");
            self.logger.error(
                "failed to persist user",
                Some(json!({ "id": id, "error": err.to_string() })),
            );
        }
    }

    async fn load_persisted(&self, id: &str) -> Option<User> {
        let raw = match self.storage.get_item(&storage_key(id)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                self.logger.error(
                    "storage read failed",
                    Some(json!({ "id": id, "error": err.to_string() })),
                );
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                self.logger.error(
                    "persisted user is unreadable",
                    Some(json!({ "id": id, "error": err.to_string() })),
                );
                None
            }
        }
    }
}
