//! Integration tests for UserService fetch coordination.

mod common;

use std::time::Duration;

use common::{epoch, test_service, test_service_with_latency, user, user_with_prefs};
use usercache::adapters::http::MockReply;
use usercache::domain::models::{PreferencesUpdate, Theme, User};
use usercache::services::{storage_key, IN_FLIGHT_POLL_INTERVAL};
use usercache::ServiceError;

#[tokio::test]
async fn test_cache_miss_issues_exactly_one_request() {
    common::setup_test_logging();
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));

    let fetched = t.service.fetch_by_id("7").await.unwrap();

    assert_eq!(fetched, user("7"));
    assert_eq!(t.http.total_calls(), 1);
    assert!(t.logger.contains("user fetched"));
}

#[tokio::test]
async fn test_fresh_cache_hit_issues_no_request() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.service.fetch_by_id("7").await.unwrap();

    for _ in 0..5 {
        t.service.fetch_by_id("7").await.unwrap();
    }

    assert_eq!(t.http.total_calls(), 1);
}

#[tokio::test]
async fn test_expired_cache_refetches_and_sees_new_data() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.service.fetch_by_id("7").await.unwrap();

    let renamed = User::new("7", "Renamed", "user7@example.org");
    t.http.reply_get("/users/7", MockReply::json(&renamed));
    t.clock.advance(Duration::from_millis(60_001));

    let fetched = t.service.fetch_by_id("7").await.unwrap();

    assert_eq!(fetched.name, "Renamed");
    assert_eq!(t.http.get_count("/users/7"), 2);
}

#[tokio::test]
async fn test_custom_cache_duration_is_honored() {
    let t = test_service();
    let service = usercache::UserService::new(t.http.clone(), t.logger.clone(), t.storage.clone())
        .with_clock(t.clock.clone())
        .with_cache_duration(Duration::from_secs(5));
    t.http.reply_get("/users/7", MockReply::json(&user("7")));

    service.fetch_by_id("7").await.unwrap();
    t.clock.advance(Duration::from_secs(4));
    service.fetch_by_id("7").await.unwrap();
    assert_eq!(t.http.total_calls(), 1);

    t.clock.advance(Duration::from_secs(1));
    service.fetch_by_id("7").await.unwrap();
    assert_eq!(t.http.total_calls(), 2);
}

#[tokio::test]
async fn test_fallback_returns_stored_copy_without_caching_it() {
    let t = test_service();
    let stored = user("7");
    t.storage
        .insert(&storage_key("7"), &serde_json::to_string(&stored).unwrap());
    t.http.reply_get("/users/7", MockReply::status(503));

    let fetched = t.service.fetch_by_id("7").await.unwrap();

    assert_eq!(fetched, stored);
    assert_eq!(t.service.cached("7").await, None);
    assert!(t.logger.contains_error("remote fetch failed"));
    assert!(t.logger.contains("serving persisted user"));

    // The stored copy does not count as fresh: the next call goes remote again.
    t.service.fetch_by_id("7").await.unwrap();
    assert_eq!(t.http.get_count("/users/7"), 2);
}

#[tokio::test]
async fn test_total_failure_surfaces_derived_error() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::transport("connection refused"));

    let err = t.service.fetch_by_id("7").await.unwrap_err();

    assert!(matches!(err, ServiceError::FetchFailed { ref id, .. } if id == "7"));
    assert_eq!(err.to_string(), "fetch failed for id=7");
    assert!(!t.service.is_fetch_in_flight());
}

#[tokio::test]
async fn test_failed_fetch_leaves_previous_copy_intact() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.service.fetch_by_id("7").await.unwrap();

    t.http.reply_get("/users/7", MockReply::status(500));
    t.clock.advance(Duration::from_secs(120));

    // Remote fails, persisted copy from the first fetch is served.
    let fetched = t.service.fetch_by_id("7").await.unwrap();
    assert_eq!(fetched, user("7"));
}

#[tokio::test]
async fn test_clear_cache_forces_remote_fetch() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.service.fetch_by_id("7").await.unwrap();

    t.service.clear_cache();
    t.service.clear_cache();

    assert_eq!(t.service.cached("7").await, None);
    t.service.fetch_by_id("7").await.unwrap();
    assert_eq!(t.http.total_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_fetches_for_different_ids_never_overlap() {
    let t = test_service_with_latency(Duration::from_millis(250));
    t.http.reply_get("/users/1", MockReply::json(&user("1")));
    t.http.reply_get("/users/2", MockReply::json(&user("2")));

    let first = {
        let service = t.service.clone();
        tokio::spawn(async move { service.fetch_by_id("1").await })
    };
    let second = {
        let service = t.service.clone();
        tokio::spawn(async move { service.fetch_by_id("2").await })
    };

    let (first, second) = (first.await.unwrap(), second.await.unwrap());

    assert_eq!(first.unwrap(), user("1"));
    assert_eq!(second.unwrap(), user("2"));
    assert_eq!(t.http.peak_concurrency(), 1);
    assert_eq!(t.http.get_count("/users/1"), 1);
    assert_eq!(t.http.get_count("/users/2"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_waiter_for_same_id_is_served_from_cache() {
    let t = test_service_with_latency(Duration::from_millis(250));
    t.http.reply_get("/users/1", MockReply::json(&user("1")));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = t.service.clone();
            tokio::spawn(async move { service.fetch_by_id("1").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), user("1"));
    }

    assert_eq!(t.http.get_count("/users/1"), 1);
    assert!(t.logger.contains("cache hit"));
}

#[tokio::test(start_paused = true)]
async fn test_waiter_polls_on_fixed_interval() {
    let t = test_service_with_latency(Duration::from_millis(250));
    t.http.reply_get("/users/1", MockReply::json(&user("1")));
    t.http.reply_get("/users/2", MockReply::json(&user("2")));

    let start = tokio::time::Instant::now();
    let first = {
        let service = t.service.clone();
        tokio::spawn(async move { service.fetch_by_id("1").await })
    };
    tokio::task::yield_now().await;
    assert!(t.service.is_fetch_in_flight());

    t.service.fetch_by_id("2").await.unwrap();
    first.await.unwrap().unwrap();

    // First fetch holds the flag for 250ms; the waiter notices at the next
    // 100ms tick (300ms) and then spends 250ms on its own request.
    let elapsed = start.elapsed();
    assert_eq!(IN_FLIGHT_POLL_INTERVAL, Duration::from_millis(100));
    assert!(elapsed >= Duration::from_millis(550), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(650), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_update_preferences_merges_and_persists() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user_with_prefs("7")));
    // Server echoes a stale preference set; the merged one must win.
    t.http
        .reply_post("/users/7/preferences", MockReply::json(&user("7")));

    let updated = t
        .service
        .update_preferences("7", PreferencesUpdate::default().theme(Theme::Dark))
        .await
        .unwrap();

    let prefs = updated.preferences.clone().unwrap();
    assert_eq!(prefs.theme, Theme::Dark);
    assert!(prefs.notifications);
    assert_eq!(prefs.language, "de");

    let body = t.http.last_post_body("/users/7/preferences").unwrap();
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["notifications"], true);
    assert_eq!(body["language"], "de");

    assert_eq!(t.service.cached("7").await, Some(updated.clone()));
    let raw = t.storage.snapshot().remove(&storage_key("7")).unwrap();
    assert_eq!(serde_json::from_str::<User>(&raw).unwrap(), updated);
}

#[tokio::test]
async fn test_update_preferences_defaults_for_user_without_prefs() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.http
        .reply_post("/users/7/preferences", MockReply::json(&user("7")));

    let updated = t
        .service
        .update_preferences("7", PreferencesUpdate::default().language("ja"))
        .await
        .unwrap();

    let prefs = updated.preferences.unwrap();
    assert_eq!(prefs.theme, Theme::System);
    assert!(!prefs.notifications);
    assert_eq!(prefs.language, "ja");
}

#[tokio::test]
async fn test_update_preferences_failure_is_wrapped() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.http
        .reply_post("/users/7/preferences", MockReply::status(500));

    let err = t
        .service
        .update_preferences("7", PreferencesUpdate::default().notifications(true))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::PreferencesUpdateFailed { .. }));
    assert_eq!(err.to_string(), "preferences update failed for id=7");
    assert!(t.logger.contains_error("preferences update failed"));
    // Cache still holds the copy from the read stage, untouched by the failed write.
    assert_eq!(t.service.cached("7").await, Some(user("7")));
}

#[tokio::test]
async fn test_score_example_user() {
    let t = test_service();
    let reference = User::new("1", "Jo Lee", "a@gmail.com").with_last_login(epoch());
    t.http.reply_get("/users/1", MockReply::json(&reference));

    assert_eq!(t.service.score_user("1").await.unwrap(), 40);
    assert_eq!(t.service.score_of(None), 0);
}

#[tokio::test]
async fn test_remote_user_with_partial_preferences_is_fetchable() {
    let t = test_service();
    t.http.reply_get(
        "/users/9",
        MockReply::Json(serde_json::json!({
            "id": "9",
            "name": "Ann",
            "email": "a@x.org",
            "preferences": { "theme": "dark", "notifications": true }
        })),
    );

    let fetched = t.service.fetch_by_id("9").await.unwrap();

    let prefs = fetched.preferences.unwrap();
    assert_eq!(prefs.theme, Theme::Dark);
    assert!(prefs.notifications);
    assert_eq!(prefs.language, "en");
    assert!(!t.logger.contains_error("remote fetch failed"));
}

#[tokio::test]
async fn test_update_preferences_succeeds_when_persist_fails() {
    let t = test_service();
    t.http.reply_get("/users/7", MockReply::json(&user("7")));
    t.http
        .reply_post("/users/7/preferences", MockReply::json(&user("7")));
    t.storage.fail_writes(true);

    let updated = t
        .service
        .update_preferences("7", PreferencesUpdate::default().language("fr"))
        .await
        .unwrap();

    assert_eq!(updated.preferences.as_ref().unwrap().language, "fr");
    let cached = t.service.cached("7").await.unwrap();
    assert_eq!(cached.preferences.unwrap().language, "fr");
    assert!(t.logger.contains_error("failed to persist user"));
    assert!(t.storage.snapshot().is_empty());
}
