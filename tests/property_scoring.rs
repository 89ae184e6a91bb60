//! Property-based tests for user scoring.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use usercache::domain::models::{Preferences, Theme, User};
use usercache::score_of;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn theme_strategy() -> impl Strategy<Value = Theme> {
    prop_oneof![Just(Theme::Light), Just(Theme::Dark), Just(Theme::System)]
}

fn preferences_strategy() -> impl Strategy<Value = Preferences> {
    (theme_strategy(), any::<bool>(), "[a-z]{0,3}").prop_map(|(theme, notifications, language)| {
        Preferences {
            theme,
            notifications,
            language,
        }
    })
}

prop_compose! {
    fn user_strategy()(
        name in "[A-Za-z ]{0,40}",
        local in "[a-z]{1,8}",
        domain in prop_oneof![
            Just("gmail.com".to_string()),
            Just("hotmail.com".to_string()),
            Just("uni.edu".to_string()),
            Just("state.gov".to_string()),
            "[a-z]{1,10}\\.(com|org|net)",
        ],
        login_age_hours in proptest::option::of(0i64..2_000),
        preferences in proptest::option::of(preferences_strategy()),
    ) -> User {
        let mut user = User::new("p", name, format!("{local}@{domain}"));
        if let Some(hours) = login_age_hours {
            user = user.with_last_login(now() - Duration::hours(hours));
        }
        if let Some(preferences) = preferences {
            user = user.with_preferences(preferences);
        }
        user
    }
}

proptest! {
    /// Property: Scoring is deterministic for a fixed instant
    #[test]
    fn prop_score_is_deterministic(user in user_strategy()) {
        prop_assert_eq!(score_of(Some(&user), now()), score_of(Some(&user), now()));
    }

    /// Property: Any present user scores at least the base and at most the sum of maxima
    #[test]
    fn prop_score_is_bounded(user in user_strategy()) {
        let score = score_of(Some(&user), now());
        // base 10 + email 15 + recency 20 + name 13 + preferences 10
        prop_assert!(score >= 10, "score {} below base", score);
        prop_assert!(score <= 68, "score {} above maximum", score);
    }

    /// Property: An older login never scores higher than a newer one
    #[test]
    fn prop_recency_is_monotonic(
        user in user_strategy(),
        newer in 0i64..1_000,
        extra in 0i64..1_000,
    ) {
        let recent = user.clone().with_last_login(now() - Duration::hours(newer));
        let older = user.with_last_login(now() - Duration::hours(newer + extra));
        prop_assert!(score_of(Some(&recent), now()) >= score_of(Some(&older), now()));
    }

    /// Property: Enabling notifications adds exactly five points
    #[test]
    fn prop_notifications_add_five(user in user_strategy(), prefs in preferences_strategy()) {
        let off = user.clone().with_preferences(Preferences { notifications: false, ..prefs.clone() });
        let on = user.with_preferences(Preferences { notifications: true, ..prefs });
        prop_assert_eq!(score_of(Some(&on), now()) - score_of(Some(&off), now()), 5);
    }
}

#[test]
fn test_absent_user_scores_zero() {
    assert_eq!(score_of(None, now()), 0);
}
