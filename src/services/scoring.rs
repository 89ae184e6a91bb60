//! User engagement scoring.
//!
//! Score formula: base + email domain bonus + login recency bonus
//! + name structure bonus + preference bonus.

use chrono::{DateTime, Utc};

use crate::domain::models::{Theme, User};

const BASE_SCORE: f64 = 10.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MAX_NAME_TOKEN_BONUS: f64 = 10.0;

/// Score a user as of `now`.
///
/// Pure and deterministic: no I/O, the only time input is `now`.
/// Returns 0 for an absent user.
pub fn score_of(user: Option<&User>, now: DateTime<Utc>) -> i64 {
    let Some(user) = user else {
        return 0;
    };

    let score = BASE_SCORE
        + email_bonus(user)
        + recency_bonus(user.last_login, now)
        + name_bonus(&user.name)
        + preference_bonus(user);

    #[allow(clippy::cast_possible_truncation)]
    {
        score.round() as i64
    }
}

fn email_bonus(user: &User) -> f64 {
    match user.email_domain() {
        None => 0.0,
        Some("gmail.com") => 5.0,
        Some("hotmail.com") => 3.0,
        Some(domain) if domain.ends_with(".edu") => 10.0,
        Some(domain) if domain.ends_with(".gov") => 15.0,
        Some(_) => 2.0,
    }
}

fn recency_bonus(last_login: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(last_login) = last_login else {
        return 0.0;
    };

    #[allow(clippy::cast_precision_loss)]
    let days = (now - last_login).num_milliseconds() as f64 / MILLIS_PER_DAY;

    if days < 1.0 {
        20.0
    } else if days < 7.0 {
        15.0
    } else if days < 30.0 {
        5.0
    } else {
        0.0
    }
}

fn name_bonus(name: &str) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let tokens = name.split_whitespace().count() as f64;
    let token_bonus = (tokens * 2.0).min(MAX_NAME_TOKEN_BONUS);

    // Length tiers use the raw, untrimmed name.
    let length = name.chars().count();
    let length_bonus = if length > 15 {
        3.0
    } else if length > 10 {
        2.0
    } else if length > 5 {
        1.0
    } else {
        0.0
    };

    token_bonus + length_bonus
}

fn preference_bonus(user: &User) -> f64 {
    let Some(prefs) = &user.preferences else {
        return 0.0;
    };

    let mut bonus = 0.0;
    if prefs.notifications {
        bonus += 5.0;
    }
    if prefs.theme == Theme::Dark {
        bonus += 2.0;
    }
    if !prefs.language.is_empty() && prefs.language != "en" {
        bonus += 3.0;
    }
    bonus
}
