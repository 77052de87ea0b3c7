// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Set-Cookie parsing for the PHP session cookie

use crate::error::{Error, Result};

/// Name of the session cookie issued by the API
pub const SESSION_COOKIE: &str = "PHPSESSID";

/// Lifetime attribute, in seconds
pub const MAX_AGE: &str = "Max-Age";

/// Split a Set-Cookie value into `key=value` pairs
///
/// Pairs are separated by `;` plus optional whitespace and split on the first
/// `=`. A bare attribute such as `HttpOnly` yields an empty value. Keys are
/// kept verbatim.
pub fn parse_pairs(header: &str) -> Vec<(&str, &str)> {
    header
        .split(';')
        .map(str::trim_start)
        .filter(|part| !part.is_empty())
        .map(|part| part.split_once('=').unwrap_or((part, "")))
        .collect()
}

/// Look up a key; the last occurrence wins
pub fn find_value<'a>(pairs: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// The parts of a Set-Cookie value the session cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Value of `PHPSESSID`
    pub session_id: String,
    /// `Max-Age` in seconds, when present and numeric
    pub max_age: Option<i64>,
}

impl SessionCookie {
    /// Parse a Set-Cookie value
    ///
    /// Fails with [`Error::MalformedCookie`] when there is no non-empty
    /// `PHPSESSID`; most responses legitimately carry other cookies only.
    pub fn parse(header: &str) -> Result<Self> {
        let pairs = parse_pairs(header);

        let session_id = match find_value(&pairs, SESSION_COOKIE) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            Some(_) => {
                return Err(Error::malformed_cookie(format!(
                    "empty {} in '{}'",
                    SESSION_COOKIE, header
                )))
            }
            None => {
                return Err(Error::malformed_cookie(format!(
                    "no {} in '{}'",
                    SESSION_COOKIE, header
                )))
            }
        };

        let max_age = find_value(&pairs, MAX_AGE).and_then(|raw| match raw.trim().parse::<i64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                tracing::warn!(value = raw, "Ignoring non-numeric Max-Age");
                None
            }
        });

        Ok(Self {
            session_id,
            max_age,
        })
    }

    /// Expiry in epoch millis for a cookie received at `now_millis`
    pub fn expires_at(&self, now_millis: i64) -> Option<i64> {
        self.max_age
            .map(|secs| now_millis.saturating_add(secs.saturating_mul(1000)))
    }
}

/// Cookie request header for a session id
pub fn cookie_header(session_id: &str) -> String {
    format!("{}={}", SESSION_COOKIE, session_id)
}
