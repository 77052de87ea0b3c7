// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persisted session document
//!
//! On disk the document looks like
//!
//! ```json
//! {"session": {"session-id": "abc", "updated-at": "2026-01-02T03:04:05.678+08:00", "expired-at": 1767294245678}}
//! ```
//!
//! Keys this crate does not know about are carried along untouched.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::cookie::cookie_header;
use crate::error::Result;

/// Server-issued session identity and its freshness bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// PHPSESSID value; empty when there is no session
    #[serde(rename = "session-id", default)]
    pub session_id: String,
    /// When the session was last refreshed
    #[serde(rename = "updated-at", default, with = "zoned_timestamp")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    /// Expiry in epoch milliseconds, 0 when unknown
    #[serde(rename = "expired-at", default)]
    pub expires_at: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Whether a session id is held
    pub fn is_active(&self) -> bool {
        !self.session_id.is_empty()
    }

    /// Whether the recorded expiry has passed; an unset expiry never expires
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expires_at != 0 && self.expires_at <= now_millis
    }

    /// Expiry as a timestamp, if set
    pub fn expires_at_time(&self) -> Option<DateTime<Utc>> {
        if self.expires_at == 0 {
            return None;
        }
        Utc.timestamp_millis_opt(self.expires_at).single()
    }

    /// `Cookie` header value, or `None` without a session
    pub fn cookie_header(&self) -> Option<String> {
        self.is_active().then(|| cookie_header(&self.session_id))
    }
}

/// The whole persisted file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub session: Session,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigDocument {
    /// Parse a document from file content
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the document for writing
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Copy of this document with a different session
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            session,
            extra: self.extra.clone(),
        }
    }
}

/// `updated-at` as a zoned ISO-8601 string, `""` when unset
mod zoned_timestamp {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, false)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        // drop a trailing region id such as "[Asia/Taipei]"
        let raw = match raw.find('[') {
            Some(idx) if raw.ends_with(']') => &raw[..idx],
            _ => raw,
        };
        DateTime::parse_from_rfc3339(raw)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_shape() {
        let json = ConfigDocument::default().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"session": {"session-id": "", "updated-at": "", "expired-at": 0}})
        );
    }

    #[test]
    fn test_parse_legacy_zoned_timestamp() {
        let doc = ConfigDocument::from_json(
            r#"{"session":{"session-id":"abc","updated-at":"2021-11-20T10:00:00.123+08:00[Asia/Taipei]","expired-at":1637377200123}}"#,
        )
        .unwrap();

        assert_eq!(doc.session.session_id, "abc");
        let ts = doc.session.updated_at.unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(doc.session.expires_at, 1637377200123);
    }

    #[test]
    fn test_empty_object_loads_as_empty_session() {
        let doc = ConfigDocument::from_json("{}").unwrap();
        assert_eq!(doc.session, Session::default());
        assert!(!doc.session.is_active());
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let input = r#"{"session":{"session-id":"abc","updated-at":"","expired-at":0,"note":"kept"},"hosts":["clh25.dev.tw"]}"#;
        let doc = ConfigDocument::from_json(input).unwrap();
        let again = ConfigDocument::from_json(&doc.to_json().unwrap()).unwrap();

        assert_eq!(again, doc);
        assert_eq!(again.extra["hosts"][0], "clh25.dev.tw");
        assert_eq!(again.session.extra["note"], "kept");
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        let err = ConfigDocument::from_json(
            r#"{"session":{"session-id":"abc","updated-at":"yesterday","expired-at":0}}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_expiry_helpers() {
        let mut session = Session::default();
        assert!(!session.is_expired(i64::MAX));
        assert!(session.expires_at_time().is_none());
        assert!(session.cookie_header().is_none());

        session.session_id = "abc".to_string();
        session.expires_at = 10_000;
        assert!(session.is_expired(10_000));
        assert!(!session.is_expired(9_999));
        assert_eq!(session.cookie_header().as_deref(), Some("PHPSESSID=abc"));
    }
}
