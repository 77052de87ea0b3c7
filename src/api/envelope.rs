// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Generic JSON envelope of API responses
//!
//! Every endpoint answers with a JSON object whose optional `result` flag
//! reports success; everything else is endpoint specific and kept opaque.

use serde_json::Value;

use crate::error::{Error, Result};

/// Parsed response body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    body: Value,
}

impl ApiEnvelope {
    /// Parse a response body; it must be a JSON object
    pub fn parse(body: &str) -> Result<Self> {
        let body: Value = serde_json::from_str(body)
            .map_err(|e| Error::api(format!("response is not JSON: {}", e)))?;
        if !body.is_object() {
            return Err(Error::api("response is not a JSON object"));
        }
        Ok(Self { body })
    }

    /// The `result` flag; absent counts as success
    pub fn is_ok(&self) -> bool {
        self.body
            .get("result")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// The `data` member, if any
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// MQTT addressing handed out at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSummary {
    /// `data.mqtt.topic`
    pub topic: String,
    /// `mac-address` of the first channel
    pub mac_address: String,
}

impl LoginSummary {
    /// Extract from a successful login envelope
    ///
    /// `None` when the login failed or there are no channels.
    pub fn from_envelope(envelope: &ApiEnvelope) -> Option<Self> {
        if !envelope.is_ok() {
            return None;
        }
        let data = envelope.data()?;
        let topic = data.pointer("/mqtt/topic")?.as_str()?;
        let mac_address = data
            .get("channels")?
            .as_array()?
            .first()?
            .get("mac-address")?
            .as_str()?;

        Some(Self {
            topic: topic.to_string(),
            mac_address: mac_address.to_string(),
        })
    }

    /// Topic prefix for the first channel
    pub fn topic_prefix(&self) -> String {
        format!("{}/{}", self.topic, self.mac_address)
    }

    /// Passphrase for channel payload encryption
    pub fn key_seed(&self) -> String {
        format!("{}+{}", self.topic, self.mac_address)
    }
}
