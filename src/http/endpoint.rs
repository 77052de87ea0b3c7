// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! API endpoint address

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Hosts the API is deployed on
pub const KNOWN_HOSTS: &[&str] = &["clhlabs.dae.tw", "clh25.dev.tw", "clh25.dae.tw"];

/// Default API script path
pub const DEFAULT_PATH: &str = "/ws/app.php";

/// `scheme://host/path` of the API script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: KNOWN_HOSTS[0].to_string(),
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl Endpoint {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    /// Set the scheme
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the host (may include a port)
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Take scheme, host and path from a full URL
    pub fn parse(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| Error::Config(format!("URL has no host: {}", url)))?;
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Ok(Self::new(parsed.scheme(), host, parsed.path()))
    }

    /// Resolve to a URL
    pub fn url(&self) -> Result<Url> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(Error::Config(format!("unsupported scheme '{}'", self.scheme)));
        }
        Ok(Url::parse(&self.to_string())?)
    }

    /// Whether the host is one of the known deployments
    pub fn is_known_host(&self) -> bool {
        KNOWN_HOSTS.contains(&self.host.as_str())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.trim_start_matches('/');
        write!(f, "{}://{}/{}", self.scheme, self.host, path)
    }
}
