// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Probe configuration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::{DispatcherConfig, Endpoint, RequestDispatcher};
use crate::session::{FileStorage, SessionStore};

/// Session document file name, in the home directory
pub const CONFIG_FILE_NAME: &str = ".tenant-api.json";

/// Environment variable overriding the session document path
pub const CONFIG_PATH_ENV: &str = "TENANT_PROBE_CONFIG";

/// Environment variable overriding the API host
pub const HOST_ENV: &str = "TENANT_PROBE_HOST";

/// `~/.tenant-api.json`
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or_else(|| Error::Config("cannot determine the home directory".to_string()))
}

/// Everything needed to talk to the API
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Session document location
    pub config_path: PathBuf,
    /// API script address
    pub endpoint: Endpoint,
    /// HTTP settings
    pub dispatcher: DispatcherConfig,
}

impl ProbeConfig {
    /// Default endpoint and HTTP settings, session document at `config_path`
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            endpoint: Endpoint::default(),
            dispatcher: DispatcherConfig::default(),
        }
    }

    /// Defaults with the session document in the home directory
    pub fn with_default_path() -> Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    /// Set the session document path
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Set the scheme
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.endpoint.scheme = scheme.into();
        self
    }

    /// Set the host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.endpoint.host = host.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.endpoint.path = path.into();
        self
    }

    /// Set request timeouts
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.timeout(timeout);
        self
    }

    /// Load the session store
    pub fn open_store(&self) -> Result<Arc<SessionStore>> {
        Ok(Arc::new(SessionStore::open(&self.config_path)?))
    }

    /// Clear the session, rewriting the document from scratch if it cannot be loaded
    pub fn reset_store(&self) -> Result<Arc<SessionStore>> {
        match SessionStore::open(&self.config_path) {
            Ok(store) => {
                store.reset()?;
                Ok(Arc::new(store))
            }
            Err(e) if e.is_persistence() => {
                tracing::warn!(error = %e, "Session document unreadable, starting over");
                let store = SessionStore::reinitialize(FileStorage::new(&self.config_path))?;
                Ok(Arc::new(store))
            }
            Err(e) => Err(e),
        }
    }

    /// Build a dispatcher over `store`
    pub fn dispatcher(&self, store: Arc<SessionStore>) -> Result<RequestDispatcher> {
        RequestDispatcher::with_config(store, self.dispatcher.clone())
    }
}
