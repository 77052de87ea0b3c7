// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session store
//!
//! Holds the current [`ConfigDocument`] and keeps it in step with its
//! storage. Every mutation is written out in full before the in-memory copy
//! is replaced, and all reads and mutations go through one lock.

use std::path::{Path, PathBuf};

use chrono::{Local, SubsecRound};
use parking_lot::Mutex;

use super::cookie::SessionCookie;
use super::document::{ConfigDocument, Session};
use super::storage::{DocumentStorage, FileStorage};
use crate::error::{Error, Result};

/// Persisted PHP session shared by all requests
pub struct SessionStore {
    storage: Box<dyn DocumentStorage>,
    document: Mutex<ConfigDocument>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("location", &self.storage.location())
            .field("document", &*self.document.lock())
            .finish()
    }
}

impl SessionStore {
    /// Open the store backed by a file, creating the file if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(FileStorage::new(path.as_ref()))
    }

    /// Load the document from storage
    ///
    /// Missing or blank content is first reset to the default document.
    /// Content that does not parse is fatal.
    pub fn load(storage: impl DocumentStorage + 'static) -> Result<Self> {
        let storage: Box<dyn DocumentStorage> = Box::new(storage);
        let location = storage.location();

        let needs_reset = match storage.read()? {
            None => true,
            Some(content) => content.trim().is_empty(),
        };
        if needs_reset {
            tracing::info!(location = %location.display(), "Initializing empty session document");
            storage.write(&ConfigDocument::default().to_json()?)?;
        }

        let content = storage
            .read()?
            .ok_or_else(|| Error::persistence(&location, "document vanished after reset"))?;
        let document = ConfigDocument::from_json(&content)
            .map_err(|e| Error::persistence(&location, format!("malformed session document: {}", e)))?;

        tracing::debug!(
            location = %location.display(),
            active = document.session.is_active(),
            "Loaded session document"
        );

        Ok(Self {
            storage,
            document: Mutex::new(document),
        })
    }

    /// Overwrite whatever is stored with the default document
    ///
    /// For content too damaged to load; its unknown keys are lost.
    pub fn reinitialize(storage: impl DocumentStorage + 'static) -> Result<Self> {
        let storage: Box<dyn DocumentStorage> = Box::new(storage);
        let document = ConfigDocument::default();
        storage.write(&document.to_json()?)?;

        tracing::warn!(location = %storage.location().display(), "Session document reinitialized");
        Ok(Self {
            storage,
            document: Mutex::new(document),
        })
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.document.lock().session.clone()
    }

    /// Snapshot of the whole document
    pub fn document(&self) -> ConfigDocument {
        self.document.lock().clone()
    }

    /// `Cookie` header for the current session, if any
    pub fn cookie_header(&self) -> Option<String> {
        self.document.lock().session.cookie_header()
    }

    /// Where the document is stored
    pub fn location(&self) -> PathBuf {
        self.storage.location()
    }

    /// Drop the session, forcing a fresh login
    pub fn reset(&self) -> Result<()> {
        let mut document = self.document.lock();
        let next = document.with_session(Session::default());
        self.storage.write(&next.to_json()?)?;
        *document = next;

        tracing::info!("Session reset");
        Ok(())
    }

    /// Apply a Set-Cookie value from a response
    ///
    /// Returns the new session when the value carried a `PHPSESSID`. An absent
    /// or blank value, or one without a session id, changes nothing and does
    /// not touch storage.
    pub fn update(&self, header: Option<&str>) -> Result<Option<Session>> {
        let header = match header.map(str::trim) {
            Some(h) if !h.is_empty() => h,
            _ => return Ok(None),
        };

        let cookie = match SessionCookie::parse(header) {
            Ok(cookie) => cookie,
            Err(Error::MalformedCookie(reason)) => {
                tracing::debug!(%reason, "Set-Cookie without session id, keeping session");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut document = self.document.lock();
        // millisecond precision, as written to disk
        let now = Local::now().trunc_subsecs(3);
        let previous = &document.session;

        let session = Session {
            session_id: cookie.session_id.clone(),
            updated_at: Some(now.fixed_offset()),
            expires_at: cookie
                .expires_at(now.timestamp_millis())
                .unwrap_or(previous.expires_at),
            extra: previous.extra.clone(),
        };

        let next = document.with_session(session.clone());
        self.storage.write(&next.to_json()?)?;
        *document = next;

        tracing::debug!(
            session_id = %session.session_id,
            expires_at = session.expires_at,
            "Session refreshed"
        );
        Ok(Some(session))
    }
}
