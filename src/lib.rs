// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # tenant-probe - Tenant App API Test Harness
//!
//! Issues one form-encoded POST per action against the tenant app API and
//! hands back the raw response. The PHP session cookie is persisted between
//! runs so a login carries over to later calls.
//!
//! ## Features
//!
//! - Session store: `PHPSESSID`, refresh time and expiry in `~/.tenant-api.json`
//! - Dispatcher: attaches the session cookie, applies `Set-Cookie` refreshes
//! - Actions: field builders for login, meter data, device binding, refunds
//! - Crypto: AES-256-CBC with a SHA-256 derived key and embedded IV
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tenant_probe::api::{actions, LoginParams};
//! use tenant_probe::{Endpoint, RequestDispatcher, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SessionStore::open("/tmp/.tenant-api.json")?);
//!     let dispatcher = RequestDispatcher::new(store.clone())?;
//!
//!     let login = actions::login(&LoginParams::new("tenant@example.com", "secret", "2119270014"));
//!     let response = dispatcher.send(&Endpoint::default(), &login).await?;
//!
//!     println!("{} {}", response.status, response.text_lossy());
//!     println!("session: {}", store.session().session_id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod http;
pub mod session;

// Re-exports for convenience

// Configuration
pub use config::{default_config_path, ProbeConfig};

// Crypto
pub use crypto::{CipherPayload, CryptoEngine};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{ApiResponse, DispatcherConfig, Endpoint, RequestDispatcher, RequestSpec};

// Session
pub use session::{ConfigDocument, DocumentStorage, FileStorage, Session, SessionStore};

// API
pub use api::{ApiEnvelope, LoginSummary};

/// tenant-probe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
