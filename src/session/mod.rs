// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persisted PHP session
//!
//! The API authenticates with a `PHPSESSID` cookie. The store keeps that id,
//! when it was refreshed and when it expires in a small JSON document under
//! the user's home directory, and updates it from `Set-Cookie` headers.

mod cookie;
mod document;
mod storage;
mod store;

pub use cookie::{cookie_header, find_value, parse_pairs, SessionCookie, MAX_AGE, SESSION_COOKIE};
pub use document::{ConfigDocument, Session};
pub use storage::{DocumentStorage, FileStorage, MemoryStorage};
pub use store::SessionStore;
