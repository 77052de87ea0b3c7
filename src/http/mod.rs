// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer
//!
//! Form-encoded POSTs to the API script, authenticated with the persisted
//! PHP session cookie.

mod dispatcher;
mod endpoint;
mod form;
mod response;

pub use dispatcher::{DispatcherConfig, RequestDispatcher};
pub use endpoint::{Endpoint, DEFAULT_PATH, KNOWN_HOSTS};
pub use form::RequestSpec;
pub use response::ApiResponse;

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:94.0) Gecko/20100101 Firefox/94.0";

/// Body content type of every request
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
}
