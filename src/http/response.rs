// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use super::headers;

/// Raw API response, uninterpreted
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl ApiResponse {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// `Set-Cookie` values in arrival order; non-ASCII values are skipped
    pub fn set_cookies(&self) -> Vec<&str> {
        self.headers
            .get_all(headers::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn response(body: &'static str, headers: HeaderMap) -> ApiResponse {
        ApiResponse::new(
            StatusCode::OK,
            headers,
            Bytes::from(body),
            Url::parse("http://clhlabs.dae.tw/ws/app.php").unwrap(),
            12,
        )
    }

    #[test]
    fn test_response_status() {
        let resp = response("", HeaderMap::new());
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_text_lossy() {
        let resp = ApiResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(b"ok \xff"),
            Url::parse("http://clhlabs.dae.tw/ws/app.php").unwrap(),
            3,
        );
        assert_eq!(resp.text_lossy(), "ok \u{fffd}");
        assert_eq!(resp.body_len(), 4);
    }

    #[test]
    fn test_set_cookies() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("lang=en"));
        headers.append("set-cookie", HeaderValue::from_static("PHPSESSID=abc; Max-Age=60"));

        let resp = response("{}", headers);
        assert_eq!(resp.set_cookies(), vec!["lang=en", "PHPSESSID=abc; Max-Age=60"]);
    }
}
