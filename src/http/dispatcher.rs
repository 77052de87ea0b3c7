// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session-authenticated request dispatcher

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use super::endpoint::Endpoint;
use super::form::RequestSpec;
use super::response::ApiResponse;
use super::{headers, DEFAULT_USER_AGENT, FORM_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::session::SessionStore;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// User agent string
    pub user_agent: String,
    /// Whole-exchange timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(3),
            connect_timeout: Duration::from_secs(3),
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both timeouts
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// Sends API calls with the current session and records session refreshes
#[derive(Clone)]
pub struct RequestDispatcher {
    client: Client,
    config: DispatcherConfig,
    store: Arc<SessionStore>,
}

impl RequestDispatcher {
    /// Create a dispatcher with default configuration
    pub fn new(store: Arc<SessionStore>) -> Result<Self> {
        Self::with_config(store, DispatcherConfig::default())
    }

    /// Create a dispatcher with custom configuration
    pub fn with_config(store: Arc<SessionStore>, config: DispatcherConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            store,
        })
    }

    /// The session store requests are authenticated with
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Get dispatcher configuration
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// POST `fields` to `endpoint`
    ///
    /// Attaches `Cookie: PHPSESSID=...` when a session is held. Once the whole
    /// response has arrived, every `Set-Cookie` in it is applied to the
    /// session store whatever the status code. A failed exchange, including
    /// a failed body read, returns a transport error and leaves the session
    /// untouched.
    pub async fn send(&self, endpoint: &Endpoint, fields: &RequestSpec) -> Result<ApiResponse> {
        let url = endpoint.url()?;
        let start = Instant::now();

        let mut builder = self
            .client
            .post(url.clone())
            .header(headers::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(fields.encode());

        if let Some(cookie) = self.store.cookie_header() {
            builder = builder.header(headers::COOKIE, cookie);
        }

        tracing::debug!(url = %url, fields = fields.len(), "Dispatching request");

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(e, &url))?;

        let status = response.status();
        let final_url = response.url().clone();
        let response_headers = response.headers().clone();

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        let response_time = start.elapsed().as_millis() as u64;

        tracing::info!(
            url = %final_url,
            status = %status,
            time_ms = response_time,
            "Response"
        );

        let response = ApiResponse::new(status, response_headers, body, final_url, response_time);
        self.apply_set_cookies(&response).await;
        Ok(response)
    }

    /// Feed each `Set-Cookie` to the store, off the async workers
    async fn apply_set_cookies(&self, response: &ApiResponse) {
        let cookies: Vec<String> = response.set_cookies().into_iter().map(String::from).collect();
        if cookies.is_empty() {
            return;
        }

        let store = self.store.clone();
        let applied = tokio::task::spawn_blocking(move || {
            for cookie in &cookies {
                // not fatal to the exchange
                if let Err(e) = store.update(Some(cookie)) {
                    tracing::warn!(error = %e, "Failed to persist refreshed session");
                }
            }
        })
        .await;

        if let Err(e) = applied {
            tracing::warn!(error = %e, "Session update task failed");
        }
    }

    fn transport_error(&self, err: reqwest::Error, url: &Url) -> Error {
        tracing::warn!(url = %url, error = %err, "Request failed");
        if err.is_timeout() {
            Error::timeout_with_url("dispatch", self.config.timeout.as_millis() as u64, url.as_str())
        } else {
            Error::Http(err)
        }
    }
}
