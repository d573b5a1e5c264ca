//! Thin JSON transport over `reqwest` with a fixed browser header set.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, ORIGIN, USER_AGENT,
};
use serde_json::Value;
use tracing::error;

use crate::config::ApiConfig;
use crate::models::token::SessionToken;
use crate::{AppError, Result};

/// Origin presented to the game service on every request.
const ORIGIN_URL: &str = "https://telegram.blum.codes";

/// Client-hint headers mimicking the desktop Edge WebView the mini-app runs in.
const CLIENT_HINTS: [(&str, &str); 6] = [
    (
        "Sec-Ch-Ua",
        "\"Microsoft Edge\";v=\"129\", \"Not=A?Brand\";v=\"8\", \"Chromium\";v=\"129\", \
         \"Microsoft Edge WebView2\";v=\"129\"",
    ),
    ("Sec-Ch-Ua-Mobile", "?0"),
    ("Sec-Ch-Ua-Platform", "\"Windows\""),
    ("Sec-Fetch-Dest", "empty"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Site", "same-site"),
];

/// JSON POST client with fixed headers and a fixed request timeout.
///
/// Retry policy belongs to callers; this layer issues exactly one attempt
/// per call.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client with the fixed header set and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured user agent is not a
    /// valid header value or the underlying client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert("Lang", HeaderValue::from_static("en"));
        headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_URL));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|err| AppError::Config(format!("invalid user agent: {err}")))?;
        headers.insert(USER_AGENT, agent);
        for (name, value) in CLIENT_HINTS {
            headers.insert(name, HeaderValue::from_static(value));
        }

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|err| AppError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self { inner })
    }

    /// POST an optional JSON body and return the parsed response body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Transport` carrying the remote status and error
    /// body on a non-2xx response, or the underlying transport error when
    /// the request never completed.
    pub async fn post_json(
        &self,
        url: &str,
        bearer: Option<&SessionToken>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut request = self.inner.post(url);
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, token.as_header());
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(AppError::from);
        }

        let headers = response.headers().clone();
        let text = response.text().await.unwrap_or_default();
        error!(
            url,
            status = status.as_u16(),
            body = %text,
            headers = ?headers,
            "remote call failed"
        );
        Err(AppError::Transport {
            status: Some(status.as_u16()),
            body: text,
        })
    }
}
