//! Launch-URL credential extraction and token exchange.

use serde::Deserialize;
use serde_json::json;
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::http::HttpClient;
use crate::models::token::SessionToken;
use crate::{AppError, Result};

/// Fragment parameter carrying the mini-app launch credential.
const WEB_APP_DATA_PARAM: &str = "tgWebAppData";

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    access: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<TokenEnvelope>,
}

/// Recover the authentication payload from a mini-app launch URL.
///
/// The credential travels as a query-style `tgWebAppData` parameter inside
/// the URL fragment, not the query string. Pure parse, no I/O.
///
/// # Errors
///
/// Returns `AppError::Extraction` when the URL is malformed, carries no
/// fragment, or the parameter is absent or empty.
pub fn extract_auth_from_url(raw: &str) -> Result<String> {
    let parsed =
        Url::parse(raw).map_err(|err| AppError::Extraction(format!("malformed url: {err}")))?;
    let fragment = parsed
        .fragment()
        .ok_or_else(|| AppError::Extraction("url has no fragment".into()))?;

    let payload = url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(name, _)| name == WEB_APP_DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            AppError::Extraction(format!("{WEB_APP_DATA_PARAM} not found in url fragment"))
        })?;

    if payload.is_empty() {
        return Err(AppError::Extraction(format!(
            "{WEB_APP_DATA_PARAM} is empty"
        )));
    }

    Ok(payload)
}

/// Exchange the extracted payload for a bearer token.
///
/// Submits the payload together with the fixed referral identifier. A
/// single attempt; a failed exchange aborts the run.
///
/// # Errors
///
/// Returns `AppError::Auth` when the exchange call fails or the response
/// lacks the `token.access` field.
pub async fn acquire_token(
    http: &HttpClient,
    config: &Config,
    payload: &str,
) -> Result<SessionToken> {
    let body = json!({
        "query": payload,
        "referralToken": config.api.referral_token,
    });

    let value = http
        .post_json(&config.api.auth_url, None, Some(&body))
        .await
        .map_err(|err| AppError::Auth(format!("token exchange failed: {err}")))?;

    let access = parse_access_token(value)?;

    info!("session token acquired");
    Ok(SessionToken::bearer(&access))
}

fn parse_access_token(value: serde_json::Value) -> Result<String> {
    let response: AuthResponse = serde_json::from_value(value)
        .map_err(|err| AppError::Auth(format!("unreadable token response: {err}")))?;

    response
        .token
        .and_then(|token| token.access)
        .ok_or_else(|| AppError::Auth("token response missing token.access".into()))
}
