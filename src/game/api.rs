//! Seam between session drivers and the remote game endpoints.
//!
//! The [`GameApi`] trait decouples the driver state machine from the wire
//! so tests can substitute in-memory implementations. [`LiveGameApi`] is
//! the production implementation over [`HttpClient`].

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::http::HttpClient;
use crate::models::token::SessionToken;
use crate::{AppError, Result};

#[derive(Debug, Deserialize)]
struct PlayResponse {
    #[serde(rename = "gameId")]
    game_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PayloadPack {
    hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PayloadResponse {
    pack: Option<PayloadPack>,
}

/// Remote game operations used by a session driver.
///
/// All methods issue exactly one attempt; retry policy does not exist at
/// this level.
pub trait GameApi: Send + Sync {
    /// Start a new game session, returning the assigned game identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] if the call fails, or
    /// [`AppError::Payload`] if the response carries no identifier.
    fn start_game(
        &self,
        token: &SessionToken,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;

    /// Generate the claim payload hash for a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] if the call fails, or
    /// [`AppError::Payload`] if the response lacks the `pack.hash` field.
    fn generate_payload(
        &self,
        game_id: &str,
        score: u32,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>>;

    /// Submit the claim for a generated payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transport`] if the call fails.
    fn claim_game(
        &self,
        token: &SessionToken,
        payload: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production [`GameApi`] backed by the shared [`HttpClient`].
#[derive(Debug, Clone)]
pub struct LiveGameApi {
    http: HttpClient,
    play_url: String,
    claim_url: String,
    payload_url: String,
    currency: String,
}

impl LiveGameApi {
    /// Build the live API from configuration.
    #[must_use]
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self {
            http,
            play_url: config.api.play_url.clone(),
            claim_url: config.api.claim_url.clone(),
            payload_url: config.api.payload_url.clone(),
            currency: config.game.currency.clone(),
        }
    }
}

impl GameApi for LiveGameApi {
    fn start_game(
        &self,
        token: &SessionToken,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        let token = token.clone();
        Box::pin(async move {
            let value = self
                .http
                .post_json(&self.play_url, Some(&token), None)
                .await?;
            let response: PlayResponse = serde_json::from_value(value)
                .map_err(|err| AppError::Payload(format!("unreadable play response: {err}")))?;
            response
                .game_id
                .ok_or_else(|| AppError::Payload("play response missing gameId".into()))
        })
    }

    fn generate_payload(
        &self,
        game_id: &str,
        score: u32,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        // The generator wants the score as a string, keyed by currency.
        let mut assets = serde_json::Map::new();
        assets.insert(
            self.currency.clone(),
            json!({ "amount": score.to_string() }),
        );
        let body = json!({
            "gameId": game_id,
            "earnedAssets": assets,
        });

        Box::pin(async move {
            let value = self.http.post_json(&self.payload_url, None, Some(&body)).await?;
            let response: PayloadResponse = serde_json::from_value(value)
                .map_err(|err| AppError::Payload(format!("unreadable payload response: {err}")))?;
            response
                .pack
                .and_then(|pack| pack.hash)
                .ok_or_else(|| {
                    AppError::Payload("no payload pack received from generator".into())
                })
        })
    }

    fn claim_game(
        &self,
        token: &SessionToken,
        payload: &str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let token = token.clone();
        let body = json!({ "payload": payload });
        Box::pin(async move {
            self.http
                .post_json(&self.claim_url, Some(&token), Some(&body))
                .await?;
            Ok(())
        })
    }
}
