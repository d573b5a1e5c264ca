//! Configuration parsing, defaults, and validation.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

fn default_auth_url() -> String {
    "https://user-domain.blum.codes/api/v1/auth/provider/PROVIDER_TELEGRAM_MINI_APP".into()
}

fn default_play_url() -> String {
    "https://game-domain.blum.codes/api/v2/game/play".into()
}

fn default_claim_url() -> String {
    "https://game-domain.blum.codes/api/v2/game/claim".into()
}

fn default_payload_url() -> String {
    "https://blum-payload-generator.hariistimewa.my.id/process?apiKey=etl1".into()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_referral_token() -> String {
    "554eWV40LM".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/129.0.0.0 Safari/537.36 Edg/129.0.0.0"
        .into()
}

fn default_pacing_seconds() -> u64 {
    33
}

fn default_score_min() -> u32 {
    199
}

fn default_score_max() -> u32 {
    250
}

fn default_currency() -> String {
    "CLOVER".into()
}

/// Remote endpoint and transport settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Authentication exchange endpoint.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Game-start endpoint.
    #[serde(default = "default_play_url")]
    pub play_url: String,
    /// Game-claim endpoint.
    #[serde(default = "default_claim_url")]
    pub claim_url: String,
    /// External payload-generation endpoint.
    #[serde(default = "default_payload_url")]
    pub payload_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Referral identifier submitted with the token exchange.
    #[serde(default = "default_referral_token")]
    pub referral_token: String,
    /// Browser user agent presented on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            play_url: default_play_url(),
            claim_url: default_claim_url(),
            payload_url: default_payload_url(),
            timeout_seconds: default_timeout_seconds(),
            referral_token: default_referral_token(),
            user_agent: default_user_agent(),
        }
    }
}

/// Gameplay pacing and scoring settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GameConfig {
    /// Simulated-gameplay delay between start and payload generation.
    #[serde(default = "default_pacing_seconds")]
    pub pacing_seconds: u64,
    /// Inclusive lower bound of the target-score draw.
    #[serde(default = "default_score_min")]
    pub score_min: u32,
    /// Inclusive upper bound of the target-score draw.
    #[serde(default = "default_score_max")]
    pub score_max: u32,
    /// Currency key reported to the payload generator.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pacing_seconds: default_pacing_seconds(),
            score_min: default_score_min(),
            score_max: default_score_max(),
            currency: default_currency(),
        }
    }
}

/// Global configuration parsed from an optional TOML file.
///
/// Every key has a default, so the binary runs with no config file at all.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Remote endpoints and transport settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Gameplay pacing and scoring settings.
    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalize it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate endpoint presence and normalize the score range.
    ///
    /// An inverted score range is swapped rather than rejected: the lower
    /// bound is always treated as the true minimum.
    fn validate(&mut self) -> Result<()> {
        for (key, value) in [
            ("api.auth_url", &self.api.auth_url),
            ("api.play_url", &self.api.play_url),
            ("api.claim_url", &self.api.claim_url),
            ("api.payload_url", &self.api.payload_url),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!("{key} must not be empty")));
            }
        }

        if self.game.currency.trim().is_empty() {
            return Err(AppError::Config("game.currency must not be empty".into()));
        }

        if self.game.score_min > self.game.score_max {
            warn!(
                score_min = self.game.score_min,
                score_max = self.game.score_max,
                "score range is inverted; swapping bounds"
            );
            std::mem::swap(&mut self.game.score_min, &mut self.game.score_max);
        }

        Ok(())
    }
}
