//! Per-session lifecycle driver: start, pacing wait, payload, claim.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::game::api::GameApi;
use crate::models::session::{GameSession, SessionState};
use crate::models::token::SessionToken;
use crate::Result;

/// Pacing and scoring knobs a driver needs from configuration.
#[derive(Debug, Clone)]
pub struct DriverSettings {
    /// Simulated-gameplay delay between start and payload generation.
    pub pacing: Duration,
    /// Inclusive lower bound of the target-score draw.
    pub score_min: u32,
    /// Inclusive upper bound of the target-score draw.
    pub score_max: u32,
}

/// Drives one game session through its four-stage lifecycle.
///
/// The driver owns its [`GameSession`] exclusively and shares only the
/// read-only token with its siblings.
pub struct SessionDriver {
    api: Arc<dyn GameApi>,
    token: Arc<SessionToken>,
    settings: DriverSettings,
    session: GameSession,
}

impl SessionDriver {
    /// Create a driver for session `number` sharing the run-wide token.
    #[must_use]
    pub fn new(
        number: usize,
        api: Arc<dyn GameApi>,
        token: Arc<SessionToken>,
        settings: DriverSettings,
    ) -> Self {
        Self {
            api,
            token,
            settings,
            session: GameSession::new(number),
        }
    }

    /// Run the session to a terminal state and return its outcome.
    ///
    /// Every stage failure is caught here, logged with session context, and
    /// folded into the boolean outcome; errors never cross this boundary,
    /// so one session can never abort its siblings.
    pub async fn run(mut self) -> bool {
        let number = self.session.number;
        match self.advance().await {
            Ok(()) => true,
            Err(err) => {
                self.transition(SessionState::Failed);
                warn!(session = number, %err, "session failed");
                false
            }
        }
    }

    async fn advance(&mut self) -> Result<()> {
        let number = self.session.number;

        info!(session = number, "starting game");
        let game_id = self.api.start_game(&self.token).await?;
        let score = rand::rng().random_range(self.settings.score_min..=self.settings.score_max);
        self.session.game_id = Some(game_id.clone());
        self.session.target_score = Some(score);
        self.transition(SessionState::AwaitingPayload);
        info!(
            session = number,
            game_id = %game_id,
            score,
            "game started; simulating gameplay"
        );

        sleep(self.settings.pacing).await;

        info!(session = number, "requesting claim payload");
        let payload = self.api.generate_payload(&game_id, score).await?;
        self.transition(SessionState::Claiming);

        info!(session = number, "submitting claim");
        self.api.claim_game(&self.token, &payload).await?;
        self.transition(SessionState::Completed);
        info!(session = number, score, "claimed");

        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(self.session.state.can_transition_to(next));
        self.session.state = next;
    }
}
