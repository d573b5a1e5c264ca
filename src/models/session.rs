//! Game session model and lifecycle helpers.

use serde::{Deserialize, Serialize};

/// Lifecycle state for one game session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session created; start call not yet accepted.
    Started,
    /// Start accepted; pacing wait and payload generation pending.
    AwaitingPayload,
    /// Payload hash obtained; claim submission in flight.
    Claiming,
    /// Claim accepted.
    Completed,
    /// A stage failed; the session is abandoned.
    Failed,
}

impl SessionState {
    /// Determine whether a lifecycle transition is permitted.
    ///
    /// `Failed` is reachable from every non-terminal state; the success path
    /// advances strictly one stage at a time.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Started, Self::AwaitingPayload)
                | (Self::AwaitingPayload, Self::Claiming)
                | (Self::Claiming, Self::Completed)
                | (
                    Self::Started | Self::AwaitingPayload | Self::Claiming,
                    Self::Failed
                )
        )
    }

    /// Whether the state is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Per-session record owned exclusively by its driver.
///
/// Never shared across sessions; the remote service assigns `game_id` and
/// the driver draws `target_score` once the start call succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GameSession {
    /// Ordinal session number within the run (1-based, used for logging).
    pub number: usize,
    /// Identifier assigned by the game service at start.
    pub game_id: Option<String>,
    /// Target score drawn for this session.
    pub target_score: Option<u32>,
    /// Current lifecycle state.
    pub state: SessionState,
}

impl GameSession {
    /// Construct a session awaiting its start call.
    #[must_use]
    pub fn new(number: usize) -> Self {
        Self {
            number,
            game_id: None,
            target_score: None,
            state: SessionState::Started,
        }
    }
}
