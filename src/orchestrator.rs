//! Fan-out/fan-in execution of concurrent game sessions.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{error, info};

use crate::game::api::GameApi;
use crate::game::driver::{DriverSettings, SessionDriver};
use crate::models::token::SessionToken;

/// Aggregate outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    outcomes: Vec<bool>,
}

impl RunSummary {
    /// Number of sessions that completed their claim.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|ok| **ok).count()
    }

    /// Total number of sessions launched.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Per-session outcomes in launch order.
    #[must_use]
    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }
}

/// Normalize a raw session-count argument.
///
/// Anything that is not a positive integer collapses to 1.
#[must_use]
pub fn resolve_session_count(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|count| *count >= 1)
        .unwrap_or(1)
}

/// Launch `count` session drivers concurrently and gather every outcome.
///
/// The gather never short-circuits: a session that errors or panics is
/// recorded as `false` while the remaining sessions keep running, and the
/// summary always holds exactly `count` outcomes regardless of completion
/// order.
pub async fn run_sessions(
    api: Arc<dyn GameApi>,
    token: SessionToken,
    count: usize,
    settings: DriverSettings,
) -> RunSummary {
    info!(count, "launching sessions");
    let token = Arc::new(token);

    let handles: Vec<_> = (1..=count)
        .map(|number| {
            let driver = SessionDriver::new(
                number,
                Arc::clone(&api),
                Arc::clone(&token),
                settings.clone(),
            );
            tokio::spawn(driver.run())
        })
        .collect();

    let outcomes = join_all(handles)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, joined)| match joined {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(session = index + 1, %err, "session task aborted");
                false
            }
        })
        .collect();

    let summary = RunSummary { outcomes };
    info!(
        succeeded = summary.succeeded(),
        total = summary.total(),
        "all sessions finished"
    );
    summary
}
