//! Integration tests for the session driver lifecycle.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use drop_farmer::game::api::GameApi;
use drop_farmer::game::driver::SessionDriver;
use drop_farmer::models::token::SessionToken;

use super::test_helpers::{fast_settings, FailAt, ScriptedApi};

fn token() -> Arc<SessionToken> {
    Arc::new(SessionToken::bearer("test-access"))
}

#[tokio::test]
async fn completed_run_returns_true_and_calls_every_stage_once() {
    let api = ScriptedApi::new(FailAt::Nowhere);
    let dyn_api: Arc<dyn GameApi> = Arc::clone(&api) as Arc<dyn GameApi>;

    let driver = SessionDriver::new(1, dyn_api, token(), fast_settings());
    assert!(driver.run().await);

    assert_eq!(api.starts.load(Ordering::SeqCst), 1);
    assert_eq!(api.payloads.load(Ordering::SeqCst), 1);
    assert_eq!(api.claims.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_start_short_circuits_payload_and_claim() {
    let api = ScriptedApi::new(FailAt::Start);
    let dyn_api: Arc<dyn GameApi> = Arc::clone(&api) as Arc<dyn GameApi>;

    let driver = SessionDriver::new(1, dyn_api, token(), fast_settings());
    assert!(!driver.run().await);

    assert_eq!(api.starts.load(Ordering::SeqCst), 1);
    assert_eq!(api.payloads.load(Ordering::SeqCst), 0);
    assert_eq!(api.claims.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_payload_hash_short_circuits_claim() {
    let api = ScriptedApi::new(FailAt::Payload);
    let dyn_api: Arc<dyn GameApi> = Arc::clone(&api) as Arc<dyn GameApi>;

    let driver = SessionDriver::new(1, dyn_api, token(), fast_settings());
    assert!(!driver.run().await);

    assert_eq!(api.starts.load(Ordering::SeqCst), 1);
    assert_eq!(api.payloads.load(Ordering::SeqCst), 1);
    assert_eq!(api.claims.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_claim_returns_false_after_full_lifecycle() {
    let api = ScriptedApi::new(FailAt::Claim);
    let dyn_api: Arc<dyn GameApi> = Arc::clone(&api) as Arc<dyn GameApi>;

    let driver = SessionDriver::new(1, dyn_api, token(), fast_settings());
    assert!(!driver.run().await);

    assert_eq!(api.starts.load(Ordering::SeqCst), 1);
    assert_eq!(api.payloads.load(Ordering::SeqCst), 1);
    assert_eq!(api.claims.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn drawn_score_stays_within_the_configured_range() {
    let api = ScriptedApi::new(FailAt::Nowhere);
    let dyn_api: Arc<dyn GameApi> = Arc::clone(&api) as Arc<dyn GameApi>;

    let mut settings = fast_settings();
    settings.score_min = 230;
    settings.score_max = 232;

    for number in 1..=20 {
        let driver = SessionDriver::new(number, Arc::clone(&dyn_api), token(), settings.clone());
        assert!(driver.run().await);
    }

    let scores = api.seen_scores.lock().unwrap();
    assert_eq!(scores.len(), 20);
    assert!(scores.iter().all(|score| (230..=232).contains(score)));
}

#[tokio::test]
async fn driver_forwards_the_shared_token() {
    let api = ScriptedApi::new(FailAt::Nowhere);
    let dyn_api: Arc<dyn GameApi> = Arc::clone(&api) as Arc<dyn GameApi>;

    let driver = SessionDriver::new(1, dyn_api, token(), fast_settings());
    assert!(driver.run().await);

    let seen = api.seen_tokens.lock().unwrap();
    assert_eq!(seen.as_slice(), ["Bearer test-access"]);
}
