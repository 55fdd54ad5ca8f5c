//! Integration tests for the background round timer.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use letterboard::config::RoundConfig;
use letterboard::models::events::ServerEvent;
use letterboard::models::round::RoundPhase;
use letterboard::round::timer::spawn_round_timer;

use super::test_helpers::{coordinator_with, next_event, EVENT_TIMEOUT};

const CADENCE: Duration = Duration::from_millis(20);

fn short_rounds() -> RoundConfig {
    RoundConfig {
        round_seconds: 2,
        break_seconds: 1,
        initial_letters: 5,
        tick_millis: 20,
    }
}

#[tokio::test]
async fn timer_drives_full_round_cycle() {
    let coordinator = coordinator_with(short_rounds()).await;
    let mut rx = coordinator.subscribe();
    let ct = CancellationToken::new();
    let handle = spawn_round_timer(coordinator.clone(), CADENCE, ct.clone());

    let mut names = Vec::new();
    while names.len() < 6 {
        names.push(next_event(&mut rx).await.name());
    }

    ct.cancel();
    tokio::time::timeout(EVENT_TIMEOUT, handle)
        .await
        .expect("timer did not stop")
        .expect("timer panicked");

    assert_eq!(
        names,
        vec![
            "roundUpdate",
            "roundOver",
            "roundUpdate",
            "newRound",
            "roundUpdate",
            "roundUpdate",
        ]
    );
}

#[tokio::test]
async fn first_tick_waits_one_cadence() {
    let coordinator = coordinator_with(short_rounds()).await;
    let mut rx = coordinator.subscribe();
    let ct = CancellationToken::new();
    let handle = spawn_round_timer(coordinator.clone(), CADENCE, ct.clone());

    assert_eq!(coordinator.snapshot().await.remaining_time, 2);
    assert_eq!(
        next_event(&mut rx).await,
        ServerEvent::RoundUpdate {
            remaining_time: 1,
            round_state: RoundPhase::Running,
        }
    );

    ct.cancel();
    handle.await.expect("timer panicked");
}

#[tokio::test]
async fn cancelled_timer_stops_ticking() {
    let coordinator = coordinator_with(RoundConfig::default()).await;
    let ct = CancellationToken::new();
    let handle = spawn_round_timer(coordinator.clone(), CADENCE, ct.clone());

    ct.cancel();
    handle.await.expect("timer panicked");
    let frozen = coordinator.snapshot().await.remaining_time;
    tokio::time::sleep(CADENCE * 5).await;

    assert_eq!(coordinator.snapshot().await.remaining_time, frozen);
}
