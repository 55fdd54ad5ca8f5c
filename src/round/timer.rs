//! Background task driving the round countdown.
//!
//! Fires on a fixed interval with no drift correction; missed ticks are
//! delayed rather than burst.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};

use crate::session::coordinator::Coordinator;

/// Spawn the round timer.
///
/// The first tick lands one `cadence` after spawning, so a freshly started
/// round keeps its full duration.
#[must_use]
pub fn spawn_round_timer(
    coordinator: Arc<Coordinator>,
    cadence: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(
        async move {
            let mut interval = tokio::time::interval_at(Instant::now() + cadence, cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        info!("round timer shutting down");
                        break;
                    }
                    _ = interval.tick() => coordinator.tick().await,
                }
            }
        }
        .instrument(info_span!("round_timer")),
    )
}
