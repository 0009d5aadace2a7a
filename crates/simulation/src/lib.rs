//! Periodic tick driver for the simulation clock.
//!
//! The driver owns the only timer in the application.  It never touches
//! stream data: it emits [`Tick`]s tagged with the clock generation it was
//! configured with, and the event loop applies them to the state.

use chrono::{DateTime, Utc};
use dash_core::SimulationClock;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// One timer firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
    pub at: DateTime<Utc>,
}

/// Control side of a running clock driver.  Dropping it stops the driver.
#[derive(Debug)]
pub struct ClockHandle {
    config: watch::Sender<SimulationClock>,
}

impl ClockHandle {
    /// Push a new clock configuration.  A pending tick of the previous
    /// configuration is cancelled and, if running, the period restarts from now.
    pub fn reconfigure(&self, clock: SimulationClock) {
        let changed = self.config.send_if_modified(|current| {
            if *current == clock {
                return false;
            }
            *current = clock;
            true
        });
        if changed {
            info!(
                rate = clock.rate(),
                running = clock.is_running(),
                generation = clock.generation(),
                "Simulation clock reconfigured"
            );
        }
    }
}

/// Spawn a background Tokio task that emits a [`Tick`] every clock period
/// while the clock is running.
///
/// The task stops when either the handle or the receiver is dropped.
pub fn spawn_clock(initial: SimulationClock) -> (ClockHandle, mpsc::Receiver<Tick>) {
    let (config_tx, config_rx) = watch::channel(initial);
    let (tick_tx, tick_rx) = mpsc::channel(64);

    tokio::spawn(drive(config_rx, tick_tx));

    (ClockHandle { config: config_tx }, tick_rx)
}

async fn drive(mut config: watch::Receiver<SimulationClock>, tx: mpsc::Sender<Tick>) {
    loop {
        let clock = *config.borrow_and_update();

        if !clock.is_running() {
            debug!(generation = clock.generation(), "Clock idle");
            if config.changed().await.is_err() {
                return; // handle dropped
            }
            continue;
        }

        let period = clock.period();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let tick = Tick { generation: clock.generation(), at: Utc::now() };
                    if tx.send(tick).await.is_err() {
                        return; // receiver dropped
                    }
                }
                changed = config.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break; // reconfigured: restart with the new period
                }
            }
        }
    }
}
