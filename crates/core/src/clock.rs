use std::time::Duration;

/// Lowest accepted simulation rate (ticks per second).
pub const MIN_RATE: u32 = 1;
/// Highest accepted simulation rate (ticks per second).
pub const MAX_RATE: u32 = 100;
/// Rate used when nothing else is configured.
pub const DEFAULT_RATE: u32 = 10;

/// Configuration of the periodic simulation timer.
///
/// The timer itself lives in `dash-sim`; this is the state the event loop
/// owns and hands to the driver whenever it changes.  Every change bumps
/// `generation`, and ticks carrying an older generation are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    rate: u32,
    running: bool,
    generation: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_RATE, false)
    }
}

impl SimulationClock {
    pub fn new(rate: u32, running: bool) -> Self {
        Self {
            rate: clamp_rate(rate),
            running,
            generation: 0,
        }
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tick period: `1000 / rate` milliseconds.
    pub fn period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.rate))
    }

    /// Set the rate, clamped to `[MIN_RATE, MAX_RATE]`.  Returns `true` if
    /// the effective rate changed.
    pub fn set_rate(&mut self, rate: u32) -> bool {
        let rate = clamp_rate(rate);
        if rate == self.rate {
            return false;
        }
        self.rate = rate;
        self.generation += 1;
        true
    }

    /// Returns `true` if the clock was stopped.
    pub fn start(&mut self) -> bool {
        self.set_running(true)
    }

    /// Returns `true` if the clock was running.
    pub fn stop(&mut self) -> bool {
        self.set_running(false)
    }

    pub fn toggle(&mut self) {
        self.set_running(!self.running);
    }

    /// Whether a tick tagged with `generation` should still be applied.
    pub fn accepts(&self, generation: u64) -> bool {
        self.running && generation == self.generation
    }

    fn set_running(&mut self, running: bool) -> bool {
        if self.running == running {
            return false;
        }
        self.running = running;
        self.generation += 1;
        true
    }
}

fn clamp_rate(rate: u32) -> u32 {
    if !(MIN_RATE..=MAX_RATE).contains(&rate) {
        tracing::warn!(rate, "Simulation rate out of range; clamping to [{MIN_RATE}, {MAX_RATE}]");
    }
    rate.clamp(MIN_RATE, MAX_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_follows_rate() {
        let mut clock = SimulationClock::new(10, true);
        assert_eq!(clock.period(), Duration::from_millis(100));
        clock.set_rate(1);
        assert_eq!(clock.period(), Duration::from_secs(1));
        clock.set_rate(100);
        assert_eq!(clock.period(), Duration::from_millis(10));
    }

    #[test]
    fn rate_is_clamped() {
        let mut clock = SimulationClock::new(0, false);
        assert_eq!(clock.rate(), MIN_RATE);
        clock.set_rate(500);
        assert_eq!(clock.rate(), MAX_RATE);
    }

    #[test]
    fn reconfiguration_bumps_generation() {
        let mut clock = SimulationClock::new(10, false);
        assert!(!clock.stop());
        assert_eq!(clock.generation(), 0);

        assert!(clock.start());
        assert_eq!(clock.generation(), 1);
        assert!(!clock.set_rate(10));
        assert_eq!(clock.generation(), 1);
        assert!(clock.set_rate(20));
        assert_eq!(clock.generation(), 2);
    }

    #[test]
    fn stale_ticks_are_rejected() {
        let mut clock = SimulationClock::new(10, true);
        let before = clock.generation();
        assert!(clock.accepts(before));

        clock.set_rate(50);
        assert!(!clock.accepts(before));
        assert!(clock.accepts(clock.generation()));

        clock.stop();
        assert!(!clock.accepts(clock.generation()));
    }
}
