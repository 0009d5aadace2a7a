use crate::{
    alert::{AlertKind, AlertQueue},
    clock::SimulationClock,
    error::{DashError, Result},
    stats::{Comparison, StreamStats},
    stream::{SeriesView, StreamId, StreamRegistry, MIN_STREAMS},
    tour::TourState,
};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

/// Startup parameters for [`AppState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateOptions {
    pub initial_streams: usize,
    pub rate: u32,
    pub autostart: bool,
    pub show_tour: bool,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            initial_streams: MIN_STREAMS,
            rate: crate::clock::DEFAULT_RATE,
            autostart: true,
            show_tour: true,
            seed: None,
        }
    }
}

/// Outcome counters for the optional storage upload side channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub completed: u64,
    pub failed: u64,
    pub last_transaction: Option<String>,
}

/// Central application state, owned by a single event loop.
///
/// Every mutation goes through a method here; the renderer only ever reads.
#[derive(Debug, Clone)]
pub struct AppState {
    pub streams: StreamRegistry,
    pub clock: SimulationClock,
    pub alerts: AlertQueue,
    pub tour: TourState,
    pub glossary_visible: bool,
    /// Stream shown in the single-stream statistics view.
    pub selected: Option<StreamId>,
    /// Streams shown side by side, ascending and deduplicated.
    pub comparison: Vec<StreamId>,
    /// Samples produced since startup, summed over all streams.
    pub total_samples: u64,
    /// Ticks applied since startup.
    pub ticks: u64,
    pub uploads: UploadStats,
    /// Time of the last applied message.
    pub time: DateTime<Utc>,
    rng: StdRng,
}

impl AppState {
    pub fn new(options: StateOptions, now: DateTime<Utc>) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let streams = StreamRegistry::new(options.initial_streams, now, &mut rng);

        Self {
            streams,
            clock: SimulationClock::new(options.rate, options.autostart),
            alerts: AlertQueue::new(),
            tour: TourState::new(options.show_tour),
            glossary_visible: false,
            selected: None,
            comparison: Vec::new(),
            total_samples: 0,
            ticks: 0,
            uploads: UploadStats::default(),
            time: now,
            rng,
        }
    }

    // ── Stream registry ───────────────────────────────────────────────────────

    /// Add a stream.  At capacity the request is rejected, an error alert is
    /// posted and the registry is left untouched.
    pub fn add_stream(&mut self, now: DateTime<Utc>) -> Result<StreamId> {
        self.time = now;
        match self.streams.add(now, &mut self.rng) {
            Ok(id) => {
                info!(id, count = self.streams.len(), "Stream added");
                Ok(id)
            }
            Err(e) => Err(self.reject(e, now)),
        }
    }

    /// Remove the most recently added stream and clear any comparison.
    pub fn remove_stream(&mut self, now: DateTime<Utc>) -> Result<StreamId> {
        self.time = now;
        match self.streams.remove_last() {
            Ok(id) => {
                self.comparison.clear();
                if self.selected == Some(id) {
                    self.selected = None;
                }
                info!(id, count = self.streams.len(), "Stream removed");
                Ok(id)
            }
            Err(e) => Err(self.reject(e, now)),
        }
    }

    pub fn select_stream(&mut self, id: StreamId) -> Result<()> {
        if !self.streams.contains(id) {
            warn!(id, "Cannot select unknown stream");
            return Err(DashError::UnknownStream(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn select_streams_for_comparison(&mut self, ids: &[StreamId]) -> Result<()> {
        if let Some(&missing) = ids.iter().find(|id| !self.streams.contains(**id)) {
            warn!(id = missing, "Cannot compare unknown stream");
            return Err(DashError::UnknownStream(missing));
        }
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        self.comparison = ids;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.comparison.clear();
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// Apply a timer tick if it belongs to the current clock generation.
    /// Returns `true` if the windows advanced.
    pub fn apply_tick(&mut self, generation: u64, now: DateTime<Utc>) -> bool {
        if !self.clock.accepts(generation) {
            debug!(generation, current = self.clock.generation(), "Dropping stale tick");
            return false;
        }
        self.tick(now);
        true
    }

    /// Advance every stream by one sample.
    ///
    /// The sample counter grows by the stream count read before the windows
    /// are advanced; a tick never changes the registry size, so this equals
    /// the number of samples produced.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.time = now;
        self.total_samples += self.streams.len() as u64;
        self.streams.advance(now, &mut self.rng);
        self.ticks += 1;
    }

    // ── Alerts ────────────────────────────────────────────────────────────────

    pub fn post_alert(
        &mut self,
        message: impl Into<String>,
        kind: AlertKind,
        now: DateTime<Utc>,
    ) -> i64 {
        self.alerts.post(message, kind, now)
    }

    pub fn expire_alerts(&mut self, now: DateTime<Utc>) -> usize {
        self.time = now;
        self.alerts.expire(now)
    }

    // ── Storage ───────────────────────────────────────────────────────────────

    pub fn record_upload(&mut self, outcome: std::result::Result<String, String>) {
        match outcome {
            Ok(tx) => {
                self.uploads.completed += 1;
                self.uploads.last_transaction = Some(tx);
            }
            Err(e) => {
                debug!("Upload failure recorded: {e}");
                self.uploads.failed += 1;
            }
        }
    }

    // ── Read-only views ───────────────────────────────────────────────────────

    /// Per-stream chart data for the rendering layer.
    pub fn series(&self) -> Vec<SeriesView> {
        self.streams.series()
    }

    pub fn selected_stats(&self) -> Option<StreamStats> {
        self.selected
            .and_then(|id| self.streams.get(id))
            .map(StreamStats::of)
    }

    pub fn comparison(&self) -> Option<Comparison> {
        if self.comparison.is_empty() {
            return None;
        }
        let streams = self
            .comparison
            .iter()
            .filter_map(|id| self.streams.get(*id))
            .map(StreamStats::of)
            .collect();
        Some(Comparison { streams })
    }

    /// Report a rejected operation to the user and hand the error back.
    fn reject(&mut self, error: DashError, now: DateTime<Utc>) -> DashError {
        warn!("Rejected: {error}");
        if error.is_user_facing() {
            self.alerts.post(error.to_string(), AlertKind::Error, now);
        }
        error
    }
}
