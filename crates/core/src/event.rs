use crate::stream::StreamId;
use chrono::{DateTime, Utc};

/// All messages (events) that can flow through the dashboard event loop.
///
/// Sources:
/// - Command prompt (keyboard) → user actions
/// - Simulation clock driver → `Tick`
/// - Alert expiry timer      → `ExpireAlerts`
/// - Config watcher task     → `ConfigReloaded`
/// - Storage upload tasks    → `Upload*`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ── Streams ───────────────────────────────────────────────────────────────
    /// Add one stream (rejected at capacity).
    AddStream,
    /// Remove the most recently added stream (rejected when only one remains).
    RemoveStream,
    /// Select one stream for the statistics view.
    SelectStream(StreamId),
    /// Select several streams for side-by-side comparison.
    CompareStreams(Vec<StreamId>),
    /// Clear both selections.
    ClearSelection,

    // ── Simulation clock ──────────────────────────────────────────────────────
    StartSimulation,
    StopSimulation,
    ToggleSimulation,
    /// New rate in ticks per second (clamped to `[1, 100]`).
    SetRate(u32),
    /// Timer fired.  Carries the clock generation the driver was configured with.
    Tick { generation: u64, at: DateTime<Utc> },

    // ── Tour / glossary ───────────────────────────────────────────────────────
    TourNext,
    TourClose,
    TourReopen,
    GlossaryToggle,
    /// Show the definition of one glossary term as an info alert.
    GlossaryLookup(String),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Sweep alerts that have outlived their TTL.
    ExpireAlerts(DateTime<Utc>),
    /// Config file changed on disk, triggers a live reload.
    ConfigReloaded,
    /// Storage endpoint accepted a sample.
    UploadCompleted { transaction_id: String },
    /// Storage upload failed; the loop keeps running.
    UploadFailed(String),
    /// A command line could not be parsed; carries the reason shown to the user.
    InvalidCommand(String),
    /// Show or hide the command reference.
    Help,
    /// Graceful shutdown requested.
    Shutdown,
}

impl Message {
    /// `true` for messages triggered directly by the user.
    pub fn is_user_action(&self) -> bool {
        !matches!(
            self,
            Self::Tick { .. }
                | Self::ExpireAlerts(_)
                | Self::ConfigReloaded
                | Self::UploadCompleted { .. }
                | Self::UploadFailed(_)
        )
    }
}
