pub mod alert;
pub mod clock;
pub mod error;
pub mod event;
pub mod glossary;
pub mod state;
pub mod stats;
pub mod stream;
pub mod tour;

pub use alert::{Alert, AlertKind, AlertQueue};
pub use clock::SimulationClock;
pub use error::{DashError, Result};
pub use event::Message;
pub use state::AppState;
pub use stream::{ChartPoint, Sample, SeriesView, Stream, StreamId, StreamRegistry};
pub use tour::TourState;
