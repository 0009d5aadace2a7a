//! Simulated data streams and their fixed-length sample windows.
//!
//! Every stream owns exactly [`WINDOW_LEN`] samples, newest first.  A tick
//! prepends one sample at offset `0`, ages the survivors by one tick and
//! evicts the oldest, so the window never grows or shrinks.

use crate::error::{DashError, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::VecDeque;

/// Number of samples held by every stream window.
pub const WINDOW_LEN: usize = 20;
/// Upper bound on simultaneously active streams.
pub const MAX_STREAMS: usize = 5;
/// Lower bound on simultaneously active streams.
pub const MIN_STREAMS: usize = 1;
/// Half-width of the uniform noise added to every simulated value.
pub const NOISE_AMPLITUDE: f64 = 0.25;
/// Chart x-axis domain in tick offsets: `[-(N-1), 0]`.
pub const X_DOMAIN: (i32, i32) = (-(WINDOW_LEN as i32 - 1), 0);
/// Chart y-axis domain.
pub const Y_DOMAIN: (f64, f64) = (-3.0, 3.0);

pub type StreamId = u32;

/// One simulated measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Age in ticks relative to the newest sample (`0` = newest, always `<= 0`).
    pub offset: i32,
    pub value: f64,
    pub captured_at: DateTime<Utc>,
}

/// A single simulated time series.
#[derive(Debug, Clone)]
pub struct Stream {
    id: StreamId,
    color: String,
    window: VecDeque<Sample>,
}

impl Stream {
    /// Create a stream whose window is filled with zero-valued placeholders,
    /// back-dated at one-second intervals from `now`.
    pub fn new(id: StreamId, color: impl Into<String>, now: DateTime<Utc>) -> Self {
        let window = (0..WINDOW_LEN)
            .map(|age| Sample {
                offset: -(age as i32),
                value: 0.0,
                captured_at: now - Duration::seconds(age as i64),
            })
            .collect();

        Self {
            id,
            color: color.into(),
            window,
        }
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    /// Display color tag as `#rrggbb`.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Samples ordered newest (index 0) to oldest.
    pub fn window(&self) -> impl ExactSizeIterator<Item = &Sample> + DoubleEndedIterator {
        self.window.iter()
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.window.front()
    }

    /// Push `value` as the new offset-0 sample and evict the oldest one.
    pub fn push(&mut self, value: f64, now: DateTime<Utc>) {
        for sample in self.window.iter_mut() {
            sample.offset -= 1;
        }
        self.window.pop_back();
        self.window.push_front(Sample {
            offset: 0,
            value,
            captured_at: now,
        });
    }
}

/// Deterministic part of a stream's simulated value: a sine of wall-clock
/// seconds scaled by the stream's phase factor `id + 1`.
pub fn simulated_value(now: DateTime<Utc>, id: StreamId) -> f64 {
    let seconds = now.timestamp_millis() as f64 / 1000.0;
    seconds.sin() * f64::from(id + 1)
}

/// Generate a random `#rrggbb` color tag.
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..=0x00FF_FFFFu32))
}

/// Ordered set of active streams, bounded to `[MIN_STREAMS, MAX_STREAMS]`.
#[derive(Debug, Clone)]
pub struct StreamRegistry {
    streams: Vec<Stream>,
}

impl StreamRegistry {
    /// Registry seeded with `initial` streams (clamped to the allowed range).
    pub fn new<R: Rng>(initial: usize, now: DateTime<Utc>, rng: &mut R) -> Self {
        let mut registry = Self {
            streams: Vec::with_capacity(MAX_STREAMS),
        };
        for _ in 0..initial.clamp(MIN_STREAMS, MAX_STREAMS) {
            registry.push_new(now, rng);
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.streams.len() >= MAX_STREAMS
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter()
    }

    pub fn get(&self, id: StreamId) -> Option<&Stream> {
        self.streams.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StreamId) -> bool {
        self.get(id).is_some()
    }

    /// Add a stream with id = current count and a random color.
    pub fn add<R: Rng>(&mut self, now: DateTime<Utc>, rng: &mut R) -> Result<StreamId> {
        if self.is_full() {
            return Err(DashError::CapacityExceeded { max: MAX_STREAMS });
        }
        Ok(self.push_new(now, rng))
    }

    /// Remove the most recently added stream.
    pub fn remove_last(&mut self) -> Result<StreamId> {
        if self.streams.len() <= MIN_STREAMS {
            return Err(DashError::MinimumStreamsViolation { min: MIN_STREAMS });
        }
        self.streams
            .pop()
            .map(|s| s.id)
            .ok_or(DashError::MinimumStreamsViolation { min: MIN_STREAMS })
    }

    /// Advance every stream by one tick.  Returns the number of streams updated.
    pub fn advance<R: Rng>(&mut self, now: DateTime<Utc>, rng: &mut R) -> usize {
        for stream in &mut self.streams {
            let noise = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
            stream.push(simulated_value(now, stream.id) + noise, now);
        }
        self.streams.len()
    }

    /// Read-only chart view of every stream, in registry order.
    pub fn series(&self) -> Vec<SeriesView> {
        self.streams.iter().map(SeriesView::from_stream).collect()
    }

    fn push_new<R: Rng>(&mut self, now: DateTime<Utc>, rng: &mut R) -> StreamId {
        let id = self.streams.len() as StreamId;
        self.streams.push(Stream::new(id, random_color(rng), now));
        id
    }
}

/// One `(offset, value, timestamp, color)` tuple handed to the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub offset: i32,
    pub value: f64,
    pub captured_at: DateTime<Utc>,
    pub color: String,
}

/// Snapshot of one stream's window for rendering, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub id: StreamId,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

impl SeriesView {
    fn from_stream(stream: &Stream) -> Self {
        let points = stream
            .window()
            .map(|s| ChartPoint {
                offset: s.offset,
                value: s.value,
                captured_at: s.captured_at,
                color: stream.color.clone(),
            })
            .collect();

        Self {
            id: stream.id,
            color: stream.color.clone(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn offsets(stream: &Stream) -> Vec<i32> {
        stream.window().map(|s| s.offset).collect()
    }

    #[test]
    fn new_stream_has_backdated_placeholders() {
        let stream = Stream::new(0, "#ff0000", t0());
        assert_eq!(stream.window().len(), WINDOW_LEN);
        assert!(stream.window().all(|s| s.value == 0.0));

        let stamps: Vec<_> = stream.window().map(|s| s.captured_at).collect();
        assert_eq!(stamps[0], t0());
        assert_eq!(stamps[WINDOW_LEN - 1], t0() - Duration::seconds(19));
        assert_eq!(offsets(&stream), (0..WINDOW_LEN as i32).map(|i| -i).collect::<Vec<_>>());
    }

    #[test]
    fn push_keeps_length_and_rebases_offsets() {
        let mut stream = Stream::new(0, "#00ff00", t0());
        for i in 1..=45 {
            stream.push(i as f64, t0() + Duration::milliseconds(i * 100));
            assert_eq!(stream.window().len(), WINDOW_LEN);
            assert_eq!(offsets(&stream), (0..WINDOW_LEN as i32).map(|k| -k).collect::<Vec<_>>());
        }
        assert_eq!(stream.latest().map(|s| s.value), Some(45.0));
        assert_eq!(stream.window().last().map(|s| s.value), Some(26.0));
    }

    #[test]
    fn registry_capacity_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut registry = StreamRegistry::new(1, t0(), &mut rng);

        for k in 1..MAX_STREAMS {
            assert_eq!(registry.len(), k);
            assert_eq!(registry.add(t0(), &mut rng).unwrap(), k as StreamId);
        }
        assert!(matches!(
            registry.add(t0(), &mut rng),
            Err(DashError::CapacityExceeded { max: MAX_STREAMS })
        ));
        assert_eq!(registry.len(), MAX_STREAMS);

        for k in (MIN_STREAMS + 1..=MAX_STREAMS).rev() {
            assert_eq!(registry.remove_last().unwrap(), (k - 1) as StreamId);
        }
        assert!(matches!(
            registry.remove_last(),
            Err(DashError::MinimumStreamsViolation { min: 1 })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn initial_stream_count_is_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(StreamRegistry::new(0, t0(), &mut rng).len(), MIN_STREAMS);
        assert_eq!(StreamRegistry::new(9, t0(), &mut rng).len(), MAX_STREAMS);
    }

    #[test]
    fn colors_are_hex_tags() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let color = random_color(&mut rng);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(u32::from_str_radix(&color[1..], 16).is_ok());
        }
    }

    #[test]
    fn advanced_values_stay_within_phase_and_noise_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut registry = StreamRegistry::new(3, t0(), &mut rng);

        let now = t0() + Duration::milliseconds(250);
        assert_eq!(registry.advance(now, &mut rng), 3);

        for stream in registry.iter() {
            let latest = stream.latest().unwrap();
            let expected = simulated_value(now, stream.id());
            assert!((latest.value - expected).abs() <= NOISE_AMPLITUDE);
            assert_eq!(latest.captured_at, now);
        }
    }

    #[test]
    fn same_seed_gives_same_output() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            let mut registry = StreamRegistry::new(2, t0(), &mut rng);
            registry.advance(t0(), &mut rng);
            registry.series()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn series_exposes_color_on_every_point() {
        let mut rng = StdRng::seed_from_u64(5);
        let registry = StreamRegistry::new(2, t0(), &mut rng);
        let series = registry.series();
        assert_eq!(series.len(), 2);
        for view in &series {
            assert_eq!(view.points.len(), WINDOW_LEN);
            assert!(view.points.iter().all(|p| p.color == view.color));
            assert_eq!(view.points.last().map(|p| p.offset), Some(X_DOMAIN.0));
        }
    }
}
