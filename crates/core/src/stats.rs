use crate::stream::{Stream, StreamId};

/// Summary statistics over one stream's current window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamStats {
    pub id: StreamId,
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl StreamStats {
    #[must_use]
    pub fn of(stream: &Stream) -> Self {
        let values: Vec<f64> = stream.window().map(|s| s.value).collect();
        let n = values.len().max(1) as f64;

        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            id: stream.id(),
            latest: values.first().copied().unwrap_or(0.0),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Side-by-side statistics for the streams selected for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub streams: Vec<StreamStats>,
}

impl Comparison {
    /// Difference between the largest and smallest mean among the compared streams.
    pub fn mean_spread(&self) -> f64 {
        let means = self.streams.iter().map(|s| s.mean);
        let hi = means.clone().fold(f64::NEG_INFINITY, f64::max);
        let lo = means.fold(f64::INFINITY, f64::min);
        if self.streams.is_empty() {
            0.0
        } else {
            hi - lo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn stats_over_window() {
        let now = Utc.timestamp_millis_opt(0).unwrap();
        let mut stream = Stream::new(2, "#123456", now);
        for v in [1.0, 2.0, 3.0, 4.0] {
            stream.push(v, now);
        }

        let stats = StreamStats::of(&stream);
        assert_eq!(stats.id, 2);
        assert_eq!(stats.latest, 4.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!(stats.std_dev > 0.0);
    }

    #[test]
    fn spread_of_means() {
        let stat = |id, mean| StreamStats {
            id,
            latest: 0.0,
            min: 0.0,
            max: 0.0,
            mean,
            std_dev: 0.0,
        };
        let cmp = Comparison {
            streams: vec![stat(0, -1.0), stat(1, 0.5), stat(2, 2.0)],
        };
        assert!((cmp.mean_spread() - 3.0).abs() < 1e-12);
        assert_eq!(Comparison { streams: vec![] }.mean_spread(), 0.0);
    }
}
