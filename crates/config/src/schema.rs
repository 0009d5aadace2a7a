use dash_core::{
    clock::{DEFAULT_RATE, MAX_RATE, MIN_RATE},
    state::StateOptions,
    stream::{MAX_STREAMS, MIN_STREAMS},
};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `streamdash.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashConfig {
    /// Simulation clock and stream startup settings.
    pub simulation: SimulationConfig,
    /// Optional sample upload endpoint.
    pub storage: StorageConfig,
    /// Guided tour behaviour.
    pub tour: TourConfig,
    /// Which sections are rendered, top to bottom.
    pub layout: LayoutConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl DashConfig {
    /// Startup options for the core state, with out-of-range values clamped.
    pub fn state_options(&self) -> StateOptions {
        StateOptions {
            initial_streams: self.simulation.initial_streams.clamp(MIN_STREAMS, MAX_STREAMS),
            rate: self.simulation.rate.clamp(MIN_RATE, MAX_RATE),
            autostart: self.simulation.autostart,
            show_tour: self.tour.show_on_start,
            seed: self.simulation.seed,
        }
    }
}

/// `[simulation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks per second, between 1 and 100.
    pub rate: u32,
    /// Start ticking immediately on launch.
    pub autostart: bool,
    /// Streams created at startup, between 1 and 5.
    pub initial_streams: usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            autostart: true,
            initial_streams: MIN_STREAMS,
            seed: None,
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub enabled: bool,
    /// URL receiving `POST`ed samples.
    pub endpoint: String,
    /// Upload the newest samples once every this many ticks.
    pub upload_every_ticks: u64,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:3000/api/samples".to_string(),
            upload_every_ticks: 10,
            timeout_ms: 2_000,
        }
    }
}

/// `[tour]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub show_on_start: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self { show_on_start: true }
    }
}

/// A renderable block of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Status,
    Alerts,
    Chart,
    Stats,
    Tour,
    Glossary,
}

/// `[layout]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sections: Vec<Section>,
    /// Show the newest sample's capture time next to each chart row.
    pub show_timestamps: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                Section::Alerts,
                Section::Status,
                Section::Chart,
                Section::Stats,
                Section::Tour,
                Section::Glossary,
            ],
            show_timestamps: false,
        }
    }
}

/// `[theme]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Primary text color (hex, e.g. `"#cdd6f4"`).
    pub foreground: String,
    /// Accent / highlight color.
    pub accent: String,
    /// Error alert color.
    pub error: String,
    /// Info alert color.
    pub info: String,
    /// Dimmed text (axes, placeholders).
    pub muted: String,
    /// Draw with the colors above.  `false` uses the terminal's defaults.
    pub color: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            foreground: "#cdd6f4".to_string(), // Catppuccin Mocha: text
            accent:     "#cba6f7".to_string(), // Catppuccin Mocha: mauve
            error:      "#f38ba8".to_string(), // Catppuccin Mocha: red
            info:       "#89b4fa".to_string(), // Catppuccin Mocha: blue
            muted:      "#6c7086".to_string(), // Catppuccin Mocha: overlay0
            color:      true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: DashConfig = toml::from_str("[simulation]\nrate = 50\n").unwrap();
        assert_eq!(cfg.simulation.rate, 50);
        assert!(cfg.simulation.autostart);
        assert_eq!(cfg.layout, LayoutConfig::default());
        assert_eq!(cfg.storage.upload_every_ticks, 10);
    }

    #[test]
    fn sections_parse_lowercase() {
        let cfg: DashConfig =
            toml::from_str("[layout]\nsections = [\"chart\", \"alerts\"]\n").unwrap();
        assert_eq!(cfg.layout.sections, vec![Section::Chart, Section::Alerts]);
    }

    #[test]
    fn state_options_are_clamped() {
        let cfg: DashConfig =
            toml::from_str("[simulation]\nrate = 0\ninitial_streams = 12\n").unwrap();
        let opts = cfg.state_options();
        assert_eq!(opts.rate, 1);
        assert_eq!(opts.initial_streams, 5);
    }
}
