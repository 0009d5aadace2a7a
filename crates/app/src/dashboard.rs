use chrono::{DateTime, Utc};
use dash_config::{load as load_config, DashConfig};
use dash_core::{glossary, AlertKind, AppState, Message, SimulationClock};
use dash_renderer::DashLayout;
use dash_storage::{latest_records, SampleRecord, StorageClient};
use dash_theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Side effects requested by [`Dashboard::update`], carried out by the event loop.
#[derive(Debug)]
pub enum Effect {
    /// Redraw the frame.
    Render,
    /// Hand the new clock configuration to the tick driver.
    ReconfigureClock(SimulationClock),
    /// Fire-and-forget upload of the newest samples.
    Upload {
        client: StorageClient,
        records: Vec<SampleRecord>,
    },
    /// Leave the event loop.
    Quit,
}

/// Owner of all mutable dashboard state.
///
/// Only the event loop holds a `Dashboard`, so every mutation (user
/// command, tick, reload, upload outcome) runs to completion before the
/// next one starts.
#[derive(Debug)]
pub struct Dashboard {
    state: AppState,
    config: DashConfig,
    config_path: PathBuf,
    theme: Theme,
    layout: DashLayout,
    storage: Option<StorageClient>,
    help_visible: bool,
}

impl Dashboard {
    pub fn new(config_path: PathBuf, config: DashConfig, now: DateTime<Utc>) -> Self {
        let state = AppState::new(config.state_options(), now);
        let theme = Theme::from_config(&config.theme);
        let layout = DashLayout::from_config(&config.layout);
        let storage = build_storage(&config);

        Self {
            state,
            config,
            config_path,
            theme,
            layout,
            storage,
            help_visible: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    /// Earliest moment an alert should be swept.
    pub fn next_alert_expiry(&self) -> Option<DateTime<Utc>> {
        self.state.alerts.next_expiry()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// `true` while the command reference is open.
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Draw the configured sections into `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        self.layout.render(&self.state, &self.theme, area, buf);
    }

    // ── Update ────────────────────────────────────────────────────────────────

    pub fn update(&mut self, message: Message, now: DateTime<Utc>) -> Vec<Effect> {
        match message {
            // ── Streams ──────────────────────────────────────────────────────
            Message::AddStream => {
                // Rejections are already reported through the alert queue.
                let _ = self.state.add_stream(now);
                vec![Effect::Render]
            }
            Message::RemoveStream => {
                let _ = self.state.remove_stream(now);
                vec![Effect::Render]
            }
            Message::SelectStream(id) => {
                let _ = self.state.select_stream(id);
                vec![Effect::Render]
            }
            Message::CompareStreams(ids) => {
                let _ = self.state.select_streams_for_comparison(&ids);
                vec![Effect::Render]
            }
            Message::ClearSelection => {
                self.state.clear_selection();
                vec![Effect::Render]
            }

            // ── Clock ────────────────────────────────────────────────────────
            Message::StartSimulation => {
                let changed = self.state.clock.start();
                self.clock_effects(changed)
            }
            Message::StopSimulation => {
                let changed = self.state.clock.stop();
                self.clock_effects(changed)
            }
            Message::ToggleSimulation => {
                self.state.clock.toggle();
                self.clock_effects(true)
            }
            Message::SetRate(rate) => {
                let changed = self.state.clock.set_rate(rate);
                self.clock_effects(changed)
            }
            Message::Tick { generation, at } => self.handle_tick(generation, at),

            // ── Tour / glossary ──────────────────────────────────────────────
            Message::TourNext => {
                self.state.tour.next();
                vec![Effect::Render]
            }
            Message::TourClose => {
                self.state.tour.close();
                vec![Effect::Render]
            }
            Message::TourReopen => {
                self.state.tour.reopen();
                vec![Effect::Render]
            }
            Message::GlossaryToggle => {
                self.state.glossary_visible = !self.state.glossary_visible;
                vec![Effect::Render]
            }
            Message::GlossaryLookup(term) => {
                let text = match glossary::lookup(&term) {
                    Some(entry) => format!("{}: {}", entry.term, entry.definition),
                    None => format!("no glossary entry for '{term}'"),
                };
                self.state.post_alert(text, AlertKind::Info, now);
                vec![Effect::Render]
            }

            // ── Internal ─────────────────────────────────────────────────────
            Message::ExpireAlerts(at) => {
                if self.state.expire_alerts(at) > 0 {
                    vec![Effect::Render]
                } else {
                    Vec::new()
                }
            }
            Message::ConfigReloaded => self.reload(now),
            Message::UploadCompleted { transaction_id } => {
                self.state.record_upload(Ok(transaction_id));
                Vec::new()
            }
            Message::UploadFailed(reason) => {
                self.state.record_upload(Err(reason));
                Vec::new()
            }
            Message::InvalidCommand(reason) => {
                self.state.post_alert(reason, AlertKind::Info, now);
                vec![Effect::Render]
            }
            Message::Help => {
                self.help_visible = !self.help_visible;
                vec![Effect::Render]
            }
            Message::Shutdown => vec![Effect::Quit],
        }
    }

    fn clock_effects(&self, changed: bool) -> Vec<Effect> {
        if changed {
            vec![Effect::ReconfigureClock(self.state.clock), Effect::Render]
        } else {
            vec![Effect::Render]
        }
    }

    fn handle_tick(&mut self, generation: u64, at: DateTime<Utc>) -> Vec<Effect> {
        if !self.state.apply_tick(generation, at) {
            return Vec::new();
        }

        let mut effects = vec![Effect::Render];
        if let Some(client) = &self.storage {
            let every = self.config.storage.upload_every_ticks.max(1);
            if self.state.ticks % every == 0 {
                effects.push(Effect::Upload {
                    client: client.clone(),
                    records: latest_records(&self.state),
                });
            }
        }
        effects
    }

    /// Re-read the config file and apply what changed.  On failure the
    /// previous configuration stays in force.
    fn reload(&mut self, now: DateTime<Utc>) -> Vec<Effect> {
        let config = match load_config(&self.config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                self.state
                    .post_alert(format!("Config reload failed: {e}"), AlertKind::Error, now);
                return vec![Effect::Render];
            }
        };

        if config == self.config {
            debug!("Config unchanged after reload");
            return Vec::new();
        }

        info!("Config reloaded");
        let mut effects = Vec::new();

        if self.state.clock.set_rate(config.state_options().rate) {
            effects.push(Effect::ReconfigureClock(self.state.clock));
        }
        self.theme = Theme::from_config(&config.theme);
        self.layout = DashLayout::from_config(&config.layout);
        if config.storage != self.config.storage {
            self.storage = build_storage(&config);
        }
        self.config = config;

        self.state.post_alert("Configuration reloaded", AlertKind::Info, now);
        effects.push(Effect::Render);
        effects
    }
}

fn build_storage(config: &DashConfig) -> Option<StorageClient> {
    if !config.storage.enabled {
        return None;
    }
    match StorageClient::new(&config.storage) {
        Ok(client) => {
            info!(endpoint = client.endpoint(), "Sample upload enabled");
            Some(client)
        }
        Err(e) => {
            warn!("Sample upload disabled: {e}");
            None
        }
    }
}
