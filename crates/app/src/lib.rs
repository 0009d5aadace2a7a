//! Event loop for `streamdash`.
//!
//! Owns the [`Dashboard`] and wires together all background tasks:
//! - Simulation clock driver (generation-tagged ticks)
//! - Terminal input (keys typed into the command prompt)
//! - Config file watcher (live reload on change)
//! - Storage uploads (outcomes reported back as messages)
//!
//! Every message is applied by this one task, so state is never mutated
//! concurrently.

pub mod command;
pub mod dashboard;
pub mod prompt;
mod tui;
mod view;

pub use command::{parse_command, CommandError, HELP};
pub use dashboard::{Dashboard, Effect};
pub use prompt::{Prompt, PromptAction};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use crossterm::event::{Event, EventStream};
use dash_config::{load as load_config, ConfigWatcher};
use dash_core::Message;
use dash_sim::{ClockHandle, Tick};
use futures::{Stream, StreamExt};
use std::future::Future;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui::Tui;

/// Frames closer together than this are coalesced while ticking.
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Channels feeding the event loop besides terminal input.
struct Sources {
    ticks: mpsc::Receiver<Tick>,
    reloads: mpsc::Receiver<()>,
    /// Handed to upload tasks so they can report back.
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the dashboard until the user quits or Ctrl-C is pressed.
pub async fn run(config_path: PathBuf) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        bail!("streamdash needs an interactive terminal; stdout is not a TTY");
    }

    let config = load_config(&config_path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        Default::default()
    });

    let mut dashboard = Dashboard::new(config_path.clone(), config, Utc::now());
    let (clock, ticks) = dash_sim::spawn_clock(dashboard.state().clock);
    let (tx, rx) = mpsc::channel::<Message>(64);
    let (_watcher, reloads) = ConfigWatcher::spawn(&config_path);

    info!(
        streams = dashboard.state().streams.len(),
        rate = dashboard.state().clock.rate(),
        "Dashboard running"
    );

    let mut tui = Tui::enter().context("cannot take over the terminal")?;
    let sources = Sources { ticks, reloads, tx, rx };

    let result = event_loop(
        &mut dashboard,
        &clock,
        sources,
        EventStream::new(),
        tokio::signal::ctrl_c(),
        |d, p| Ok(tui.draw(d, p)?),
    )
    .await;

    drop(tui);
    info!("Shutting down");
    result
}

// ── Event loop ────────────────────────────────────────────────────────────────

async fn event_loop<E, S, D>(
    dashboard: &mut Dashboard,
    clock: &ClockHandle,
    mut sources: Sources,
    mut events: E,
    shutdown: S,
    mut draw: D,
) -> Result<()>
where
    E: Stream<Item = std::io::Result<Event>> + Unpin,
    S: Future,
    D: FnMut(&Dashboard, &Prompt) -> Result<()>,
{
    // Created once so a signal arriving mid-update is not lost.
    tokio::pin!(shutdown);

    let mut prompt = Prompt::default();
    let mut last_frame = Instant::now();
    render(&mut draw, dashboard, &prompt, &mut last_frame)?;

    loop {
        let expiry = dashboard.next_alert_expiry();

        let message = tokio::select! {
            Some(tick) = sources.ticks.recv() => Message::Tick {
                generation: tick.generation,
                at: tick.at,
            },
            Some(msg) = sources.rx.recv() => msg,
            Some(()) = sources.reloads.recv() => Message::ConfigReloaded,
            Some(event) = events.next() => {
                let event = event.context("cannot read terminal input")?;
                match prompt.handle(&event) {
                    PromptAction::Send(msg) => msg,
                    PromptAction::Redraw => {
                        render(&mut draw, dashboard, &prompt, &mut last_frame)?;
                        continue;
                    }
                    PromptAction::Ignored => continue,
                }
            }
            _ = sleep_until(expiry) => Message::ExpireAlerts(Utc::now()),
            _ = &mut shutdown => Message::Shutdown,
        };

        let throttled = !message.is_user_action();
        for effect in dashboard.update(message, Utc::now()) {
            match effect {
                Effect::Render => {
                    if !throttled || last_frame.elapsed() >= MIN_FRAME_INTERVAL {
                        render(&mut draw, dashboard, &prompt, &mut last_frame)?;
                    }
                }
                Effect::ReconfigureClock(config) => clock.reconfigure(config),
                Effect::Upload { client, records } => {
                    client.spawn_upload(records, sources.tx.clone())
                }
                Effect::Quit => return Ok(()),
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn render<D>(
    draw: &mut D,
    dashboard: &Dashboard,
    prompt: &Prompt,
    last_frame: &mut Instant,
) -> Result<()>
where
    D: FnMut(&Dashboard, &Prompt) -> Result<()>,
{
    draw(dashboard, prompt)?;
    *last_frame = Instant::now();
    Ok(())
}

/// Sleep until `deadline`, or forever if there is none.
async fn sleep_until(deadline: Option<DateTime<Utc>>) {
    match deadline {
        Some(at) => {
            let wait = (at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use dash_config::DashConfig;
    use futures::stream;
    use tokio::sync::oneshot;

    fn dashboard() -> Dashboard {
        let mut cfg = DashConfig::default();
        cfg.simulation.autostart = false;
        cfg.simulation.seed = Some(9);
        cfg.tour.show_on_start = false;
        Dashboard::new(PathBuf::from("/nonexistent/streamdash.toml"), cfg, Utc::now())
    }

    /// Loop inputs plus the senders that keep their channels open.
    fn sources(d: &Dashboard) -> (ClockHandle, Sources, mpsc::Sender<()>) {
        let (clock, ticks) = dash_sim::spawn_clock(d.state().clock);
        let (tx, rx) = mpsc::channel(64);
        let (reload_tx, reloads) = mpsc::channel(1);
        (clock, Sources { ticks, reloads, tx, rx }, reload_tx)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> std::io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, modifiers)))
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_without_deadline_never_finishes() {
        let waited = tokio::time::timeout(Duration::from_secs(60), sleep_until(None)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn past_deadline_returns_immediately() {
        let past = Utc::now() - chrono::Duration::seconds(1);
        tokio::time::timeout(Duration::from_secs(1), sleep_until(Some(past)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn typed_commands_drive_the_dashboard() {
        let mut d = dashboard();
        let (clock, sources, _reload_tx) = sources(&d);

        let mut typed: Vec<_> = "add"
            .chars()
            .map(|c| key(KeyCode::Char(c), KeyModifiers::NONE))
            .collect();
        typed.push(key(KeyCode::Enter, KeyModifiers::NONE));
        typed.push(key(KeyCode::Char('c'), KeyModifiers::CONTROL));

        let mut frames = Vec::new();
        let result = event_loop(
            &mut d,
            &clock,
            sources,
            stream::iter(typed),
            std::future::pending::<()>(),
            |_, p| {
                frames.push(p.input().to_string());
                Ok(())
            },
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(d.state().streams.len(), 2);
        assert!(frames.iter().any(|f| f == "add"));
        assert_eq!(frames.last().map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn shutdown_signal_survives_busy_iterations() {
        let mut d = dashboard();
        let (clock, sources, _reload_tx) = sources(&d);
        let tx = sources.tx.clone();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            for _ in 0..3 {
                tx.send(Message::GlossaryToggle).await.unwrap();
                tokio::task::yield_now().await;
            }
            stop_tx.send(()).unwrap();
        });

        let finished = tokio::time::timeout(
            Duration::from_secs(5),
            event_loop(
                &mut d,
                &clock,
                sources,
                stream::pending::<std::io::Result<Event>>(),
                stop_rx,
                |_, _| Ok(()),
            ),
        )
        .await;

        assert!(matches!(finished, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn input_errors_end_the_loop() {
        let mut d = dashboard();
        let (clock, sources, _reload_tx) = sources(&d);
        let broken = stream::iter(vec![Err(std::io::Error::other("tty gone"))]);

        let result = event_loop(
            &mut d,
            &clock,
            sources,
            broken,
            std::future::pending::<()>(),
            |_, _| Ok(()),
        )
        .await;

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("tty gone"));
    }
}
