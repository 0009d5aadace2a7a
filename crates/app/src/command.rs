use dash_core::{stream::StreamId, Message};
use thiserror::Error;

/// Command reference shown by the `help` command.
pub const HELP: &str = "\
commands:
  add                 add a stream (max 5)
  remove              remove the newest stream (min 1)
  start | stop        start or pause the simulation
  toggle              flip between running and paused
  rate <1-100>        ticks per second
  select <id>         statistics for one stream
  compare <id>...     statistics for several streams
  clear               clear the selection
  next | skip | tour  step through, close or restart the guided tour
  glossary [term]     show or hide the glossary, or define one term
  help                show or hide this text
  quit                exit (also Ctrl-C)";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}': '{value}' is not a valid number")]
    InvalidNumber { command: &'static str, value: String },
}

/// Parse one line typed by the user into a [`Message`].
///
/// Blank lines yield `Ok(None)`.  Commands are case-insensitive and
/// surrounding whitespace is ignored.
pub fn parse_command(line: &str) -> Result<Option<Message>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let msg = match head.to_ascii_lowercase().as_str() {
        "add" | "+" => Message::AddStream,
        "remove" | "rm" | "-" => Message::RemoveStream,
        "start" | "play" => Message::StartSimulation,
        "stop" | "pause" => Message::StopSimulation,
        "toggle" => Message::ToggleSimulation,
        "rate" => {
            let value = args.first().ok_or(CommandError::MissingArgument {
                command: "rate",
                argument: "a rate between 1 and 100",
            })?;
            Message::SetRate(number("rate", value)?)
        }
        "select" => {
            let value = args.first().ok_or(CommandError::MissingArgument {
                command: "select",
                argument: "a stream id",
            })?;
            Message::SelectStream(number("select", value)?)
        }
        "compare" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "compare",
                    argument: "one or more stream ids",
                });
            }
            let ids = args
                .iter()
                .map(|v| number::<StreamId>("compare", v))
                .collect::<Result<Vec<_>, _>>()?;
            Message::CompareStreams(ids)
        }
        "clear" => Message::ClearSelection,
        "next" => Message::TourNext,
        "skip" | "close" => Message::TourClose,
        "tour" => Message::TourReopen,
        "glossary" | "g" if args.is_empty() => Message::GlossaryToggle,
        "glossary" | "g" => Message::GlossaryLookup(args.join(" ")),
        "help" | "?" => Message::Help,
        "quit" | "exit" | "q" => Message::Shutdown,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(msg))
}

fn number<T: std::str::FromStr>(command: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        command,
        value: value.to_string(),
    })
}
