//! Terminal output for extbuild.
//!
//! Status lines are a colored marker followed by the message. Failures and
//! warnings go to stderr so `extbuild plan -o json` stays parseable.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Prefix for a command line in `plan` output.
pub const ARROW: &str = "→";

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  /// A step that is about to run, or an item in a listing.
  Step,
  Done,
  Warning,
  Failed,
}

impl Status {
  fn marker(self) -> &'static str {
    match self {
      Status::Step => "•",
      Status::Done => "✓",
      Status::Warning => "⚠",
      Status::Failed => "✗",
    }
  }

  fn stream(self) -> Stream {
    match self {
      Status::Step | Status::Done => Stream::Stdout,
      Status::Warning | Status::Failed => Stream::Stderr,
    }
  }
}

/// Print one status line.
pub fn status(kind: Status, message: &str) {
  let stream = kind.stream();
  let marker = kind.marker();
  let line = match kind {
    Status::Step => format!("{} {}", marker.if_supports_color(stream, |s| s.blue()), message),
    Status::Done => format!("{} {}", marker.if_supports_color(stream, |s| s.green()), message),
    Status::Warning => format!(
      "{} {}",
      marker.if_supports_color(stream, |s| s.yellow()),
      message.if_supports_color(stream, |s| s.yellow())
    ),
    Status::Failed => format!(
      "{} {}",
      marker.if_supports_color(stream, |s| s.red()),
      message.if_supports_color(stream, |s| s.red())
    ),
  };

  match stream {
    Stream::Stderr => eprintln!("{}", line),
    _ => println!("{}", line),
  }
}

/// Indented `label: value` line under a status line.
pub fn detail(label: &str, value: impl std::fmt::Display) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

/// Elapsed build time: milliseconds below a second, then seconds, then minutes.
pub fn elapsed(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.as_millis()),
    1..=59 => format!("{:.1}s", duration.as_secs_f64()),
    secs => format!("{}m{:02}s", secs / 60, secs % 60),
  }
}

/// Render a program and its arguments as one shell-like line.
pub fn format_command(program: &str, args: &[String]) -> String {
  std::iter::once(program.to_string())
    .chain(args.iter().map(|arg| {
      if arg.is_empty() || arg.contains(' ') {
        format!("\"{}\"", arg)
      } else {
        arg.clone()
      }
    }))
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
