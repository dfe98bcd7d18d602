//! Terminal plumbing shared by the HSA command line tools: help styling, logging, and JSON
//! output.

use std::io::{self, Write};

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};
use color_eyre::eyre;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default() | Effects::BOLD)
		.usage(AnsiColor::Green.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Cyan.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Logs to stderr; stdout is reserved for command output. An unparsable `level` falls back to
/// `info` with a warning.
pub fn init_tracing(level: &str) -> color_eyre::Result<()> {
	let (filter, rejected) = match EnvFilter::try_new(level) {
		Ok(filter) => (filter, None),
		Err(err) => (EnvFilter::new("info"), Some(err)),
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.try_init()
		.map_err(|err| eyre::eyre!("Failed to install the log subscriber: {err}"))?;

	if let Some(err) = rejected {
		tracing::warn!(level, error = %err, "Invalid log level. Using info.");
	}

	Ok(())
}

/// Pretty-printed JSON and a trailing newline.
pub fn write_json<W, T>(mut out: W, value: &T) -> color_eyre::Result<()>
where
	W: Write,
	T: ?Sized + Serialize,
{
	serde_json::to_writer_pretty(&mut out, value)?;
	writeln!(out)?;
	out.flush()?;

	Ok(())
}

pub fn print_json<T>(value: &T) -> color_eyre::Result<()>
where
	T: ?Sized + Serialize,
{
	write_json(io::stdout().lock(), value)
}
