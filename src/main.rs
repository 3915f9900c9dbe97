#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "jsonbind", about = "JSON value-tree inspection and round-trip tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Re-encode a document through the dynamic binding path.
	Fmt(cmd::fmt::Args),
	/// Verify that a document re-encodes byte-stably.
	Check(cmd::check::Args),
	/// Print node statistics for a document.
	Info(cmd::info::Args),
}

fn main() {
	init_tracing();
	match run() {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(err) => {
			eprintln!("error: {err}");
			std::process::exit(1);
		}
	}
}

fn run() -> jsonbind::bind::Result<bool> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Fmt(args) => cmd::fmt::run(args).map(|()| true),
		Commands::Check(args) => cmd::check::run(args),
		Commands::Info(args) => cmd::info::run(args).map(|()| true),
	}
}

fn init_tracing() {
	let env_filter = EnvFilter::try_from_env("JSONBIND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}
