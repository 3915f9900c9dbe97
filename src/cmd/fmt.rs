use std::path::PathBuf;

use jsonbind::bind::{EncodeOptions, Result, Value, decode_plain, to_string};

use crate::cmd::input;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub pretty: bool,
	#[arg(long, conflicts_with = "pretty")]
	pub compact: bool,
}

/// Decode a document into the dynamic tree and print its re-encoding.
pub fn run(args: Args) -> Result<()> {
	let Args { path, pretty, compact } = args;

	let doc = input::load(&path)?;
	let tree: Value = decode_plain(&doc.tree)?;
	let options = if pretty && !compact {
		EncodeOptions::pretty()
	} else {
		EncodeOptions::default()
	};
	println!("{}", to_string(&tree, &options)?);
	Ok(())
}
