use std::path::PathBuf;

use jsonbind::bind::{EncodeOptions, Result, Value, decode_plain, parse, to_string};
use tracing::debug;

use crate::cmd::emit_json;
use crate::cmd::input;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Decode and re-encode twice, reporting whether both encodings match.
///
/// Returns `false` when the second pass differs from the first.
pub fn run(args: Args) -> Result<bool> {
	let Args { path, json } = args;

	let doc = input::load(&path)?;
	let options = EncodeOptions::default();

	let first_tree: Value = decode_plain(&doc.tree)?;
	let first = to_string(&first_tree, &options)?;
	let second_tree: Value = decode_plain(&parse(&first)?)?;
	let second = to_string(&second_tree, &options)?;
	let stable = first == second;
	debug!("first pass {} bytes, second pass {} bytes", first.len(), second.len());

	if json {
		emit_json(&CheckJson {
			path: path.display().to_string(),
			compression: doc.compression.as_str(),
			stable,
			first_len: first.len(),
			second_len: second.len(),
		});
		return Ok(stable);
	}

	println!("path: {}", path.display());
	println!("compression: {}", doc.compression.as_str());
	println!("stable: {stable}");
	println!("first_len: {}", first.len());
	println!("second_len: {}", second.len());
	Ok(stable)
}

#[derive(serde::Serialize)]
struct CheckJson {
	path: String,
	compression: &'static str,
	stable: bool,
	first_len: usize,
	second_len: usize,
}
