use std::collections::BTreeMap;
use std::path::PathBuf;

use jsonbind::bind::{Result, TYPE_TAG, Value};

use crate::cmd::emit_json;
use crate::cmd::input;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print node statistics for one document.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let doc = input::load(&path)?;
	let mut stats = TreeStats::default();
	stats.visit(&doc.tree, 1);

	if json {
		emit_json(&InfoJson {
			path: path.display().to_string(),
			compression: doc.compression.as_str(),
			bytes: doc.text_len,
			nodes: stats.nodes(),
			max_depth: stats.max_depth,
			kinds: stats.kinds.clone(),
			type_tags: stats.tag_count(),
			tag_names: stats.tags.keys().cloned().collect(),
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", doc.compression.as_str());
	println!("bytes: {}", doc.text_len);
	println!("nodes: {}", stats.nodes());
	println!("max_depth: {}", stats.max_depth);
	println!("kinds:");
	for (kind, count) in &stats.kinds {
		println!("  {kind}: {count}");
	}
	println!("type_tags: {}", stats.tag_count());
	for (name, count) in &stats.tags {
		println!("  {name}: {count}");
	}

	Ok(())
}

#[derive(Debug, Default)]
struct TreeStats {
	kinds: BTreeMap<&'static str, usize>,
	tags: BTreeMap<String, usize>,
	max_depth: usize,
}

impl TreeStats {
	fn visit(&mut self, node: &Value, depth: usize) {
		self.max_depth = self.max_depth.max(depth);
		*self.kinds.entry(node.kind_name()).or_default() += 1;
		match node {
			Value::Array(items) => {
				for item in items {
					self.visit(item, depth + 1);
				}
			}
			Value::Map(map) => {
				if let Some(name) = map.get_str(TYPE_TAG) {
					*self.tags.entry(name.to_owned()).or_default() += 1;
				}
				for (_, item) in map.iter() {
					self.visit(item, depth + 1);
				}
			}
			_ => {}
		}
	}

	fn nodes(&self) -> usize {
		self.kinds.values().sum()
	}

	fn tag_count(&self) -> usize {
		self.tags.values().sum()
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	bytes: usize,
	nodes: usize,
	max_depth: usize,
	kinds: BTreeMap<&'static str, usize>,
	type_tags: usize,
	tag_names: Vec<String>,
}
