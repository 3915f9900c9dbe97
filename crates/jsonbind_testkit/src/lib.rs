//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture as text with surrounding whitespace trimmed.
pub fn fixture_text(name: &str) -> String {
	let path = fixture_path(name);
	match std::fs::read_to_string(&path) {
		Ok(text) => text.trim().to_owned(),
		Err(err) => panic!("fixture {} unreadable: {err}", path.display()),
	}
}

/// Read a fixture and parse it as untyped JSON.
pub fn fixture_json(name: &str) -> serde_json::Value {
	match serde_json::from_str(&fixture_text(name)) {
		Ok(value) => value,
		Err(err) => panic!("fixture {name} is not JSON: {err}"),
	}
}
