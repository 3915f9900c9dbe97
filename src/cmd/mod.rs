/// Round-trip stability check command.
pub mod check;
/// Re-encode command.
pub mod fmt;
/// Document statistics command.
pub mod info;
/// Input loading with compression detection.
pub mod input;

/// Print a serializable payload as pretty JSON.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: {err}"),
	}
}
