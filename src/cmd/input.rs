use std::io::Read;
use std::path::Path;

use jsonbind::bind::{BindError, Result, Value, parse_slice};
use tracing::debug;

const MAX_DECOMPRESSED_BYTES: usize = 256 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Plain JSON text.
	None,
	/// zstd-compressed JSON text.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Parsed input document.
pub struct Document {
	/// Detected compression.
	pub compression: Compression,
	/// Decompressed text length in bytes.
	pub text_len: usize,
	/// Parsed value tree.
	pub tree: Value,
}

/// Read `path` (`-` for stdin), decompress when needed and parse.
pub fn load(path: &Path) -> Result<Document> {
	let raw = if path.as_os_str() == "-" {
		let mut buf = Vec::new();
		std::io::stdin().read_to_end(&mut buf)?;
		buf
	} else {
		std::fs::read(path)?
	};

	let (compression, bytes) = decode_bytes(raw)?;
	debug!("loaded {} ({} bytes, {})", path.display(), bytes.len(), compression.as_str());
	Ok(Document {
		compression,
		text_len: bytes.len(),
		tree: parse_slice(&bytes)?,
	})
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let limit = MAX_DECOMPRESSED_BYTES as u64 + 1;
	let mut out = Vec::new();
	zstd::stream::read::Decoder::new(raw)?.take(limit).read_to_end(&mut out)?;
	if out.len() > MAX_DECOMPRESSED_BYTES {
		return Err(BindError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
	}
	Ok(out)
}
