//! gzip compressor backed by `flate2`.
//!
//! The header is flate2's default: no file name, no comment, mtime 0. Output
//! is therefore a pure function of the input bytes and the level.

use super::backend::{Compressor, TransformError};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

pub struct GzipCompressor {
    level: Compression,
}

impl GzipCompressor {
    /// `level` is clamped to 0-9.
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self::new(9)
    }
}

impl Compressor for GzipCompressor {
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, TransformError> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2 + 32), self.level);
        encoder.write_all(bytes)?;
        Ok(encoder.finish()?)
    }
}
