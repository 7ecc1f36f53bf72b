//! Content transformation: decoded text → payload bytes.
//!
//! | Step | Backend |
//! |---|---|
//! | **Read** | [`read_utf8`], strict UTF-8 |
//! | **Minify** (release runs only) | [`Minifier`], production: `minify-html` via [`html::HtmlMinifier`] |
//! | **Compress** | [`Compressor`], production: gzip via [`gzip::GzipCompressor`] |
//!
//! Whether the minifier exists is a build-time fact (the `minify` feature);
//! [`minifier_available`] is the capability probe consulted once per run.

pub mod backend;
pub mod gzip;
#[cfg(feature = "minify")]
pub mod html;

pub use backend::{Compressor, Minifier, MinifyOptions, TransformError, Unavailable};
pub use gzip::GzipCompressor;

use crate::config::EmitConfig;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Input not found: {0}")]
    NotFound(PathBuf),
    #[error("Input is not valid UTF-8: {0}")]
    Decode(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a file as UTF-8 text. Invalid UTF-8 is an error, never replaced.
pub fn read_utf8(path: &Path) -> Result<String, ReadError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    String::from_utf8(bytes).map_err(|_| ReadError::Decode(path.to_path_buf()))
}

/// The two services a transform needs, bundled for passing through the pool.
#[derive(Clone, Copy)]
pub struct Backends<'a> {
    pub minifier: &'a dyn Minifier,
    pub compressor: &'a dyn Compressor,
    pub minify_options: MinifyOptions,
}

/// Produce the payload for one resource: minify if enabled, then compress.
pub fn transform(
    raw_text: &str,
    config: &EmitConfig,
    backends: &Backends<'_>,
) -> Result<Vec<u8>, TransformError> {
    if config.minify_enabled {
        let minified = backends
            .minifier
            .minify(raw_text, &backends.minify_options)?;
        backends.compressor.compress(minified.as_bytes())
    } else {
        backends.compressor.compress(raw_text.as_bytes())
    }
}

/// True when an HTML minifier is compiled into this binary.
pub fn minifier_available() -> bool {
    cfg!(feature = "minify")
}

/// The production minifier, or [`Unavailable`] when none is compiled in.
pub fn default_minifier() -> Box<dyn Minifier> {
    #[cfg(feature = "minify")]
    {
        Box::new(html::HtmlMinifier::new())
    }
    #[cfg(not(feature = "minify"))]
    {
        Box::new(Unavailable)
    }
}
