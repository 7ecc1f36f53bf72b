//! Minifier and compressor traits and shared types.
//!
//! The content transformer only talks to these two traits. Production
//! implementations live in [`super::html`] (behind the `minify` feature) and
//! [`super::gzip`]; tests swap in the recording mocks below.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Minify error: {0}")]
    Minify(String),
    #[error("Compression failed: {0}")]
    Compress(#[from] std::io::Error),
}

/// What the HTML minifier should touch besides markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
    pub minify_css: bool,
    pub minify_js: bool,
    pub keep_comments: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            minify_css: true,
            minify_js: true,
            keep_comments: false,
        }
    }
}

/// HTML-aware minifier.
///
/// Implementations must be `Sync`: files are transformed on a rayon pool.
pub trait Minifier: Sync {
    /// Minify a document. Rejecting the input is a [`TransformError::Minify`].
    fn minify(&self, html: &str, options: &MinifyOptions) -> Result<String, TransformError>;
}

/// Byte compressor producing a container a standard decoder can read.
pub trait Compressor: Sync {
    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>, TransformError>;
}

/// Stand-in used when no minifier is compiled in.
///
/// Never reached in a correct run: `EmitConfig::minify_enabled` is false
/// whenever this is the active minifier.
pub struct Unavailable;

impl Minifier for Unavailable {
    fn minify(&self, _html: &str, _options: &MinifyOptions) -> Result<String, TransformError> {
        Err(TransformError::Minify(
            "no HTML minifier compiled in (build with the `minify` feature)".to_string(),
        ))
    }
}
