//! Tool configuration.
//!
//! Two layers of settings feed a run:
//!
//! - [`ToolConfig`], loaded from an optional `resgen.toml` passed with
//!   `--config`. It controls naming, minifier options, compression level, the
//!   generated file names and worker count. Stock defaults reproduce the
//!   classic `res.h` / `res.cpp` output.
//! - [`EmitConfig`], built once from the command line (debug flag, output
//!   directory) and the minifier capability probe.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [naming]
//! strip_leading = "res"          # characters trimmed from the left of a path
//! strip_trailing = "index.html"  # characters trimmed from the right
//!
//! [minify]
//! minify_css = true              # minify <style> blocks
//! minify_js = true               # minify <script> blocks
//! keep_comments = false
//!
//! [compression]
//! level = 9                      # gzip level 0-9
//!
//! [output]
//! header = "res.h"
//! source = "res.cpp"
//! namespace = "res"
//! dedupe = false                 # share storage between identical payloads
//!
//! [processing]
//! max_processes = 4              # omit for one worker per core
//! ```
//!
//! Config files are sparse: user values are merged over the stock defaults
//! key by key. Unknown keys are rejected to catch typos early.

use crate::transform::MinifyOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings loaded from `resgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub naming: NamingConfig,
    pub minify: MinifyConfig,
    pub compression: CompressionConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression.level > 9 {
            return Err(ConfigError::Validation(
                "compression.level must be 0-9".into(),
            ));
        }
        for (key, value) in [
            ("output.header", &self.output.header),
            ("output.source", &self.output.source),
        ] {
            if !is_plain_file_name(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain file name, got {value:?}"
                )));
            }
        }
        if self.output.header == self.output.source {
            return Err(ConfigError::Validation(
                "output.header and output.source must differ".into(),
            ));
        }
        if !is_cpp_namespace(&self.output.namespace) {
            return Err(ConfigError::Validation(format!(
                "output.namespace is not a C++ namespace: {:?}",
                self.output.namespace
            )));
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '"'])
}

/// `res`, `app::res` and `_gen` are fine; `2res`, `a::` and `` are not.
fn is_cpp_namespace(ns: &str) -> bool {
    ns.split("::").all(|segment| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Character sets trimmed from input paths to form logical names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub strip_leading: String,
    pub strip_trailing: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            strip_leading: "res".to_string(),
            strip_trailing: "index.html".to_string(),
        }
    }
}

/// Options handed to the HTML minifier when minification is enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyConfig {
    pub minify_css: bool,
    pub minify_js: bool,
    pub keep_comments: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            minify_css: true,
            minify_js: true,
            keep_comments: false,
        }
    }
}

impl MinifyConfig {
    pub fn options(&self) -> MinifyOptions {
        MinifyOptions {
            minify_css: self.minify_css,
            minify_js: self.minify_js,
            keep_comments: self.keep_comments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    /// gzip compression level, 0 (store) to 9 (best).
    pub level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self { level: 9 }
    }
}

/// Names and shape of the generated artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Declarations file name, also used in the definitions' `#include`.
    pub header: String,
    /// Definitions file name.
    pub source: String,
    /// C++ namespace holding `names` and `contents`.
    pub namespace: String,
    /// Store byte-identical payloads once and point every slot at it.
    pub dedupe: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: "res.h".to_string(),
            source: "res.cpp".to_string(),
            namespace: "res".to_string(),
            dedupe: false,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of files transformed in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Per-run settings derived from the command line.
///
/// `minify_enabled` is decided here, once, and never re-checked per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    pub debug: bool,
    pub minify_enabled: bool,
    pub output_dir: PathBuf,
}

impl EmitConfig {
    pub fn new(debug: bool, output_dir: PathBuf, minifier_available: bool) -> Self {
        Self {
            debug,
            minify_enabled: !debug && minifier_available,
            output_dir,
        }
    }
}

/// Parse the DEBUG argument: an integer of any magnitude, zero meaning release.
///
/// Accepts an optional sign and `_` between digits (`-0`, `+1`, `1_000`).
/// The value is never materialised, so it cannot overflow.
pub fn parse_debug_flag(arg: &str) -> Result<bool, String> {
    let trimmed = arg.trim();
    let digits = trimmed
        .strip_prefix(['+', '-'])
        .unwrap_or(trimmed);
    let well_formed = digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.ends_with(|c: char| c.is_ascii_digit())
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !well_formed {
        return Err(format!("{arg:?} is not an integer"));
    }
    Ok(digits.chars().any(|c| matches!(c, '1'..='9')))
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ToolConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the tool config. `None` yields the validated stock defaults.
///
/// An explicitly given path must exist.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `resgen.toml`.
///
/// Printed by `resgen --print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# resgen configuration
# =====================
# Every key is optional; omitted keys keep the values shown here.

[naming]
# Characters trimmed from the LEFT of each input path. This is a set of
# characters, not a prefix: "res" strips any leading run of r, e and s.
strip_leading = "res"
# Characters trimmed from the RIGHT of each input path, also a set:
# "index.html" strips any trailing run of i, n, d, e, x, ., h, t, m and l.
strip_trailing = "index.html"

[minify]
# Only used when the debug argument is 0 and the minifier is compiled in.
minify_css = true
minify_js = true
keep_comments = false

[compression]
# gzip level, 0 (store only) to 9 (smallest output).
level = 9

[output]
# Declarations file: resource names and the extern payload table.
header = "res.h"
# Definitions file: the payload bytes.
source = "res.cpp"
# Namespace holding `names` and `contents`. Nested namespaces use "a::b".
namespace = "res"
# Store byte-identical payloads once and point every matching slot at them.
dedupe = false

[processing]
# Maximum parallel workers. Omit for one per CPU core.
# max_processes = 4
"##
}
