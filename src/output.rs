//! CLI output formatting for a run.
//!
//! # Output Format
//!
//! ```text
//! Resources (minified)
//! 001 "/"
//!     Source: res/index.html
//!     2048 → 611 bytes
//! 002 "/about/"
//!     Source: res/about/index.html
//!     1730 → 540 bytes
//!
//! Wrote gen/res.h, gen/res.cpp (2 resources, 1151 bytes of payload)
//! ```
//!
//! Sizes are the source text as read and the final payload. Each stage has a
//! pure `format_*` function (returns `Vec<String>`) and a `print_*` wrapper
//! that writes to stdout.

use crate::config::{EmitConfig, OutputConfig};
use crate::types::ResourceSet;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn mode_label(config: &EmitConfig) -> &'static str {
    if config.minify_enabled {
        "minified"
    } else if config.debug {
        "debug, not minified"
    } else {
        "not minified, no minifier compiled in"
    }
}

pub fn format_compile_output(set: &ResourceSet, config: &EmitConfig) -> Vec<String> {
    let mut lines = vec![format!("Resources ({})", mode_label(config))];
    for (i, entry) in set.iter().enumerate() {
        lines.push(format!("{} {:?}", format_index(i + 1), entry.name));
        lines.push(format!("{}Source: {}", indent(1), entry.source.display()));
        lines.push(format!(
            "{}{} → {} bytes",
            indent(1),
            entry.raw_text.len(),
            entry.payload.len()
        ));
    }
    lines
}

pub fn format_emit_output(
    set: &ResourceSet,
    config: &EmitConfig,
    output: &OutputConfig,
) -> Vec<String> {
    let n = set.len();
    vec![format!(
        "Wrote {}, {} ({} resource{}, {} bytes of payload)",
        config.output_dir.join(&output.header).display(),
        config.output_dir.join(&output.source).display(),
        n,
        if n == 1 { "" } else { "s" },
        set.payload_bytes()
    )]
}

pub fn print_compile_output(set: &ResourceSet, config: &EmitConfig) {
    for line in format_compile_output(set, config) {
        println!("{}", line);
    }
}

pub fn print_emit_output(set: &ResourceSet, config: &EmitConfig, output: &OutputConfig) {
    println!();
    for line in format_emit_output(set, config, output) {
        println!("{}", line);
    }
}
