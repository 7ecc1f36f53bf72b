//! Rendering and writing the declarations/definitions pair.
//!
//! Stage 3 of the pipeline. Consumes a sorted [`ResourceSet`] once and produces
//! two C++17 files that must agree on count and order.
//!
//! ## Declarations (`res.h`)
//!
//! ```text
//! #pragma once
//! #include <string_view>
//! #include <array>
//!
//! namespace res {
//! constexpr inline std::array<std::string_view, 2> names{
//!     "/",
//!     "/about/",
//! };
//! extern const std::array<std::string_view, 2> contents;
//! }
//! ```
//!
//! ## Definitions (`res.cpp`)
//!
//! ```text
//! #include "res.h"
//!
//! const std::array<std::string_view, 2> res::contents{
//!     std::string_view{"\037\213\010\000...", 412},
//!     std::string_view{"\037\213\010\000...", 388},
//! };
//! ```
//!
//! Every payload byte is a fixed-width octal escape and every entry carries its
//! length, since gzip output contains NUL bytes. With `output.dedupe` the
//! distinct payloads are hoisted into `blob_N` arrays in an anonymous namespace
//! and the table refers to them; the header is identical either way.
//!
//! ## Writing
//!
//! Both files are rendered in memory, staged as temporary files inside the
//! output directory, and renamed into place only after both were written.
//! The previous header is backed up until the definitions rename succeeds and
//! restored if it fails, so a failed run leaves the old pair behind. An empty
//! set is rejected before anything touches the disk.

use crate::config::OutputConfig;
use crate::types::ResourceSet;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("No input files: refusing to emit empty resource tables")]
    EmptyInput,
    #[error("Output directory does not exist: {0}")]
    MissingOutputDir(PathBuf),
    #[error("Output path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Cannot replace {0}: it is a directory")]
    TargetIsDirectory(PathBuf),
    #[error("Failed to stage output in {dir}: {source}")]
    Stage {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The rendered artifact pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub declarations: String,
    pub definitions: String,
}

/// Render both artifacts without touching the filesystem.
pub fn render(entries: &ResourceSet, output: &OutputConfig) -> Result<Tables, EmitError> {
    if entries.is_empty() {
        return Err(EmitError::EmptyInput);
    }
    Ok(Tables {
        declarations: render_declarations(entries, output),
        definitions: render_definitions(entries, output),
    })
}

/// Render and write both artifacts into `output_dir`.
///
/// Returns the rendered text so callers can report on it.
pub fn emit(
    entries: &ResourceSet,
    output_dir: &Path,
    output: &OutputConfig,
) -> Result<Tables, EmitError> {
    let tables = render(entries, output)?;
    if !output_dir.exists() {
        return Err(EmitError::MissingOutputDir(output_dir.to_path_buf()));
    }
    if !output_dir.is_dir() {
        return Err(EmitError::NotADirectory(output_dir.to_path_buf()));
    }
    write_pair(
        output_dir,
        [
            (output.header.as_str(), tables.declarations.as_str()),
            (output.source.as_str(), tables.definitions.as_str()),
        ],
    )?;
    Ok(tables)
}

pub fn render_declarations(entries: &ResourceSet, output: &OutputConfig) -> String {
    let n = entries.len();
    let mut out = String::new();
    out.push_str("#pragma once\n#include <string_view>\n#include <array>\n\n");
    out.push_str(&format!("namespace {} {{\n", output.namespace));
    out.push_str(&format!(
        "constexpr inline std::array<std::string_view, {n}> names{{\n"
    ));
    for entry in entries {
        out.push_str("    \"");
        push_name_literal(&mut out, &entry.name);
        out.push_str("\",\n");
    }
    out.push_str("};\n");
    out.push_str(&format!(
        "extern const std::array<std::string_view, {n}> contents;\n"
    ));
    out.push_str("}\n");
    out
}

pub fn render_definitions(entries: &ResourceSet, output: &OutputConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("#include \"{}\"\n\n", output.header));

    // Slot i refers to blob slots[i] when deduplicating.
    let slots = output.dedupe.then(|| {
        let (blobs, slots) = dedupe(entries);
        out.push_str("namespace {\n");
        for (k, &first) in blobs.iter().enumerate() {
            out.push_str(&format!("constexpr char blob_{k}[] = \""));
            push_octal(&mut out, &entries.entries()[first].payload);
            out.push_str("\";\n");
        }
        out.push_str("}\n\n");
        slots
    });

    out.push_str(&format!(
        "const std::array<std::string_view, {}> {}::contents{{\n",
        entries.len(),
        output.namespace
    ));
    for (i, entry) in entries.iter().enumerate() {
        out.push_str("    std::string_view{");
        match &slots {
            Some(slots) => out.push_str(&format!("blob_{}", slots[i])),
            None => {
                out.push('"');
                push_octal(&mut out, &entry.payload);
                out.push('"');
            }
        }
        out.push_str(&format!(", {}}},\n", entry.payload.len()));
    }
    out.push_str("};\n");
    out
}

/// Group identical payloads by SHA-256.
///
/// Returns the index of the first entry of each distinct payload (in order of
/// first appearance) and, per entry, the number of its blob.
fn dedupe(entries: &ResourceSet) -> (Vec<usize>, Vec<usize>) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut blobs = Vec::new();
    let mut slots = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let digest = format!("{:x}", Sha256::digest(&entry.payload));
        let blob = *seen.entry(digest).or_insert_with(|| {
            blobs.push(i);
            blobs.len() - 1
        });
        slots.push(blob);
    }
    (blobs, slots)
}

/// Append every byte as a three-digit octal escape (`\000`-`\377`).
pub fn push_octal(out: &mut String, bytes: &[u8]) {
    out.reserve(bytes.len() * 4);
    for &b in bytes {
        out.push('\\');
        out.push(char::from(b'0' + (b >> 6)));
        out.push(char::from(b'0' + ((b >> 3) & 7)));
        out.push(char::from(b'0' + (b & 7)));
    }
}

/// Append a name as the body of a C++ string literal.
///
/// Quotes and backslashes are escaped, control characters become octal; the
/// name's bytes are otherwise left alone.
fn push_name_literal(out: &mut String, name: &str) {
    for c in name.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
}

/// Stage both files, then rename them into place.
///
/// The first target's previous content is kept aside until the second rename
/// succeeds and put back if it fails, so a failed write leaves the old pair.
fn write_pair(dir: &Path, files: [(&str, &str); 2]) -> Result<(), EmitError> {
    let [(first_name, first_text), (second_name, second_text)] = files;
    let first = dir.join(first_name);
    let second = dir.join(second_name);
    for target in [&first, &second] {
        if target.is_dir() {
            return Err(EmitError::TargetIsDirectory(target.clone()));
        }
    }

    let first_tmp = stage(dir, first_text)?;
    let second_tmp = stage(dir, second_text)?;
    let backup = backup_of(&first, dir)?;

    first_tmp.persist(&first).map_err(|e| EmitError::Persist {
        path: first.clone(),
        source: e.error,
    })?;
    if let Err(e) = second_tmp.persist(&second) {
        restore(backup, &first);
        return Err(EmitError::Persist {
            path: second,
            source: e.error,
        });
    }
    Ok(())
}

fn stage_error(dir: &Path) -> impl Fn(std::io::Error) -> EmitError + '_ {
    move |source| EmitError::Stage {
        dir: dir.to_path_buf(),
        source,
    }
}

/// Write `text` to a synced, world-readable temp file inside `dir`.
fn stage(dir: &Path, text: &str) -> Result<NamedTempFile, EmitError> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(stage_error(dir))?;
    tmp.write_all(text.as_bytes()).map_err(stage_error(dir))?;
    tmp.as_file().sync_all().map_err(stage_error(dir))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(stage_error(dir))?;
    }
    Ok(tmp)
}

/// Copy an existing file into a temp file next to it. `None` if absent.
fn backup_of(path: &Path, dir: &Path) -> Result<Option<NamedTempFile>, EmitError> {
    if !path.is_file() {
        return Ok(None);
    }
    let tmp = NamedTempFile::new_in(dir).map_err(stage_error(dir))?;
    std::fs::copy(path, tmp.path()).map_err(stage_error(dir))?;
    Ok(Some(tmp))
}

/// Best effort: the run is already failing with the rename error.
fn restore(backup: Option<NamedTempFile>, path: &Path) {
    match backup {
        Some(tmp) => {
            let _ = tmp.persist(path);
        }
        None => {
            let _ = std::fs::remove_file(path);
        }
    }
}
