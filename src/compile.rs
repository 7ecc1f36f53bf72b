//! Resolve and transform every input into a sorted [`ResourceSet`].
//!
//! Stages 1 and 2 of the pipeline. Each input is independent: its name comes
//! from [`NameRules`] and its payload from [`transform`], so the work runs on
//! the rayon pool with no shared mutable state. The collected entries are then
//! sorted by name and checked for collisions before anything reaches the
//! emitter.
//!
//! ## Inputs
//!
//! ```text
//! resgen 0 gen/ res/index.html res/about/index.html res/index.js
//! resgen 0 gen/ res/                  # same, via directory expansion
//! ```
//!
//! A directory argument is walked recursively and every regular file below it
//! becomes an input. Paths keep the directory argument as their prefix, so
//! `res/` and the explicit file list produce identical names.
//!
//! ## Validation
//!
//! - Every input must exist and be valid UTF-8.
//! - The minifier (when enabled) must accept every input.
//! - No two inputs may resolve to the same name.

use crate::config::EmitConfig;
use crate::naming::NameRules;
use crate::transform::{self, Backends, ReadError, TransformError};
use crate::types::{ResourceEntry, ResourceSet};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("{path}: {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{first} and {second} both resolve to the name {name:?}")]
    NameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Replace directory arguments by the files below them, sorted by file name.
///
/// Plain paths are passed through untouched, even if they do not exist; the
/// reader reports those.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CompileError> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Build the resource set for a run.
pub fn compile(
    inputs: &[PathBuf],
    config: &EmitConfig,
    rules: &NameRules,
    backends: &Backends<'_>,
) -> Result<ResourceSet, CompileError> {
    let entries = inputs
        .par_iter()
        .map(|path| compile_one(path, config, rules, backends))
        .collect::<Result<Vec<_>, _>>()?;

    let set = ResourceSet::new(entries);
    check_collisions(&set)?;
    Ok(set)
}

fn compile_one(
    path: &Path,
    config: &EmitConfig,
    rules: &NameRules,
    backends: &Backends<'_>,
) -> Result<ResourceEntry, CompileError> {
    let raw_text = transform::read_utf8(path)?;
    let payload = transform::transform(&raw_text, config, backends).map_err(|source| {
        CompileError::Transform {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(ResourceEntry {
        name: rules.resolve(path),
        source: path.to_path_buf(),
        raw_text,
        payload,
    })
}

/// Sorted order puts equal names next to each other.
fn check_collisions(set: &ResourceSet) -> Result<(), CompileError> {
    match set.entries().windows(2).find(|w| w[0].name == w[1].name) {
        Some(pair) => Err(CompileError::NameCollision {
            name: pair[0].name.clone(),
            first: pair[0].source.clone(),
            second: pair[1].source.clone(),
        }),
        None => Ok(()),
    }
}
