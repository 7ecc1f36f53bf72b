//! Shared test utilities for the resgen test suite.

use crate::types::ResourceEntry;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

/// An entry whose payload is its name's bytes; enough for ordering tests.
pub fn entry(name: &str, source: &str) -> ResourceEntry {
    ResourceEntry {
        name: name.to_string(),
        source: PathBuf::from(source),
        raw_text: String::new(),
        payload: name.as_bytes().to_vec(),
    }
}

/// An entry with explicit payload bytes.
pub fn entry_with_payload(name: &str, payload: &[u8]) -> ResourceEntry {
    ResourceEntry {
        name: name.to_string(),
        source: PathBuf::from(format!("res{name}index.html")),
        raw_text: String::new(),
        payload: payload.to_vec(),
    }
}

/// Decompress a gzip stream. Panics on corrupt input.
pub fn gunzip(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .expect("payload is not a valid gzip stream");
    out
}
