//! # resgen
//!
//! Compiles static text resources (HTML pages and the scripts and stylesheets
//! they pull in) into a pair of C++ source files that embed the gzip-compressed
//! bytes directly into an executable. At runtime the embedding program looks a
//! request path up in `res::names` and serves the bytes at the same index in
//! `res::contents` with `Content-Encoding: gzip`.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Resolve     res/about/index.html  →  "/about/"          (path → logical name)
//! 2. Transform   <html>…</html>        →  1f 8b 08 00 …      (minify? + gzip)
//! 3. Emit        sorted entries        →  res.h + res.cpp    (matched table pair)
//! ```
//!
//! Stages 1 and 2 are pure per-file functions and run on a rayon pool. The
//! results are sorted by name before stage 3, which renders both artifacts in
//! memory and only then swaps them into the output directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Character-class trimming that turns a path into a logical name |
//! | [`transform`] | File reading, the [`Minifier`](transform::Minifier) / [`Compressor`](transform::Compressor) seams and their production backends |
//! | [`compile`] | Input expansion, parallel resolve + transform, sorting, collision checks |
//! | [`emit`] | Rendering and atomically writing the declarations/definitions pair |
//! | [`config`] | `resgen.toml` loading and merging, plus the per-run [`EmitConfig`](config::EmitConfig) |
//! | [`types`] | [`ResourceEntry`](types::ResourceEntry) and the sorted [`ResourceSet`](types::ResourceSet) |
//! | [`output`] | CLI output formatting for the run summary |
//!
//! # Design Decisions
//!
//! ## Two Artifacts, One Order
//!
//! The header carries only names and the count, so any translation unit can
//! include it cheaply. The payload bytes live in a single definitions file
//! that is compiled once. Both are rendered from the same [`types::ResourceSet`],
//! which is sorted once and never mutated, so index `i` in `names` always
//! describes index `i` in `contents`.
//!
//! ## Fixed-Width Octal Escapes
//!
//! Every payload byte is written as `\ooo`. A variable-width escape followed
//! by a digit would change meaning; a fixed width never does, and it keeps the
//! literal opaque regardless of which bytes happen to be printable. Each entry
//! also carries its explicit length because compressed data contains NULs.
//!
//! ## Character-Class Name Trimming
//!
//! Names are produced by trimming *characters* from the set `{r,e,s}` on the
//! left and from the set of characters in `index.html` on the right. This is
//! not prefix/suffix removal and yields surprising names for some paths
//! (`res/sheet.html` becomes `/s`). The rule is kept verbatim for
//! compatibility with existing lookup tables; the sets are configurable.
//!
//! ## Minifier as a Build-Time Capability
//!
//! Minification is decided once per run: the `minify` cargo feature says
//! whether the HTML minifier is compiled in, and a nonzero debug flag turns it
//! off. There is never a per-file fallback.

pub mod compile;
pub mod config;
pub mod emit;
pub mod naming;
pub mod output;
pub mod transform;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
