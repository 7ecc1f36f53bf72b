//! End-to-end runs of the `resgen` binary.
//!
//! Each test lays out a small site in a temp directory and runs the binary
//! with that directory as the working directory, so input paths look exactly
//! like they do in a real build (`res/index.html`, ...).

use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HOME: &str = "<!DOCTYPE html>\n<html>\n  <body>\n    <p>home</p>\n  </body>\n</html>\n";
const ABOUT: &str = "<!DOCTYPE html>\n<p>  about   us  </p>\n";
const SCRIPT: &str = "const x = 1;\nconsole.log(x);\n";

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, content) in [
        ("res/index.html", HOME),
        ("res/about/index.html", ABOUT),
        ("res/index.js", SCRIPT),
    ] {
        let path = tmp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    fs::create_dir(tmp.path().join("gen")).unwrap();
    tmp
}

fn resgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_resgen"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn gunzip(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
    out
}

fn names(header: &str) -> Vec<String> {
    header
        .lines()
        .skip_while(|l| !l.contains(" names{"))
        .skip(1)
        .take_while(|l| *l != "};")
        .map(|l| {
            let l = l.trim().trim_end_matches(',');
            l[1..l.len() - 1].to_string()
        })
        .collect()
}

fn payloads(source: &str) -> Vec<Vec<u8>> {
    source
        .lines()
        .filter_map(|l| l.strip_prefix("    std::string_view{\""))
        .map(|rest| {
            let (literal, len) = rest.rsplit_once("\", ").unwrap();
            let len: usize = len.trim_end_matches("},").parse().unwrap();
            let bytes: Vec<u8> = literal
                .as_bytes()
                .chunks(4)
                .map(|c| (c[1] - b'0') * 64 + (c[2] - b'0') * 8 + (c[3] - b'0'))
                .collect();
            assert_eq!(bytes.len(), len);
            bytes
        })
        .collect()
}

fn outputs(dir: &Path) -> (String, String) {
    (
        fs::read_to_string(dir.join("gen/res.h")).unwrap(),
        fs::read_to_string(dir.join("gen/res.cpp")).unwrap(),
    )
}

fn gen_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir.join("gen")).unwrap().next().is_none()
}

#[test]
fn debug_build_embeds_sources_verbatim() {
    let tmp = site();
    let out = resgen(
        tmp.path(),
        &["1", "gen", "res/index.html", "res/about/index.html", "res/index.js"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let (header, source) = outputs(tmp.path());
    assert_eq!(names(&header), vec!["/", "/about/", "/index.js"]);

    let texts: Vec<String> = payloads(&source)
        .iter()
        .map(|p| String::from_utf8(gunzip(p)).unwrap())
        .collect();
    assert_eq!(texts, vec![HOME, ABOUT, SCRIPT]);
}

#[test]
fn both_tables_declare_input_count() {
    let tmp = site();
    let out = resgen(tmp.path(), &["1", "gen", "res/index.html", "res/index.js"]);
    assert!(out.status.success());

    let (header, source) = outputs(tmp.path());
    assert_eq!(header.matches("std::array<std::string_view, 2>").count(), 2);
    assert!(source.contains("const std::array<std::string_view, 2> res::contents{"));
    assert!(source.starts_with("#include \"res.h\"\n"));
    assert_eq!(payloads(&source).len(), 2);
}

#[cfg(feature = "minify")]
#[test]
fn release_build_embeds_minified_html() {
    use resgen::transform::{Minifier, MinifyOptions, html::HtmlMinifier};

    let tmp = site();
    let out = resgen(tmp.path(), &["0", "gen", "res/index.html", "res/about/index.html"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let (_, source) = outputs(tmp.path());
    let minifier = HtmlMinifier::new();
    let expected: Vec<Vec<u8>> = [HOME, ABOUT]
        .iter()
        .map(|t| minifier.minify(t, &MinifyOptions::default()).unwrap().into_bytes())
        .collect();
    let actual: Vec<Vec<u8>> = payloads(&source).iter().map(|p| gunzip(p)).collect();
    assert_eq!(actual, expected);
    assert!(actual[0].len() < HOME.len());
}

#[test]
fn directory_input_matches_explicit_list() {
    let explicit = site();
    let out = resgen(
        explicit.path(),
        &["1", "gen", "res/index.js", "res/index.html", "res/about/index.html"],
    );
    assert!(out.status.success());

    let walked = site();
    let out = resgen(walked.path(), &["1", "gen", "res"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(outputs(explicit.path()), outputs(walked.path()));
}

#[test]
fn empty_input_fails_and_writes_nothing() {
    let tmp = site();
    let out = resgen(tmp.path(), &["1", "gen"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("No input files"));
    assert!(gen_is_empty(tmp.path()));
}

#[test]
fn invalid_utf8_fails_and_writes_nothing() {
    let tmp = site();
    fs::write(tmp.path().join("res/bad.html"), [0xc3, 0x28]).unwrap();
    let out = resgen(tmp.path(), &["1", "gen", "res/index.html", "res/bad.html"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not valid UTF-8"));
    assert!(gen_is_empty(tmp.path()));
}

#[test]
fn missing_input_fails() {
    let tmp = site();
    let out = resgen(tmp.path(), &["1", "gen", "res/nope.html"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
    assert!(gen_is_empty(tmp.path()));
}

#[test]
fn missing_output_dir_fails() {
    let tmp = site();
    let out = resgen(tmp.path(), &["1", "nowhere", "res/index.html"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("nowhere").exists());
}

#[test]
fn colliding_names_fail() {
    let tmp = site();
    fs::write(tmp.path().join("res/main.html"), "<p>1</p>").unwrap();
    fs::write(tmp.path().join("res/ma.html"), "<p>2</p>").unwrap();
    let out = resgen(tmp.path(), &["1", "gen", "res/main.html", "res/ma.html"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("both resolve to the name \"/ma\""));
    assert!(gen_is_empty(tmp.path()));
}

#[test]
fn config_file_renames_outputs() {
    let tmp = site();
    fs::write(
        tmp.path().join("resgen.toml"),
        "[output]\nheader = \"assets.h\"\nsource = \"assets.cpp\"\nnamespace = \"assets\"\n",
    )
    .unwrap();
    let out = resgen(
        tmp.path(),
        &["1", "gen", "res/index.html", "--config", "resgen.toml"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let source = fs::read_to_string(tmp.path().join("gen/assets.cpp")).unwrap();
    assert!(source.starts_with("#include \"assets.h\"\n"));
    assert!(source.contains("assets::contents{"));
    assert!(tmp.path().join("gen/assets.h").exists());
    assert!(!tmp.path().join("gen/res.h").exists());
}

#[test]
fn invalid_config_fails() {
    let tmp = site();
    fs::write(tmp.path().join("resgen.toml"), "[output]\nnamespace = \"9lives\"\n").unwrap();
    let out = resgen(
        tmp.path(),
        &["1", "gen", "res/index.html", "--config", "resgen.toml"],
    );
    assert!(!out.status.success());
    assert!(gen_is_empty(tmp.path()));
}

#[test]
fn print_config_needs_no_positionals() {
    let tmp = TempDir::new().unwrap();
    let out = resgen(tmp.path(), &["--print-config"]);
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("strip_trailing = \"index.html\""));
}

#[test]
fn debug_flag_wider_than_i64() {
    let tmp = site();
    let out = resgen(
        tmp.path(),
        &["123456789012345678901234567890", "gen", "res/index.html"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let (_, source) = outputs(tmp.path());
    assert_eq!(gunzip(&payloads(&source)[0]), HOME.as_bytes());
}

#[test]
fn non_integer_debug_flag_fails() {
    let tmp = site();
    let out = resgen(tmp.path(), &["yes", "gen", "res/index.html"]);
    assert!(!out.status.success());
    assert!(gen_is_empty(tmp.path()));
}

#[test]
fn output_dir_that_is_a_file_fails() {
    let tmp = site();
    fs::write(tmp.path().join("out"), "").unwrap();
    let out = resgen(tmp.path(), &["1", "out", "res/index.html"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a directory"));
}

#[test]
fn quiet_prints_nothing() {
    let tmp = site();
    let out = resgen(tmp.path(), &["1", "gen", "res/index.html", "--quiet"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn summary_lists_resources() {
    let tmp = site();
    let out = resgen(tmp.path(), &["1", "gen", "res/index.html", "res/about/index.html"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Resources (debug, not minified)\n"));
    assert!(stdout.contains("001 \"/\"\n"));
    assert!(stdout.contains("002 \"/about/\"\n"));
    assert!(stdout.contains("Wrote gen/res.h, gen/res.cpp (2 resources,"));
}
