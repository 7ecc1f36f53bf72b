use clap::Parser;
use resgen::{compile, config, emit, naming::NameRules, output, transform};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "resgen")]
#[command(about = "Compile static web resources into gzip-compressed C++ tables")]
#[command(long_about = "\
Compile static web resources into gzip-compressed C++ tables

Every input file is read as UTF-8, minified (release builds only), gzipped
and embedded as octal-escaped bytes. Two files are written to OUTPUT_DIR:

  res.h     names of all resources, sorted, plus an extern `contents` table
  res.cpp   the compressed bytes, index-aligned with `names`

Resource names come from the input path with the characters r, e, s trimmed
from the left and the characters of \"index.html\" trimmed from the right:

  res/index.html        →  \"/\"
  res/about/index.html  →  \"/about/\"
  res/index.js          →  \"/index.js\"

Directories given as inputs are expanded to every file below them.

Run 'resgen --print-config' for a documented resgen.toml.")]
#[command(version = version_string())]
struct Cli {
    /// 0 minifies the resources, any other integer embeds them as written
    #[arg(
        allow_negative_numbers = true,
        required_unless_present = "print_config",
        value_parser = config::parse_debug_flag
    )]
    debug: Option<bool>,

    /// Directory receiving the generated header and source (must exist)
    #[arg(required_unless_present = "print_config")]
    output_dir: Option<PathBuf>,

    /// Resource files or directories to embed
    inputs: Vec<PathBuf>,

    /// Optional resgen.toml with naming, minify, compression and output settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only report errors
    #[arg(long, short)]
    quiet: bool,

    /// Print a stock resgen.toml with all options documented, then exit
    #[arg(long, exclusive = true)]
    print_config: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let (Some(debug), Some(output_dir)) = (cli.debug, cli.output_dir) else {
        return Err("DEBUG and OUTPUT_DIR are required".into());
    };

    let tool_config = config::load_config(cli.config.as_deref())?;
    let emit_config =
        config::EmitConfig::new(debug, output_dir, transform::minifier_available());
    init_thread_pool(&tool_config.processing);

    let inputs = compile::expand_inputs(&cli.inputs)?;
    let minifier = transform::default_minifier();
    let compressor = transform::GzipCompressor::new(tool_config.compression.level);
    let backends = transform::Backends {
        minifier: minifier.as_ref(),
        compressor: &compressor,
        minify_options: tool_config.minify.options(),
    };
    let rules = NameRules::from_config(&tool_config.naming);

    let set = compile::compile(&inputs, &emit_config, &rules, &backends)?;
    emit::emit(&set, &emit_config.output_dir, &tool_config.output)?;

    if !cli.quiet {
        output::print_compile_output(&set, &emit_config);
        output::print_emit_output(&set, &emit_config, &tool_config.output);
    }
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
