//! RED Interpreter - CLI
//!
//! Runs a RED program file with the built-in keyword pack loaded.
//!
//! Usage: `red <script> [--config FILE] [--keywords FILE]... [--strict-push] [-v]`

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use red_core::{Host, Interpreter, RedConfig};
use red_host::{builtin_keywords, load_config, read_program, FsHost};

#[derive(Parser, Debug)]
#[command(name = "red")]
#[command(about = "Run a RED stack-language program")]
struct Cli {
    /// Program source file
    script: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject unrecognized PUSH literals instead of ignoring them
    #[arg(long)]
    strict_push: bool,

    /// Seed for RANDINT / RANDFLOAT
    #[arg(long)]
    seed: Option<u64>,

    /// Nesting limit for RUN, MODRUN and keyword expansion
    #[arg(long)]
    max_call_depth: Option<usize>,

    /// Additional keyword pack (repeatable)
    #[arg(long = "keywords", value_name = "FILE")]
    keywords: Vec<PathBuf>,

    /// Do not load the built-in keyword pack
    #[arg(long)]
    no_builtins: bool,

    /// Log interpreter activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// File config first, then flag overrides
fn resolve_config(cli: &Cli) -> Result<RedConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RedConfig::default(),
    };

    if cli.strict_push {
        config.strict_push = true;
    }
    if let Some(seed) = cli.seed {
        config.random_seed = Some(seed);
    }
    if let Some(depth) = cli.max_call_depth {
        config.max_call_depth = depth;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    debug!(?config, "resolved configuration");

    let source = read_program(&cli.script)?;
    let mut interp = Interpreter::new(config, FsHost::new());

    if !cli.no_builtins {
        interp.register_keywords(builtin_keywords()?);
    }
    for path in &cli.keywords {
        let ext = interp
            .host_mut()
            .load_keywords(&path.to_string_lossy())
            .with_context(|| format!("failed to load keyword pack {}", path.display()))?;
        interp.register_keywords(ext);
    }

    interp.run_source(&source)?;
    if interp.is_halted() {
        debug!("program exited");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
