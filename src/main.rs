//! CLI entry point for imgls

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use imgls::{
    Alignment, DirWalker, JsonRenderer, OutputConfig, Renderer, TerminalSession, TextRenderer,
    TraversalConfig,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `IMGLS_LOG=debug`.
const LOG_ENV: &str = "IMGLS_LOG";

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "imgls")]
#[command(about = "List directories, rendering each entry")]
#[command(version)]
struct Args {
    /// Paths to list (default: the current directory)
    paths: Vec<PathBuf>,

    /// List directories themselves, not their contents
    #[arg(short = 'd', long = "directory")]
    directory: bool,

    /// Use a long listing format
    #[arg(short = 'l', long = "long")]
    long: bool,

    /// Dereference symlink arguments
    #[arg(short = 'L', long = "dereference")]
    dereference: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    recursive: bool,

    /// Alignment: one of left, right, or center
    #[arg(short = 'a', long = "align", value_name = "TYPE", default_value = "right")]
    align: Alignment,

    /// Skip entries matching pattern below the given paths (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Output one JSON object per entry
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Walk and render; true if every entry succeeded.
fn run<R: Renderer>(walker: &DirWalker, paths: &[PathBuf], renderer: &mut R) -> bool {
    let outcome = match walker.walk(paths, renderer) {
        Ok(outcome) => outcome,
        Err(e) => {
            renderer.report(&e);
            return false;
        }
    };
    if let Err(e) = renderer.finish() {
        eprintln!("imgls: error writing output: {}", e);
        return false;
    }
    outcome.is_success()
}

fn main() {
    let args = Args::parse();
    init_tracing();

    let config = TraversalConfig {
        directories_only: args.directory,
        recurse_dirs: args.recursive,
        dereference_links: args.dereference,
        alignment: args.align,
        ..Default::default()
    };
    let config = config.with_ignore_patterns(&args.ignore).unwrap_or_else(|e| {
        eprintln!("imgls: invalid --ignore pattern: {}", e);
        process::exit(2);
    });
    tracing::debug!(?config, paths = ?args.paths, "starting walk");
    let walker = DirWalker::new(config);

    let output_config = OutputConfig {
        use_color: !args.json && should_use_color(args.color),
        long_listing: args.long,
    };

    // The session must be dropped before exiting so the terminal is restored.
    let success = {
        let mut session = TerminalSession::stdout(output_config.use_color);
        if args.json {
            run(&walker, &args.paths, &mut JsonRenderer::new(&mut session))
        } else {
            let mut renderer = TextRenderer::new(&mut session, output_config);
            run(&walker, &args.paths, &mut renderer)
        }
    };

    if !success {
        process::exit(1);
    }
}
