//! hwt - print highlight markup for a text file
//!
//! Reads text from a file or stdin, highlights it with the spec from the
//! config file and prints the overlay markup, or paints a terminal preview.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use highlight_within::highlight;
use highlight_within::terminal::{Palette, Preview};
use highlight_within::{Config, HighlightError, HighlightSpec, Highlighter, Result, TextSurface};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    preview: bool,
    input: Option<PathBuf>,
}

fn main() {
    configure_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by `HWT_LOG` (default: warn)
fn configure_logging() {
    let filter = EnvFilter::try_from_env("HWT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if matches!(config.highlight, HighlightSpec::Empty) {
        warn!("no highlight configured, output will be plain");
    }

    let text = read_input(options.input.as_ref())?;

    if options.preview {
        let ranges = highlight::ranges(&text, &config.highlight)?;
        let mut preview = Preview::new(io::stdout(), Palette::from_names(&config.colors));
        preview.paint(&text, ranges)?;
        return Ok(());
    }

    let mut highlighter = Highlighter::from_config(TextSurface::new(text), &config);
    let markup = highlighter.handle_input()?;
    print!("{}", markup);
    Ok(())
}

/// Parse arguments; `None` means help or version was printed
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--preview" | "-p" => options.preview = true,
            "--config" | "-c" => {
                let path = iter.next().ok_or_else(|| {
                    HighlightError::Configuration(format!("{} needs a file argument", arg))
                })?;
                options.config = Some(PathBuf::from(path));
            }
            "-" => options.input = None,
            other if other.starts_with('-') => {
                return Err(HighlightError::Configuration(format!(
                    "unknown option: {}",
                    other
                )));
            }
            path => options.input = Some(PathBuf::from(path)),
        }
    }

    Ok(Some(options))
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_usage() {
    println!("hwt {} - highlight text without touching it", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hwt [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or stdin when FILE is missing or -) and prints it as");
    println!("markup with <mark> tags around every highlighted range.");
    println!();
    println!("Options:");
    println!("  -c, --config FILE  Read the highlight spec from FILE (default ~/.hwt.toml)");
    println!("  -p, --preview      Paint highlights in the terminal instead of printing markup");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Set HWT_LOG=debug for diagnostics on stderr.");
}

fn print_version() {
    println!("hwt {}", env!("CARGO_PKG_VERSION"));
}
