//! Command-line front end for libtestskel.

use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use libtestskel::{Skeleton, TemplateSource, highlight::highlight_code};
use tracing_subscriber::EnvFilter;

/// Generate a stub test file for a Rust type.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the type to generate tests for
    class_name: String,

    /// Source file defining the type [default: snake-cased CLASS_NAME with a .rs extension]
    source: Option<PathBuf>,

    /// Output file [default: snake-cased CLASS_NAME followed by _test.rs]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the skeleton to stdout instead of writing a file
    #[arg(long, default_value_t = false, conflicts_with = "output")]
    stdout: bool,

    /// Header template: a file path or literal template text
    #[arg(long)]
    header: Option<String>,

    /// Footer template: a file path or literal template text
    #[arg(long)]
    footer: Option<String>,

    /// Per-method template: a file path or literal template text
    #[arg(long)]
    method: Option<String>,

    /// List the methods that would receive a test stub and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Output the type descriptor as JSON and exit
    #[arg(long, default_value_t = false, conflicts_with = "list")]
    raw: bool,

    /// Colorize output printed with --stdout
    #[arg(long, default_value = "auto", value_parser = ["auto", "always", "never"], env = "TESTSKEL_COLOR")]
    color: String,

    /// Do not report where the skeleton was written
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

/// Route library logs to stderr when `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }
}

/// Apply any template overrides given on the command line. Templates that were not named keep
/// their built-in text.
fn apply_templates(cli: &Cli, skeleton: Skeleton) -> Result<Skeleton> {
    let mut templates = skeleton.templates().clone();
    let overrides = [
        (&cli.header, &mut templates.class_header),
        (&cli.footer, &mut templates.class_footer),
        (&cli.method, &mut templates.method),
    ];
    for (value, slot) in overrides {
        if let Some(value) = value {
            *slot = TemplateSource::resolve(value)
                .load()
                .context("loading templates")?;
        }
    }
    Ok(skeleton.with_templates(templates))
}

/// Run the command described by `cli`.
fn run(cli: &Cli) -> Result<()> {
    let skeleton = Skeleton::new(&cli.class_name, cli.source.as_deref())?;

    if cli.raw {
        println!("{}", skeleton.raw_json()?);
        return Ok(());
    }

    if cli.list {
        for method in skeleton.methods() {
            println!("{method}");
        }
        return Ok(());
    }

    let skeleton = apply_templates(cli, skeleton)?;

    if cli.stdout {
        let should_highlight = match cli.color.as_str() {
            "never" => false,
            "always" => true,
            _ => io::stdout().is_terminal(),
        };
        let output = skeleton.generate();
        if should_highlight {
            print!("{}", highlight_code(&output)?);
        } else {
            print!("{output}");
        }
        return Ok(());
    }

    let path = skeleton.write(cli.output.as_deref())?;
    if !cli.quiet {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
