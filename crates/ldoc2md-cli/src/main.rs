//! ldoc2md CLI - convert an LDoc JSON dump into mkdocs-ready Markdown

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use ldoc2md_core::{Config, Converter};

#[derive(Parser, Debug)]
#[command(name = "ldoc2md")]
#[command(version = ldoc2md_core::VERSION)]
#[command(about = "Convert a JSON file containing a dump of LDoc data into mkdocs-ready markdown files", long_about = None)]
struct Cli {
    /// LDoc JSON dump to convert
    #[arg(value_parser = existing_file)]
    doc_json_path: PathBuf,

    /// Existing directory receiving the generated pages
    #[arg(value_parser = existing_dir)]
    out_path: PathBuf,

    /// Also write a prettified copy of the json file
    #[arg(short, long)]
    pretty: bool,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file '{}' does not exist", s))
    }
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("directory '{}' does not exist", s))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };

    info!(dump = %cli.doc_json_path.display(), "converting");

    let report = Converter::new(&cli.doc_json_path, &cli.out_path, config)
        .pretty(cli.pretty)
        .convert()
        .with_context(|| format!("failed to convert '{}'", cli.doc_json_path.display()))?;

    if let Some(path) = &report.pretty_copy {
        println!("Wrote indented json to: {}", path.display());
    }
    for page in &report.pages {
        println!("Generated: {}", page.display());
    }
    for module in &report.skipped {
        eprintln!("Warning: skipped module '{}': name is not a file name", module);
    }
    if !report.unresolved.is_empty() {
        eprintln!(
            "Warning: {} unresolved cross-reference(s)",
            report.unresolved.len()
        );
    }

    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ldoc2md_core=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
