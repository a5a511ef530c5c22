//! convert-chapters - Convert numbered chapter text files into JSON chapter records

mod config;
mod convert;

use anyhow::Result;
use clap::Parser;
use config::ConvertConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "convert-chapters",
    about = "Convert chapter text files to JSON",
    long_about = "Reads numbered chapter text files (1.txt, 2.txt, ...) and writes one chapter-NNN.json record per chapter"
)]
#[command(version)]
struct Args {
    /// Directory containing the chapter text files (overrides config)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Directory to write the JSON files to (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: ./convert-chapters.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = ConvertConfig::load(args.config.as_deref())?;
    if let Some(source) = args.source {
        config.source_dir = source;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    log::debug!("Using config: {:?}", config);

    let summary = convert::convert_all(&config)?;
    log::debug!(
        "{} of {} chapter files converted",
        summary.converted.len(),
        summary.found
    );
    for failure in &summary.failures {
        log::debug!("{}: {}", failure.file_name, failure.message);
    }

    Ok(())
}
