use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use explain_txt::data::loader;
use explain_txt::{ReportChunkBuilder, TextStream, TxtDataChunkBuilder};

/// Render a data file (.json, .csv, .parquet) as a plain-text data chunk.
#[derive(Debug, Parser)]
#[command(name = "explain-txt", version, about)]
struct Cli {
    /// Data file to render
    file: PathBuf,

    /// Print the chunk metadata (context, group, rule, tags) first
    #[arg(long)]
    headers: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("Failed to render {}: {e:#}", cli.file.display());
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let chunk = loader::load_file(&cli.file)?;

    let mut stream = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            TextStream::new(BufWriter::new(file))
        }
        None => TextStream::new(BufWriter::new(io::stdout())),
    };

    TxtDataChunkBuilder::new()
        .build_report_chunk(Some(&chunk), Some(&mut stream), cli.headers)
        .context("rendering data chunk")?;
    stream.flush().context("flushing output")?;

    if let Some(path) = &cli.output {
        log::info!("Wrote data chunk to {}", path.display());
    }
    Ok(())
}
