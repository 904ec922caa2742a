//! chunkmill — extract documents and chunk them for retrieval workloads.
//!
//! One input file produces one chunked output (stdout or a file next to
//! the requested output directory). A failing input never aborts its
//! siblings; the exit code reflects whether every input succeeded.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use chunkmill_core::{config, ChunkConfig};
use chunkmill_ingest::output::{write_chunks, OutputFormat};
use chunkmill_ingest::Pipeline;

/// Document extraction and RAG chunking pipeline.
#[derive(Parser, Debug)]
#[command(name = "chunkmill", version, about)]
struct Cli {
    /// Input files (txt, md, csv, pdf).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Target maximum tokens per chunk.
    #[arg(long, env = "CHUNK_SIZE", default_value_t = ChunkConfig::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Fraction of a chunk repeated at the start of the next, in [0, 1).
    #[arg(long, env = "CHUNK_OVERLAP_PCT", default_value_t = ChunkConfig::DEFAULT_OVERLAP_PCT)]
    overlap_pct: f64,

    /// Output format: json, jsonl, csv, md, txt.
    #[arg(long, env = "OUTPUT_FORMAT", default_value = "json")]
    format: String,

    /// Directory for output files (default: stdout).
    #[arg(long, env = "OUTPUT_DIR")]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Cli::parse();
    let format: OutputFormat = args
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let chunk_config = ChunkConfig::new(args.chunk_size, args.overlap_pct)
        .context("invalid chunking parameters")?;
    let pipeline = Pipeline::new(chunk_config);

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut failures = 0usize;
    for input in &args.inputs {
        match pipeline.process_file(input) {
            Ok(doc) => {
                if let Err(e) = emit(&args, format, input, &doc) {
                    error!(file = %input.display(), error = %e, "failed to write output");
                    failures += 1;
                }
            }
            Err(e) => {
                error!(file = %input.display(), error = %e, "failed to process");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} input(s) failed", args.inputs.len());
    }
    Ok(())
}

fn emit(
    args: &Cli,
    format: OutputFormat,
    input: &Path,
    doc: &chunkmill_ingest::ChunkedDocument,
) -> Result<()> {
    match &args.out_dir {
        Some(dir) => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let path = dir.join(format!("{stem}.chunks.{}", format.extension()));
            let mut file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_chunks(format, doc, &mut file)?;
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_chunks(format, doc, &mut lock)?;
            lock.flush()?;
            Ok(())
        }
    }
}
