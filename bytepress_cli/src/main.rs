use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bytepress_codecs::{codec_by_id, compress, decompress};
use bytepress_core::format::{split_container, HEADER_SIZE};
use bytepress_core::Algorithm;

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "bytepress",
    about = "Compress, decompress, and inspect bytepress containers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a self-describing container
    Compress {
        /// Source file to compress
        input: PathBuf,
        /// Destination container file
        output: PathBuf,
        /// Algorithm to use: rle | huffman
        #[arg(short, long, default_value = "huffman")]
        algorithm: String,
        /// Print the stats object as JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Decompress a container back to the original bytes
    ///
    /// No algorithm flag: the container header names the codec.
    Decompress {
        /// Source container file
        input: PathBuf,
        /// Destination file
        output: PathBuf,
        /// Print the processing time as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the parsed container header and size breakdown
    Inspect {
        /// Container file to inspect
        file: PathBuf,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(
    input: PathBuf,
    output: PathBuf,
    algorithm_name: &str,
    json: bool,
) -> anyhow::Result<()> {
    let algorithm: Algorithm = algorithm_name
        .parse()
        .with_context(|| "valid algorithms: rle, huffman")?;

    let raw = fs::read(&input).with_context(|| format!("reading input file {:?}", input))?;
    let (container, stats) = compress(&raw, algorithm)?;
    fs::write(&output, &container)
        .with_context(|| format!("writing output file {:?}", output))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        eprintln!("  algorithm   : {}", algorithm);
        eprintln!("  original    : {}", human_bytes(stats.original_size));
        eprintln!("  compressed  : {}", human_bytes(stats.compressed_size));
        eprintln!("  ratio       : {:.2}x", stats.compression_ratio);
        eprintln!("  elapsed     : {:.4}s", stats.processing_time);
    }
    Ok(())
}

fn run_decompress(input: PathBuf, output: PathBuf, json: bool) -> anyhow::Result<()> {
    let container =
        fs::read(&input).with_context(|| format!("reading container file {:?}", input))?;
    let (raw, elapsed) = decompress(&container)?;
    fs::write(&output, &raw).with_context(|| format!("writing output file {:?}", output))?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "processing_time": elapsed.as_secs_f64() })
        );
    } else {
        eprintln!("  original    : {}", human_bytes(raw.len() as u64));
        eprintln!("  elapsed     : {:.4}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn run_inspect(file: PathBuf) -> anyhow::Result<()> {
    let container =
        fs::read(&file).with_context(|| format!("reading container file {:?}", file))?;
    let (header, metadata, payload) = split_container(&container)?;
    let codec = codec_by_id(header.algorithm_id)?;

    println!("=== bytepress container: {:?} ===", file);
    println!();
    println!(
        "  algorithm       : {} (id={})",
        codec.name(),
        header.algorithm_id
    );
    println!(
        "  original length : {}",
        human_bytes(header.original_length)
    );
    println!("  metadata        : {}", human_bytes(metadata.len() as u64));
    println!("  payload         : {}", human_bytes(payload.len() as u64));
    println!(
        "  container       : {} ({} header)",
        human_bytes(container.len() as u64),
        human_bytes(HEADER_SIZE as u64)
    );
    if header.original_length > 0 {
        println!(
            "  ratio           : {:.2}x",
            header.original_length as f64 / container.len() as f64
        );
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            input,
            output,
            algorithm,
            json,
        } => run_compress(input, output, &algorithm, json),
        Commands::Decompress {
            input,
            output,
            json,
        } => run_decompress(input, output, json),
        Commands::Inspect { file } => run_inspect(file),
    }
}
