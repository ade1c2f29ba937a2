use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cp_compactor::{CompressionResult, Compressor, QualityMetrics};
use cp_core::{CompressorConfig, StatisticalFilterConfig};

/// Statistical prompt compression: drop low-information words, keep code, identifiers and negations.
#[derive(Parser, Debug)]
#[command(name = "cp-compress", version)]
struct Cli {
    /// Input file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Fraction of words to keep, in (0, 1].
    #[arg(short, long)]
    ratio: Option<f64>,

    /// Minimum input size in bytes.
    #[arg(long)]
    min_bytes: Option<usize>,

    /// Minimum input size in whitespace tokens.
    #[arg(long)]
    min_tokens: Option<usize>,

    /// Extra domain term to keep verbatim. Repeatable.
    #[arg(short = 'd', long = "domain-term")]
    domain_terms: Vec<String>,

    /// Disable structural protection (code, JSON, URLs, paths, identifiers).
    #[arg(long)]
    no_protection: bool,

    /// JSON config file with optional `compressor` and `filter` sections.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print token statistics and quality metrics to stderr.
    #[arg(short, long)]
    stats: bool,

    /// Print the full result as JSON.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    compressor: CompressorConfig,
    filter: StatisticalFilterConfig,
}

impl FileConfig {
    /// Defaults for command-line use: small inputs are accepted.
    fn cli_defaults() -> Self {
        Self {
            compressor: CompressorConfig::default().with_min_input_bytes(100).with_min_input_tokens(10),
            filter: StatisticalFilterConfig::default(),
        }
    }

    fn load(path: &PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cp_compress=debug,cp_compactor=debug")
    } else {
        EnvFilter::new("cp_compress=info,cp_compactor=warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let FileConfig { mut compressor, mut filter } = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::cli_defaults(),
    };

    if let Some(ratio) = cli.ratio {
        compressor = compressor.with_target_ratio(ratio);
        filter = filter.with_ratio(ratio);
    }
    if let Some(bytes) = cli.min_bytes {
        compressor = compressor.with_min_input_bytes(bytes);
    }
    if let Some(tokens) = cli.min_tokens {
        compressor = compressor.with_min_input_tokens(tokens);
    }
    if cli.no_protection {
        filter = filter.with_protection_masks(false);
    }
    filter = filter.with_domain_terms(cli.domain_terms);
    filter.validate()?;

    let input = read_input(cli.input.as_ref())?;
    tracing::debug!(bytes = input.len(), ratio = compressor.target_ratio, "compressing");

    let result = Compressor::with_filter_config(compressor, filter).compress_bytes(&input)?;

    let rendered = if cli.json {
        serde_json::to_string_pretty(&result)?
    } else {
        result.compressed.clone()
    };
    write_output(cli.output.as_ref(), &rendered)?;

    if cli.stats {
        print_stats(&input, &result);
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(p) => fs::read(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, text: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, text).with_context(|| format!("writing {}", p.display()))?;
            tracing::info!(path = %p.display(), "output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}

fn print_stats(input: &[u8], result: &CompressionResult) {
    let original = String::from_utf8_lossy(input);
    let quality = QualityMetrics::calculate(&original, &result.compressed);
    eprintln!("Original tokens:   {}", result.original_tokens);
    eprintln!("Compressed tokens: {}", result.compressed_tokens);
    eprintln!("Tokens removed:    {}", result.tokens_removed);
    eprintln!("Compression ratio: {:.3}", result.compression_ratio);
    eprintln!("Savings:           {:.1}%", result.savings_pct());
    eprintln!("Protected words:   {}", result.protected_words);
    eprintln!("{}", quality.format());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "cp-compress", "in.txt", "-r", "0.3", "-d", "Kestrel", "--domain-term", "Moraine", "-s", "--json",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.ratio, Some(0.3));
        assert_eq!(cli.domain_terms, vec!["Kestrel", "Moraine"]);
        assert!(cli.stats && cli.json && !cli.no_protection);
    }

    #[test]
    fn test_partial_file_config() {
        let cfg: FileConfig = serde_json::from_str(r#"{"filter": {"compression_ratio": 0.4}}"#).unwrap();
        assert_eq!(cfg.filter.compression_ratio, 0.4);
        assert!(cfg.filter.enable_protection_masks);
        assert_eq!(cfg.compressor, CompressorConfig::default());
    }

    #[test]
    fn test_cli_defaults_accept_small_inputs() {
        let cfg = FileConfig::cli_defaults();
        assert_eq!(cfg.compressor.min_input_bytes, 100);
        assert_eq!(cfg.compressor.min_input_tokens, 10);
    }
}
