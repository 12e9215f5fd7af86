use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ninebit_disasm::{disassemble, load_machine_code, render_listing};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble a ninebit machine-code listing", long_about = None)]
struct Cli {
    /// Machine code file (one 9-bit binary string per line)
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let img = load_machine_code(&cli.input)?;
    let report = disassemble(&img);
    for bad in &report.invalid {
        tracing::warn!(line = bad.line, text = %bad.text, "not a 9-bit word, skipped");
    }

    let buf = match cli.format {
        OutputFormat::Text => render_listing(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };
    if let Some(path) = cli.out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
    let bad = img.invalid_count();
    anyhow::ensure!(bad == 0, "{bad} line(s) in {} are not 9-bit words", cli.input.display());
    Ok(())
}
