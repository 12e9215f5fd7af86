use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use ninebit_asm::{assemble, AsmConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble 9-bit ISA source into machine code and LUT images")]
struct Opts {
    /// Input assembly file (one label or instruction per line)
    #[arg(value_name = "SRCFILE")]
    input: PathBuf,
    /// Machine code output (default: <stem>_machinecode.txt)
    #[arg(long, value_name = "FILE")]
    machine: Option<PathBuf>,
    /// Debug ROM listing output (default: <stem>_rom_content.sv)
    #[arg(long, value_name = "FILE")]
    debug: Option<PathBuf>,
    /// Jump-table $readmemb image (default: <stem>_lut.mem)
    #[arg(long, value_name = "FILE")]
    lut: Option<PathBuf>,
    /// Jump-table initial block (default: <stem>_fetch_lut.sv)
    #[arg(long, value_name = "FILE")]
    lut_init: Option<PathBuf>,
    /// Assembler settings as JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Fail on any warning
    #[arg(long)]
    warnings_as_errors: bool,
}

fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    input.with_file_name(format!("{stem}{suffix}"))
}

fn load_config(path: Option<&Path>) -> Result<AsmConfig> {
    let Some(path) = path else { return Ok(AsmConfig::default()) };
    let txt = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(serde_json::from_str::<AsmConfig>(&txt).with_context(|| format!("parsing {}", path.display()))?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let mut cfg = load_config(opts.config.as_deref())?;
    cfg.warnings_as_errors |= opts.warnings_as_errors;

    let src = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;

    let asm = match assemble(&src, &cfg) {
        Ok(asm) => asm,
        Err(err) => {
            for d in err.diagnostics() {
                eprintln!("{d}");
            }
            bail!("{}: {err}; no output written", opts.input.display());
        }
    };
    for d in &asm.diagnostics {
        eprintln!("{d}");
    }

    let art = asm.artifacts();
    let outputs = [
        (opts.machine.unwrap_or_else(|| sibling(&opts.input, "_machinecode.txt")), &art.machine_code),
        (opts.debug.unwrap_or_else(|| sibling(&opts.input, "_rom_content.sv")), &art.debug_listing),
        (opts.lut.unwrap_or_else(|| sibling(&opts.input, "_lut.mem")), &art.lut_mem),
        (opts.lut_init.unwrap_or_else(|| sibling(&opts.input, "_fetch_lut.sv")), &art.lut_init),
    ];
    for (path, body) in &outputs {
        fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = body.len(), "wrote");
    }

    println!("-> Done. Generated {} instructions.", asm.instructions.len());
    Ok(())
}
