//! unmasm - print MASM-style disassembly listings
//!
//! Usage:
//!   unmasm <function.json>                  List the whole function
//!   unmasm <function.json> -a <address>     Print one instruction line
//!   unmasm <function.json> --labels <file>  Resolve addresses to names

mod input;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use unmasm_core::{parse_address, LabelMap};
use unmasm_render::{FunctionRenderer, InstructionRenderer, ListingOptions};

use crate::input::{load_labels, FunctionFile};

#[derive(Parser)]
#[command(name = "unmasm")]
#[command(about = "Print MASM-style disassembly listings", long_about = None)]
struct Cli {
    /// Path to the serialized function (JSON)
    input: PathBuf,

    /// Label file mapping hex addresses to names (JSON object)
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Maximum raw bytes shown per instruction (0 hides the dump)
    #[arg(short = 'b', long, default_value = "8")]
    max_bytes: usize,

    /// Do not separate blocks with blank lines
    #[arg(long)]
    no_block_lines: bool,

    /// Show why each block exists
    #[arg(short, long)]
    reasons: bool,

    /// Print only the instruction at this address
    #[arg(short, long, value_parser = parse_hex)]
    address: Option<u64>,
}

fn parse_hex(s: &str) -> Result<u64, String> {
    parse_address(s).ok_or_else(|| format!("invalid hex address: {}", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let function = FunctionFile::load(&cli.input)?;
    let labels = merged_labels(&function, cli.labels.as_deref())?;
    let options = ListingOptions::default()
        .with_max_bytes(cli.max_bytes)
        .with_block_lines(!cli.no_block_lines)
        .with_reasons(cli.reasons);

    if let Some(address) = cli.address {
        let Some(inst) = function.instruction_at(address) else {
            bail!("no instruction at {:#x}", address);
        };
        let line = InstructionRenderer::new(&labels, options.max_bytes).render(inst)?;
        println!("{}", line);
        return Ok(());
    }

    let cfg = function.to_cfg()?;
    let listing = FunctionRenderer::new(&labels, options)
        .render(&cfg)
        .with_context(|| format!("Failed to render function {}", display_name(&function)))?;
    print!("{}", listing);
    Ok(())
}

/// Function-local labels first; the label file overrides them.
fn merged_labels(function: &FunctionFile, path: Option<&std::path::Path>) -> Result<LabelMap> {
    let mut labels = function.labels.clone();
    if let Some(path) = path {
        for (address, name) in load_labels(path)?.iter() {
            labels.insert(address, name);
        }
    }
    Ok(labels)
}

fn display_name(function: &FunctionFile) -> String {
    if function.name.is_empty() {
        function.blocks.first().map_or_else(
            || "<empty>".to_string(),
            |b| format!("at {:#x}", b.start),
        )
    } else {
        function.name.clone()
    }
}
