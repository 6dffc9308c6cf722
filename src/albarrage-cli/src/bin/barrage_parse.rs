//! Exports the per-entity parsed-barrage index.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "barrage-parse")]
#[command(about = "Export parsed barrage data keyed by ship/equipment/augment name")]
struct Cli {
    /// Output file path
    #[arg(default_value = "output/data.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    albarrage::pipeline::export_parsed(Path::new("."), &cli.output)?;
    Ok(())
}
