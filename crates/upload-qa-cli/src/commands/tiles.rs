//! Tiles command - print the analysis regions for a given image size.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use upload_qa_core::modules::TileGrid;

/// Arguments for the tiles command.
#[derive(Args, Clone)]
pub struct TilesArgs {
    /// Image width in pixels
    #[arg(long)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long)]
    pub height: u32,
}

/// Writes one JSON object per region, column-major, to stdout.
pub fn run(args: &TilesArgs) -> Result<()> {
    let stdout = io::stdout();
    write_regions(args, &mut stdout.lock())
}

fn write_regions(args: &TilesArgs, writer: &mut impl Write) -> Result<()> {
    let grid = TileGrid::new(args.width, args.height);
    tracing::debug!(
        "{}x{} splits into {} regions",
        args.width,
        args.height,
        grid.len()
    );
    for region in grid.regions() {
        writeln!(writer, "{}", serde_json::to_string(&region)?)?;
    }
    writer.flush()?;
    Ok(())
}
