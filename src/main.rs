//! CLI entry point for the block-mean transform and analysis tool

use bigpixels::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> bigpixels::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
