use std::path::PathBuf;

use clap::Parser;

/// A reactive tiling controller for stacking window managers.
#[derive(Parser, Debug)]
#[command(name = "retile", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
