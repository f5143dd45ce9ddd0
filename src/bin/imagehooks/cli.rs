use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for inspecting handler manifests and chain allocation
#[derive(Parser, Debug)]
#[command(name = "imagehooks", version, about = "ImageHooks CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Show which manifest entry a filename routes to (does not run it)
    Resolve {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        file: String,
        /// Resolve against save handlers instead of load handlers
        #[arg(long)]
        save: bool,
    },
    /// Run the handler a filename routes to
    Dispatch {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        file: String,
        #[arg(long)]
        save: bool,
        #[arg(long)]
        json: bool,
    },
    /// List registered extensions per direction, in scan order
    List {
        #[arg(long)]
        manifest: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Build mipmap/frame chains on the default image and report lengths
    Chain {
        #[arg(long, default_value_t = 0)]
        mips: usize,
        #[arg(long, default_value_t = 0)]
        frames: usize,
        /// Live node budget (0 = unlimited). Without the flag IH_NODE_BUDGET applies.
        #[arg(long)]
        budget: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}
