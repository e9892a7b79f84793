// cli.rs - Command-line interface for working with scene files
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-editor")]
#[command(about = "Scene editor save-file tools", long_about = None)]
pub struct Cli {
    /// JSON editor config; defaults are used when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write the starting scene (ground, two lights, one mesh) to a file
    Init {
        file: PathBuf,
        /// Seed for the random starter mesh and textures
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the camera, light spread and objects stored in a file
    Inspect { file: PathBuf },
    /// Print the save file path of every configured slot
    Slots,
}
