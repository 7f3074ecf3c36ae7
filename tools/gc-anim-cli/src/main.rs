//! gc-anim - GameCube skeletal animation tool
//!
//! # Commands
//!
//! - `gc-anim extract` - Write every animation in an .anm bundle as .dca/.dck
//! - `gc-anim convert` - Convert an .anm bundle to .bca/.bck files
//! - `gc-anim info` - Summarize any supported animation file
//! - `gc-anim pack` - Build an .anm bundle from .dca/.dck files
//! - `gc-anim build` - Run the batch described by a gc-anim.toml manifest
//!
//! # Usage
//!
//! ```bash
//! # Convert with rotations folded into [-180, 180] and doubled translations
//! gc-anim convert enemy.anm -o out/ --clamp 180 --scale 2
//!
//! # Inspect the result
//! gc-anim info out/walk.bck
//! ```

mod build;
mod convert;
mod extract;
mod files;
mod info;
mod manifest;
mod pack;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// gc-anim - GameCube skeletal animation tool
#[derive(Parser)]
#[command(name = "gc-anim")]
#[command(about = "Extract, convert and pack GameCube skeletal animations")]
#[command(version)]
struct Cli {
    /// Verbose output (per-section details)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write each animation of an .anm bundle as .dca/.dck
    Extract(extract::ExtractArgs),

    /// Convert each animation of an .anm bundle to .bca/.bck
    Convert(convert::ConvertArgs),

    /// Summarize a .bca, .bck, .dca, .dck or .anm file
    Info(info::InfoArgs),

    /// Bundle .dca/.dck files into an .anm
    Pack(pack::PackArgs),

    /// Run every job of a gc-anim.toml manifest
    Build(build::BuildArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Extract(args) => extract::execute(args),
        Commands::Convert(args) => convert::execute(args),
        Commands::Info(args) => info::execute(args),
        Commands::Pack(args) => pack::execute(args),
        Commands::Build(args) => build::execute(args),
    }
}
