//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::toolchain::ToolchainConfig;

#[derive(Parser, Debug)]
#[command(name = "anchor-idl-sync")]
#[command(about = "Sync program addresses from expanded macros into Anchor IDL files")]
#[command(long_about = "Extract program addresses from expanded macros and update IDL files, \
    optionally embedding a matching keypair")]
pub struct Cli {
    /// Keypair JSON file whose public key must match each program address
    #[arg(long, env = "ANCHOR_IDL_SYNC_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Directory holding <program>.json IDL files
    #[arg(long, env = "ANCHOR_IDL_SYNC_IDL_DIR", default_value = "target/idl")]
    pub idl_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Report changes without writing IDL files
    #[arg(long)]
    pub dry_run: bool,

    /// Anchor CLI executable
    #[arg(long, default_value = "anchor")]
    pub anchor_bin: String,

    /// Cargo executable (needs the cargo-expand subcommand)
    #[arg(long, default_value = "cargo")]
    pub cargo_bin: String,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Options {
    pub idl_dir: PathBuf,
    pub keypair: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
    pub toolchain: ToolchainConfig,
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            idl_dir: cli.idl_dir,
            keypair: cli.keypair,
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            toolchain: ToolchainConfig {
                anchor: cli.anchor_bin,
                cargo: cli.cargo_bin,
            },
        }
    }
}

impl Options {
    pub fn new(idl_dir: impl Into<PathBuf>) -> Self {
        Self {
            idl_dir: idl_dir.into(),
            keypair: None,
            verbose: false,
            dry_run: false,
            toolchain: ToolchainConfig::default(),
        }
    }

    pub fn keypair(self, keypair: impl Into<PathBuf>) -> Self {
        Self {
            keypair: Some(keypair.into()),
            ..self
        }
    }

    pub fn dry_run(self, dry_run: bool) -> Self {
        Self { dry_run, ..self }
    }
}
