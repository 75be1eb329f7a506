//! Sync program addresses from an Anchor workspace into its IDL files.
//!
//! Provides:
//! - CLI argument definitions and run options
//! - Logger setup
//! - The `anchor` / `cargo expand` toolchain seam
//! - The pipeline that ties extraction, keypair checks and IDL writes together
//!
//! The `anchor-idl-sync` binary is a thin wrapper over [`pipeline::Pipeline`].

pub mod cli;
pub mod logging;
pub mod pipeline;
pub mod toolchain;
