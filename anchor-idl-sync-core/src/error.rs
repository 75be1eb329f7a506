//! Structured error types for the address/IDL sync pipeline.
//!
//! Every failure the pipeline can hit is a variant here. Callers decide
//! whether to skip the current program or stop the run with
//! [`SyncError::is_fatal`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the pipeline.
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

/// Structured error type for address extraction and IDL synchronization.
///
/// # Example
/// ```rust
/// use anchor_idl_sync_core::error::SyncError;
///
/// let err = SyncError::KeypairMismatch {
///     expected: "Prog1111".into(),
///     actual: "Key2222".into(),
/// };
/// assert!(err.is_fatal());
/// ```
#[derive(Error, Debug)]
pub enum SyncError {
    /// External executable could not be launched
    #[error("Required tool not available: {tool}")]
    ToolUnavailable {
        tool: String,
    },

    /// External executable ran but exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    ToolExecution {
        command: String,
        status: String,
        stderr: String,
    },

    /// No public key literal could be located in the expanded source
    #[error("Failed to extract pubkey from expand output for {program}")]
    Parse {
        program: String,
    },

    /// Keypair file is not a JSON array of 64 bytes
    #[error("Invalid keypair format in {}: {reason}", path.display())]
    InvalidKeypairFormat {
        path: PathBuf,
        reason: String,
    },

    /// Keypair public key does not match the program address
    #[error("Keypair mismatch: expected {expected}, got {actual}")]
    KeypairMismatch {
        expected: String,
        actual: String,
    },

    /// IDL file for a program does not exist
    #[error("IDL file not found: {}", path.display())]
    FileNotFound {
        path: PathBuf,
    },

    /// IDL file exists but is not a JSON object
    #[error("Malformed IDL file {}: {message}", path.display())]
    MalformedIdl {
        path: PathBuf,
        message: String,
    },

    /// Read or write failure on a file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configured IDL directory does not exist
    #[error("IDL directory not found: {}", path.display())]
    IdlDirNotFound {
        path: PathBuf,
    },

    /// The program enumerator returned nothing
    #[error("No programs found from anchor keys list")]
    NoProgramsFound,
}

impl SyncError {
    /// Wrap an `io::Error` together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must stop the whole run when it comes out of a
    /// single program's processing.
    ///
    /// Only a keypair mismatch qualifies: every other per-program failure
    /// is logged and the program skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::KeypairMismatch { .. })
    }
}
