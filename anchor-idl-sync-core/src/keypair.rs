//! Solana CLI keypair files: a JSON array of 64 bytes, secret scalar first,
//! public key last.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::address::{Address, PUBKEY_LEN};
use crate::error::{Result, SyncError};

pub const KEYPAIR_LEN: usize = 64;

/// A validated 64-byte keypair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Keypair([u8; KEYPAIR_LEN]);

impl TryFrom<Vec<u8>> for Keypair {
    type Error = String;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let len = bytes.len();
        bytes
            .try_into()
            .map(Keypair)
            .map_err(|_| format!("expected {} bytes, got {}", KEYPAIR_LEN, len))
    }
}

impl From<Keypair> for Vec<u8> {
    fn from(keypair: Keypair) -> Self {
        keypair.0.to_vec()
    }
}

impl Keypair {
    /// Read a keypair file.
    ///
    /// A missing file is `Ok(None)`; anything that is not a JSON array of
    /// exactly 64 integers in `0..=255` is `InvalidKeypairFormat`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Self::from_json(&contents)
            .map(Some)
            .map_err(|reason| SyncError::InvalidKeypairFormat {
                path: path.to_path_buf(),
                reason,
            })
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn as_bytes(&self) -> &[u8; KEYPAIR_LEN] {
        &self.0
    }

    /// The trailing 32 bytes.
    pub fn public_key(&self) -> [u8; PUBKEY_LEN] {
        let mut pubkey = [0u8; PUBKEY_LEN];
        pubkey.copy_from_slice(&self.0[KEYPAIR_LEN - PUBKEY_LEN..]);
        pubkey
    }

    pub fn address(&self) -> Address {
        Address::from_pubkey_bytes(&self.public_key())
    }

    /// Check that this keypair belongs to the program at `expected`.
    pub fn verify(&self, expected: &Address) -> Result<()> {
        let actual = self.address();
        if &actual != expected {
            return Err(SyncError::KeypairMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }
}
