//! Base58 program addresses.

use base58::{FromBase58, ToBase58};
use std::fmt;

/// Length in bytes of an ed25519 public key.
pub const PUBKEY_LEN: usize = 32;

/// A base58-encoded 32-byte public key identifying a program.
///
/// Always produced from raw bytes, never parsed from user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn from_pubkey_bytes(bytes: &[u8; PUBKEY_LEN]) -> Self {
        Address(bytes.to_base58())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into the raw public key.
    pub fn decode(&self) -> Result<[u8; PUBKEY_LEN], String> {
        decode_pubkey(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decode a base58 string that must hold exactly 32 bytes.
pub fn decode_pubkey(input: &str) -> Result<[u8; PUBKEY_LEN], String> {
    let bytes = input
        .from_base58()
        .map_err(|e| format!("Invalid base58 '{}': {:?}", input, e))?;
    if bytes.len() != PUBKEY_LEN {
        return Err(format!(
            "Base58 decoded to {} bytes, expected {}",
            bytes.len(),
            PUBKEY_LEN
        ));
    }
    let mut arr = [0u8; PUBKEY_LEN];
    arr.copy_from_slice(&bytes);
    Ok(arr)
}
