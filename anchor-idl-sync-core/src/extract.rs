//! Recover a program's public key from `cargo expand` output.
//!
//! `declare_id!` expands to a `pub static ID: Pubkey = ...new_from_array([..])`
//! item. How much of the constructor path is spelled out depends on the
//! Anchor and cargo-expand versions, so each known spelling is a separate
//! [`PubkeyMatcher`] and [`AddressExtractor`] tries them in order.

use regex::Regex;

use crate::address::{Address, PUBKEY_LEN};
use crate::error::{Result, SyncError};

/// Turns expanded source text into the raw bytes of the program id.
pub trait PubkeyMatcher {
    /// Short label used in diagnostics.
    fn name(&self) -> &str;

    /// Return the 32 key bytes, or `None` when this matcher does not apply.
    fn find_pubkey(&self, source: &str) -> Option<[u8; PUBKEY_LEN]>;
}

/// Matches `pub static ID: ... <path>::new_from_array([Nu8, ...]);` and
/// reads the `u8`-suffixed literals inside the brackets.
#[derive(Debug, Clone)]
pub struct ArrayLiteralMatcher {
    name: String,
    declaration: Regex,
    byte_literal: Regex,
}

impl ArrayLiteralMatcher {
    /// Build a matcher for the given constructor path, e.g. `Pubkey::new_from_array`.
    pub fn for_constructor(
        name: impl Into<String>,
        constructor: &str,
    ) -> Result<Self, regex::Error> {
        let declaration = Regex::new(&format!(
            r"(?s)pub static ID:.*?{}\(\[(.*?)\]\);",
            regex::escape(constructor)
        ))?;
        let byte_literal = Regex::new(r"(\d+)u8")?;
        Ok(Self {
            name: name.into(),
            declaration,
            byte_literal,
        })
    }

    /// `anchor_lang::solana_program::pubkey::Pubkey::new_from_array`
    pub fn fully_qualified() -> Self {
        Self::for_constructor(
            "fully-qualified",
            "anchor_lang::solana_program::pubkey::Pubkey::new_from_array",
        )
        .expect("constructor pattern is a valid regex")
    }

    /// `Pubkey::new_from_array`
    pub fn short_path() -> Self {
        Self::for_constructor("short-path", "Pubkey::new_from_array")
            .expect("constructor pattern is a valid regex")
    }
}

impl PubkeyMatcher for ArrayLiteralMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_pubkey(&self, source: &str) -> Option<[u8; PUBKEY_LEN]> {
        let literal = self.declaration.captures(source)?.get(1)?.as_str();

        let mut bytes = Vec::with_capacity(PUBKEY_LEN);
        for caps in self.byte_literal.captures_iter(literal) {
            bytes.push(caps[1].parse::<u8>().ok()?);
        }
        bytes.try_into().ok()
    }
}

/// A program id recovered from expanded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAddress<'a> {
    /// Name of the matcher that found the key.
    pub matcher: &'a str,
    pub address: Address,
}

/// Ordered set of matchers; the first one that yields 32 bytes wins.
pub struct AddressExtractor {
    matchers: Vec<Box<dyn PubkeyMatcher>>,
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::empty()
            .with_matcher(ArrayLiteralMatcher::fully_qualified())
            .with_matcher(ArrayLiteralMatcher::short_path())
    }
}

impl AddressExtractor {
    pub fn empty() -> Self {
        Self { matchers: vec![] }
    }

    /// Append a matcher; it is tried after all existing ones.
    pub fn with_matcher(mut self, matcher: impl PubkeyMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn matcher_names(&self) -> Vec<&str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Run the matchers in order. Returns the winning matcher's name with the bytes.
    pub fn find_pubkey(&self, source: &str) -> Option<(&str, [u8; PUBKEY_LEN])> {
        self.matchers
            .iter()
            .find_map(|m| m.find_pubkey(source).map(|bytes| (m.name(), bytes)))
    }

    /// Extract and base58-encode the program id of `program` from its expanded source.
    pub fn extract(&self, program: &str, source: &str) -> Result<ExtractedAddress<'_>> {
        self.find_pubkey(source)
            .map(|(matcher, bytes)| ExtractedAddress {
                matcher,
                address: Address::from_pubkey_bytes(&bytes),
            })
            .ok_or_else(|| SyncError::Parse {
                program: program.to_string(),
            })
    }
}
