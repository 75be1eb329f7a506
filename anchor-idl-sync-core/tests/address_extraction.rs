//! Pubkey extraction from `cargo expand` output.

use anchor_idl_sync_core::address::{decode_pubkey, Address};
use anchor_idl_sync_core::error::SyncError;
use anchor_idl_sync_core::extract::{AddressExtractor, ArrayLiteralMatcher, PubkeyMatcher};

const SEQUENTIAL_ADDRESS: &str = "4wBqpZM9xaSheZzJSMawUKKwhdpChKbZ5eu5ky4Vigw";

fn byte_literals(bytes: impl IntoIterator<Item = u32>) -> String {
    bytes
        .into_iter()
        .map(|b| format!("{}u8", b))
        .collect::<Vec<_>>()
        .join(",\n        ")
}

fn expanded_source(constructor: &str, literals: &str) -> String {
    format!(
        r#"#![feature(prelude_import)]
use anchor_lang::prelude::*;
/// The static program ID
pub static ID: anchor_lang::solana_program::pubkey::Pubkey = {}([
        {},
    ]);
/// Const version of `ID`
pub const ID_CONST: anchor_lang::solana_program::pubkey::Pubkey = ID;
pub fn check_id(id: &anchor_lang::solana_program::pubkey::Pubkey) -> bool {{
    id == &ID
}}
"#,
        constructor, literals
    )
}

#[test]
fn fully_qualified_constructor_with_32_bytes() {
    let source = expanded_source(
        "anchor_lang::solana_program::pubkey::Pubkey::new_from_array",
        &byte_literals(1..=32),
    );
    let extractor = AddressExtractor::default();
    let extracted = extractor.extract("alpha", &source).unwrap();
    assert_eq!(extracted.address.as_str(), SEQUENTIAL_ADDRESS);
    assert_eq!(extracted.matcher, "fully-qualified");
}

#[test]
fn short_path_constructor_is_accepted() {
    let source = expanded_source("Pubkey::new_from_array", &byte_literals(1..=32));
    let extractor = AddressExtractor::default();

    let (matcher, bytes) = extractor.find_pubkey(&source).unwrap();
    assert_eq!(matcher, "short-path");
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes[31], 32);
    assert_eq!(
        extractor.extract("alpha", &source).unwrap().address.as_str(),
        SEQUENTIAL_ADDRESS
    );
}

#[test]
fn fully_qualified_matcher_is_tried_first() {
    let source = expanded_source(
        "anchor_lang::solana_program::pubkey::Pubkey::new_from_array",
        &byte_literals(1..=32),
    );
    let extractor = AddressExtractor::default();
    let (matcher, _) = extractor.find_pubkey(&source).unwrap();
    assert_eq!(matcher, "fully-qualified");
}

#[test]
fn wrong_byte_counts_are_parse_errors() {
    let extractor = AddressExtractor::default();
    for count in [31u32, 33] {
        let source = expanded_source(
            "anchor_lang::solana_program::pubkey::Pubkey::new_from_array",
            &byte_literals(1..=count),
        );
        match extractor.extract("beta", &source) {
            Err(SyncError::Parse { program }) => assert_eq!(program, "beta"),
            other => panic!("{} literals: expected parse error, got {:?}", count, other),
        }
    }
}

#[test]
fn out_of_range_literal_is_rejected() {
    let mut values: Vec<u32> = (1..=32).collect();
    values[5] = 256;
    let source = expanded_source("Pubkey::new_from_array", &byte_literals(values));
    assert!(AddressExtractor::default().find_pubkey(&source).is_none());
}

#[test]
fn source_without_program_id_is_a_parse_error() {
    let source = "pub fn entry() {}\nconst X: [u8; 2] = [1u8, 2u8];\n";
    let err = AddressExtractor::default().extract("gamma", source).unwrap_err();
    assert!(matches!(err, SyncError::Parse { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn custom_matchers_run_after_builtins() {
    struct Fixed;
    impl PubkeyMatcher for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn find_pubkey(&self, source: &str) -> Option<[u8; 32]> {
            source.contains("declare_program_id").then_some([0u8; 32])
        }
    }

    let extractor = AddressExtractor::default().with_matcher(Fixed);
    assert_eq!(
        extractor.matcher_names(),
        vec!["fully-qualified", "short-path", "fixed"]
    );
    let extracted = extractor.extract("zero", "declare_program_id!()").unwrap();
    assert_eq!(extracted.matcher, "fixed");
    assert_eq!(extracted.address.as_str(), "11111111111111111111111111111111");
}

#[test]
fn matcher_for_custom_constructor_path() {
    let matcher = ArrayLiteralMatcher::for_constructor(
        "solana-program",
        "solana_program::pubkey::Pubkey::new_from_array",
    )
    .unwrap();
    let source = expanded_source(
        "solana_program::pubkey::Pubkey::new_from_array",
        &byte_literals(1..=32),
    );
    assert_eq!(matcher.name(), "solana-program");
    let bytes = matcher.find_pubkey(&source).unwrap();
    assert_eq!(bytes[..4], [1u8, 2, 3, 4]);
}

#[test]
fn base58_round_trip() {
    let bytes: [u8; 32] = std::array::from_fn(|i| (i * 7 % 256) as u8);
    let address = Address::from_pubkey_bytes(&bytes);
    assert_eq!(address.as_str(), "17EtdeMwcxWvuEN3yCfYAowtnyHhRSRxhuhAeTEEhZa");
    assert_eq!(address.decode().unwrap(), bytes);

    let all_ones = Address::from_pubkey_bytes(&[255u8; 32]);
    assert_eq!(decode_pubkey(all_ones.as_str()).unwrap(), [255u8; 32]);
}

#[test]
fn decode_rejects_wrong_length() {
    assert!(decode_pubkey("111").is_err());
    assert!(decode_pubkey("0OIl").is_err());
}
