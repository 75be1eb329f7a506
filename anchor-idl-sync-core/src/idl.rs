//! Read-modify-write of per-program IDL JSON files.
//!
//! Only the `address` and `keypair` keys are touched. Everything else in
//! the document, including key order, is written back as it was read.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::address::Address;
use crate::error::{Result, SyncError};
use crate::keypair::Keypair;

pub const ADDRESS_KEY: &str = "address";
pub const KEYPAIR_KEY: &str = "keypair";

/// What happened to the `address` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressChange {
    Added,
    Unchanged,
    Updated { previous: String },
}

/// What happened to the `keypair` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypairChange {
    Embedded,
    Removed,
    Absent,
}

/// Outcome of synchronizing one IDL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub path: PathBuf,
    pub address: AddressChange,
    pub keypair: KeypairChange,
    /// False on a dry run.
    pub written: bool,
}

/// Directory of `<program>.json` IDL files.
#[derive(Debug, Clone)]
pub struct IdlStore {
    dir: PathBuf,
    dry_run: bool,
}

impl IdlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dry_run: false,
        }
    }

    pub fn dry_run(self, dry_run: bool) -> Self {
        Self { dry_run, ..self }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, program: &str) -> PathBuf {
        self.dir.join(format!("{}.json", program))
    }

    /// Set `address`, and embed or strip `keypair`, in the program's IDL file.
    pub fn synchronize(
        &self,
        program: &str,
        address: &Address,
        keypair: Option<&Keypair>,
    ) -> Result<SyncReport> {
        let path = self.path_for(program);
        if !path.is_file() {
            return Err(SyncError::FileNotFound { path });
        }

        let contents = fs::read_to_string(&path).map_err(|e| SyncError::io(&path, e))?;
        let mut idl: Map<String, Value> = match serde_json::from_str(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(SyncError::MalformedIdl {
                    path,
                    message: "top-level value is not a JSON object".to_string(),
                })
            }
            Err(e) => {
                return Err(SyncError::MalformedIdl {
                    path,
                    message: e.to_string(),
                })
            }
        };

        let (address_change, keypair_change) = apply(&mut idl, address, keypair);

        if !self.dry_run {
            let mut rendered = serde_json::to_string_pretty(&Value::Object(idl)).map_err(|e| {
                SyncError::MalformedIdl {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?;
            rendered.push('\n');
            fs::write(&path, rendered).map_err(|e| SyncError::io(&path, e))?;
        }

        Ok(SyncReport {
            path,
            address: address_change,
            keypair: keypair_change,
            written: !self.dry_run,
        })
    }
}

/// Apply the address/keypair update to an IDL object in place.
pub fn apply(
    idl: &mut Map<String, Value>,
    address: &Address,
    keypair: Option<&Keypair>,
) -> (AddressChange, KeypairChange) {
    let address_change = match idl.get(ADDRESS_KEY) {
        Some(Value::String(current)) if current == address.as_str() => AddressChange::Unchanged,
        Some(Value::String(current)) if !current.is_empty() => AddressChange::Updated {
            previous: current.clone(),
        },
        _ => AddressChange::Added,
    };
    idl.insert(
        ADDRESS_KEY.to_string(),
        Value::String(address.to_string()),
    );

    let keypair_change = match keypair {
        Some(keypair) => {
            let bytes = keypair.as_bytes().iter().map(|b| Value::from(*b)).collect();
            idl.insert(KEYPAIR_KEY.to_string(), Value::Array(bytes));
            KeypairChange::Embedded
        }
        None => match idl.shift_remove(KEYPAIR_KEY) {
            Some(_) => KeypairChange::Removed,
            None => KeypairChange::Absent,
        },
    };

    (address_change, keypair_change)
}
