//! # Anchor IDL Sync Core
//!
//! Pure building blocks for syncing program ids into Anchor IDL files:
//! pubkey extraction from expanded source, keypair validation and the
//! IDL read-modify-write. Nothing here spawns processes.

pub mod address;
pub mod error;
pub mod extract;
pub mod idl;
pub mod keypair;

pub mod prelude {
    pub use crate::address::Address;
    pub use crate::error::{Result, SyncError};
    pub use crate::extract::{
        AddressExtractor, ArrayLiteralMatcher, ExtractedAddress, PubkeyMatcher,
    };
    pub use crate::idl::{AddressChange, IdlStore, KeypairChange, SyncReport};
    pub use crate::keypair::Keypair;
}
