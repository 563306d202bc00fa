//! The signing domain: what binds an ask signature to one deployment.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use artmarket_types::{constants, Address};

/// Domain separator inputs: protocol name, version, chain, and the
/// settlement contract the signature is addressed to.
///
/// Client and settlement processor must agree on all four fields or
/// signatures will not verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl SignDomain {
    /// The canonical ArtMarket domain for a given deployment.
    #[must_use]
    pub fn artmarket(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: constants::PROTOCOL_NAME.to_string(),
            version: constants::PROTOCOL_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// SHA-256 commitment to the four domain fields.
    ///
    /// Variable-width fields are length-prefixed so adjacent fields cannot
    /// be confused for one another.
    #[must_use]
    pub fn separator(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"artmarket:domain:v1:");
        hasher.update((self.name.len() as u64).to_be_bytes());
        hasher.update(self.name.as_bytes());
        hasher.update((self.version.len() as u64).to_be_bytes());
        hasher.update(self.version.as_bytes());
        hasher.update(self.chain_id.to_be_bytes());
        hasher.update(self.verifying_contract.as_bytes());
        hasher.finalize().into()
    }
}
