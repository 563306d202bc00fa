//! Maker keys and ask signatures.
//!
//! A signature envelope carries the maker's ed25519 verifying key next to
//! the signature bytes; "recovering" the signer means verifying the
//! signature over the order hash and deriving the address bound to that
//! key. The settlement engine then requires the recovered address to equal
//! the ask's declared maker.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};

use artmarket_types::{Address, Ask, MarketError, Result};

use crate::{hash_ask, SignDomain};

/// A maker's signing identity.
pub struct MakerKey {
    key: SigningKey,
}

impl MakerKey {
    /// Deterministic key from raw seed bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(bytes),
        }
    }

    /// The address other parties know this maker by.
    #[must_use]
    pub fn address(&self) -> Address {
        Address::from_verifying_key(&self.key.verifying_key())
    }

    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Sign an ask under the given domain.
    ///
    /// The message is the canonical order hash, so any later change to any
    /// field of the ask invalidates the signature.
    #[must_use]
    pub fn sign_ask(&self, domain: &SignDomain, ask: &Ask) -> AskSignature {
        let order_hash = hash_ask(domain, ask);
        let signature = self.key.sign(order_hash.as_bytes());
        AskSignature {
            public_key: self.key.verifying_key().to_bytes(),
            signature: signature.to_bytes().to_vec(),
        }
    }
}

impl std::fmt::Debug for MakerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print seed material.
        f.debug_struct("MakerKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// The detached authorization handed to takers alongside the ask fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskSignature {
    /// The maker's ed25519 verifying key.
    pub public_key: [u8; 32],
    /// 64-byte ed25519 signature over the order hash.
    pub signature: Vec<u8>,
}

/// Validate the signature and return the signer's address.
///
/// # Errors
/// [`MarketError::InvalidSignature`] on malformed key/signature bytes or a
/// failed verification.
pub fn recover_signer(
    domain: &SignDomain,
    ask: &Ask,
    signature: &AskSignature,
) -> Result<Address> {
    let verifying_key =
        VerifyingKey::from_bytes(&signature.public_key).map_err(|e| {
            MarketError::InvalidSignature {
                reason: format!("bad public key: {e}"),
            }
        })?;
    let sig = Signature::from_slice(&signature.signature).map_err(|e| {
        MarketError::InvalidSignature {
            reason: format!("bad signature bytes: {e}"),
        }
    })?;

    let order_hash = hash_ask(domain, ask);
    verifying_key
        .verify_strict(order_hash.as_bytes(), &sig)
        .map_err(|_| MarketError::InvalidSignature {
            reason: "verification failed".to_string(),
        })?;

    Ok(Address::from_verifying_key(&verifying_key))
}

/// Validate that the ask was signed by its declared maker.
pub fn verify_ask(domain: &SignDomain, ask: &Ask, signature: &AskSignature) -> Result<()> {
    let signer = recover_signer(domain, ask, signature)?;
    if signer != ask.maker {
        return Err(MarketError::InvalidSignature {
            reason: format!("signer {signer} is not maker {}", ask.maker),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_domain() -> SignDomain {
        SignDomain::artmarket(11_124, Address([0xcc; 20]))
    }

    fn signed_ask() -> (SignDomain, Ask, AskSignature, MakerKey) {
        let domain = make_domain();
        let maker = MakerKey::from_bytes(&[7u8; 32]);
        let ask = Ask::dummy_fixed(maker.address(), Address([2u8; 20]), 1, 1_000);
        let sig = maker.sign_ask(&domain, &ask);
        (domain, ask, sig, maker)
    }

    #[test]
    fn sign_verify_roundtrip() {
        let (domain, ask, sig, maker) = signed_ask();
        let recovered = recover_signer(&domain, &ask, &sig).unwrap();
        assert_eq!(recovered, maker.address());
        verify_ask(&domain, &ask, &sig).unwrap();
    }

    #[test]
    fn wrong_signer_rejected() {
        let domain = make_domain();
        let maker = MakerKey::from_bytes(&[7u8; 32]);
        let impostor = MakerKey::from_bytes(&[13u8; 32]);

        // Ask claims `maker` but is signed by `impostor`.
        let ask = Ask::dummy_fixed(maker.address(), Address([2u8; 20]), 1, 1_000);
        let sig = impostor.sign_ask(&domain, &ask);

        // Recovery itself succeeds — the signature is internally valid...
        assert_eq!(recover_signer(&domain, &ask, &sig).unwrap(), impostor.address());
        // ...but it does not recover to the declared maker.
        let err = verify_ask(&domain, &ask, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn tampered_field_invalidates_signature() {
        let (domain, mut ask, sig, _) = signed_ask();
        ask.price += 1;
        let err = verify_ask(&domain, &ask, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn wrong_domain_invalidates_signature() {
        let (_, ask, sig, _) = signed_ask();
        let other_chain = SignDomain::artmarket(1, Address([0xcc; 20]));
        let err = verify_ask(&other_chain, &ask, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn truncated_signature_rejected() {
        let (domain, ask, mut sig, _) = signed_ask();
        sig.signature.truncate(32);
        let err = recover_signer(&domain, &ask, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn corrupted_signature_rejected() {
        let (domain, ask, mut sig, _) = signed_ask();
        sig.signature[0] ^= 0xFF;
        let err = recover_signer(&domain, &ask, &sig).unwrap_err();
        assert!(matches!(err, MarketError::InvalidSignature { .. }));
    }

    #[test]
    fn serde_roundtrip() {
        let (_, _, sig, _) = signed_ask();
        let json = serde_json::to_string(&sig).unwrap();
        let back: AskSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }

    #[test]
    fn debug_does_not_leak_seed() {
        let maker = MakerKey::from_bytes(&[7u8; 32]);
        let out = format!("{maker:?}");
        assert!(out.starts_with("MakerKey"));
        assert!(out.contains("address"));
        assert!(!out.contains("key:"), "key material must not appear: {out}");
    }
}
