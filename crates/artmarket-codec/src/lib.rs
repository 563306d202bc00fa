//! # artmarket-codec
//!
//! **Order Codec & Signer**: canonical hashing and maker authorization for
//! [`Ask`](artmarket_types::Ask) orders.
//!
//! ## Guarantees
//!
//! - **Deterministic hashing**: [`hash_ask`] is a pure function of the signing
//!   domain plus every order field; changing any single field changes the hash.
//! - **Domain separation**: the same ask signed for a different chain or
//!   settlement contract produces a different hash, so signatures cannot be
//!   replayed across deployments.
//! - **Portable verification**: [`recover_signer`] needs only the order
//!   fields, the domain, and the signature envelope — no shared secret.

pub mod domain;
pub mod hash;
pub mod signer;

pub use domain::SignDomain;
pub use hash::hash_ask;
pub use signer::{recover_signer, verify_ask, AskSignature, MakerKey};
