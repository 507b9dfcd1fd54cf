//! ECDSA and EdDSA signature verification.
//!
//! This library verifies:
//! - ECDSA over secp256r1, secp384r1 and secp521r1 (SHA-256/384/512)
//! - Ed25519, Ed25519ctx and Ed25519ph (SHA-512)
//! - Ed448 and Ed448ph (SHAKE256)
//!
//! # Overview
//!
//! Keys and signatures are parsed from their standard byte encodings
//! (uncompressed SEC1 points, RFC 8032 compressed points) and verified with
//! the scalar multiplication engines of the `curve` crate. Every
//! verification has a sequential form and a `_par` form that forks its
//! independent multiplications with `rayon::join`.
//!
//! Malformed input is reported as a [`VerifyError`]; a well-formed signature
//! that does not verify yields `Ok(false)`.
//!
//! # Example
//!
//! ```
//! use curve::ed25519;
//! use sigverify::{EddsaSignature, EddsaVerifyingKey};
//!
//! // RFC 8032, section 7.1, test 1
//! let pk = hex::decode("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a").unwrap();
//! let sig = hex::decode(concat!(
//!     "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155",
//!     "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
//! ))
//! .unwrap();
//!
//! let key = EddsaVerifyingKey::from_bytes(ed25519(), &pk).expect("valid key");
//! let sig = EddsaSignature::from_bytes(ed25519(), &sig).expect("valid length");
//! assert!(key.verify(b"", &sig).expect("verification failed"));
//! assert!(!key.verify(b"x", &sig).expect("verification failed"));
//! ```
//!
//! # Security Considerations
//!
//! - The engines branch on scalar digits; they are meant for the public
//!   scalars of verification, not for secret scalars
//! - EdDSA uses the cofactorless equation and rejects non-canonical `y`
//! - Compressed SEC1 keys are not accepted

mod constants;
pub mod ecdsa;
pub mod eddsa;
mod encoding;
mod errors;
mod keys;
pub mod offload;
mod signatures;

#[cfg(test)]
mod tests;

pub use constants::{ED25519_KEY_SIZE, ED448_KEY_SIZE, MAX_CONTEXT_LEN};
pub use eddsa::Domain;
pub use encoding::{decode_edwards, decode_sec1, encode_edwards, encode_sec1};
pub use errors::{DecodeError, VerifyError};
pub use keys::{EcdsaVerifyingKey, EddsaVerifyingKey};
pub use offload::{OffloadWorker, PendingMul};
pub use signatures::{EcdsaSignature, EddsaSignature};
