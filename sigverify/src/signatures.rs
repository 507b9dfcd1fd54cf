//! ECDSA and EdDSA signature types.

use curve::{EdwardsCurve, WeierstrassCurve};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::encoding::{split_signature, to_bytes_be};
use crate::errors::VerifyError;

/// An ECDSA signature `(r, s)`.
///
/// Parsing only checks the length. The range `0 < r, s < n` is checked by
/// verification, so out-of-range signatures surface as
/// [`VerifyError::OutOfRange`] rather than as an invalid signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcdsaSignature {
    pub r: BigUint,
    pub s: BigUint,
}

impl EcdsaSignature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Parse `r || s`, each big-endian and `ceil(bit / 8)` bytes long.
    pub fn from_bytes(curve: &WeierstrassCurve, bytes: &[u8]) -> Result<Self, VerifyError> {
        let (r, s) = split_signature(bytes, curve.coordinate_len())?;
        Ok(Self {
            r: BigUint::from_bytes_be(r),
            s: BigUint::from_bytes_be(s),
        })
    }

    pub fn to_bytes(&self, curve: &WeierstrassCurve) -> Vec<u8> {
        let len = curve.coordinate_len();
        let mut out = to_bytes_be(&self.r, len);
        out.extend(to_bytes_be(&self.s, len));
        out
    }
}

/// An EdDSA signature `R || S`.
///
/// `R` is kept in its encoded form because the challenge hash consumes the
/// bytes as sent; it is decoded during verification.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EddsaSignature {
    /// Compressed nonce point `R`.
    pub r: Vec<u8>,
    /// Response scalar `S`, decoded from little-endian.
    pub s: BigUint,
}

impl EddsaSignature {
    /// Parse `R || S`, each `key_len` bytes long.
    pub fn from_bytes(curve: &EdwardsCurve, bytes: &[u8]) -> Result<Self, VerifyError> {
        let (r, s) = split_signature(bytes, curve.key_len)?;
        Ok(Self {
            r: r.to_vec(),
            s: BigUint::from_bytes_le(s),
        })
    }
}
