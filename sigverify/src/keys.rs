//! Verifying keys for ECDSA and EdDSA.

use core::fmt;

use curve::{EdwardsCurve, EdwardsPoint, Group, JacobianPoint, WeierstrassCurve};
use log::debug;

use crate::ecdsa;
use crate::eddsa::{self, Domain};
use crate::encoding::{decode_edwards, decode_sec1, encode_edwards, encode_sec1};
use crate::errors::{DecodeError, VerifyError};
use crate::offload::OffloadWorker;
use crate::signatures::{EcdsaSignature, EddsaSignature};

/// A public key on one of the NIST P-curves.
///
/// The point is finite, on the curve and stored with `z = 1`.
///
/// # Example
///
/// ```
/// use curve::{CurveParams, secp256r1};
/// use sigverify::EcdsaVerifyingKey;
///
/// let key = EcdsaVerifyingKey::from_point(secp256r1(), &secp256r1().generator()).expect("valid key");
/// let bytes = key.to_sec1_bytes();
/// assert_eq!(bytes.len(), 65);
/// assert_eq!(EcdsaVerifyingKey::from_sec1_bytes(secp256r1(), &bytes).expect("decode"), key);
/// ```
#[derive(Clone)]
pub struct EcdsaVerifyingKey {
    curve: &'static WeierstrassCurve,
    point: JacobianPoint,
}

impl EcdsaVerifyingKey {
    /// Decode an uncompressed SEC1 public key.
    pub fn from_sec1_bytes(curve: &'static WeierstrassCurve, bytes: &[u8]) -> Result<Self, VerifyError> {
        let point = decode_sec1(curve, bytes).map_err(|e| {
            debug!("{}: rejected public key: {e}", curve.id.name());
            e
        })?;
        Ok(Self { curve, point })
    }

    /// Wrap a point, rejecting infinity and points off the curve.
    pub fn from_point(curve: &'static WeierstrassCurve, point: &JacobianPoint) -> Result<Self, VerifyError> {
        if point.is_infinity() || !point.is_on_curve(curve) {
            return Err(DecodeError::NotOnCurve.into());
        }
        Ok(Self {
            curve,
            point: point.normalize(curve, None),
        })
    }

    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        encode_sec1(self.curve, &self.point).unwrap_or_default()
    }

    pub fn curve(&self) -> &'static WeierstrassCurve {
        self.curve
    }

    pub fn point(&self) -> &JacobianPoint {
        &self.point
    }

    /// Verifies `sig` over `msg`.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not verify
    /// and an error when `r` or `s` is outside `(0, n)`.
    pub fn verify(&self, msg: &[u8], sig: &EcdsaSignature) -> Result<bool, VerifyError> {
        ecdsa::verify(self, msg, sig)
    }

    /// Parallel form of [`EcdsaVerifyingKey::verify`].
    pub fn verify_par(&self, msg: &[u8], sig: &EcdsaSignature) -> Result<bool, VerifyError> {
        ecdsa::verify_par(self, msg, sig)
    }

    /// Verify with the variable-base multiplication run on `worker`.
    pub fn verify_offloaded(
        &self,
        worker: &OffloadWorker,
        msg: &[u8],
        sig: &EcdsaSignature,
    ) -> Result<bool, VerifyError> {
        ecdsa::verify_offloaded(worker, self, msg, sig)
    }
}

impl fmt::Debug for EcdsaVerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaVerifyingKey")
            .field("curve", &self.curve.id)
            .field("point", &self.point)
            .finish()
    }
}

impl PartialEq for EcdsaVerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve.id == other.curve.id && self.point == other.point
    }
}

impl Eq for EcdsaVerifyingKey {}

/// A public key on Ed25519 or Ed448.
///
/// The encoded bytes are kept alongside the decoded point since the
/// challenge hash covers the key as encoded.
#[derive(Clone)]
pub struct EddsaVerifyingKey {
    curve: &'static EdwardsCurve,
    bytes: Vec<u8>,
    point: EdwardsPoint,
}

impl EddsaVerifyingKey {
    /// Decode a compressed RFC 8032 public key.
    pub fn from_bytes(curve: &'static EdwardsCurve, bytes: &[u8]) -> Result<Self, VerifyError> {
        let point = decode_edwards(curve, bytes).map_err(|e| {
            debug!("{}: rejected public key: {e}", curve.id.name());
            e
        })?;
        Ok(Self {
            curve,
            bytes: bytes.to_vec(),
            point,
        })
    }

    /// Compress `point` into a key.
    pub fn from_point(curve: &'static EdwardsCurve, point: &EdwardsPoint) -> Self {
        let bytes = encode_edwards(curve, point);
        Self {
            curve,
            bytes,
            point: point.normalize(curve, None),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn curve(&self) -> &'static EdwardsCurve {
        self.curve
    }

    pub fn point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// Verifies a pure Ed25519 / Ed448 signature.
    ///
    /// # Example
    ///
    /// ```
    /// use curve::ed25519;
    /// use sigverify::{EddsaSignature, EddsaVerifyingKey};
    ///
    /// let pk = hex::decode("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a").unwrap();
    /// let sig = hex::decode(concat!(
    ///     "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155",
    ///     "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    /// )).unwrap();
    ///
    /// let key = EddsaVerifyingKey::from_bytes(ed25519(), &pk).expect("valid key");
    /// let sig = EddsaSignature::from_bytes(ed25519(), &sig).expect("valid length");
    /// assert!(key.verify(b"", &sig).expect("verify"));
    /// ```
    pub fn verify(&self, msg: &[u8], sig: &EddsaSignature) -> Result<bool, VerifyError> {
        eddsa::verify(self, msg, sig)
    }

    /// Verifies an Ed25519ctx / Ed448 signature made under `ctx`.
    pub fn verify_ctx(&self, msg: &[u8], ctx: &[u8], sig: &EddsaSignature) -> Result<bool, VerifyError> {
        eddsa::verify_with(self, msg, sig, Domain::Context(ctx))
    }

    /// Verifies an Ed25519ph / Ed448ph signature made under `ctx`.
    pub fn verify_prehashed(&self, msg: &[u8], ctx: &[u8], sig: &EddsaSignature) -> Result<bool, VerifyError> {
        eddsa::verify_with(self, msg, sig, Domain::Prehashed(ctx))
    }

    /// Parallel form of [`EddsaVerifyingKey::verify`].
    pub fn verify_par(&self, msg: &[u8], sig: &EddsaSignature) -> Result<bool, VerifyError> {
        eddsa::verify_par(self, msg, sig)
    }
}

impl fmt::Debug for EddsaVerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EddsaVerifyingKey")
            .field("curve", &self.curve.id)
            .field("bytes", &self.bytes)
            .finish()
    }
}

impl PartialEq for EddsaVerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve.id == other.curve.id && self.bytes == other.bytes
    }
}

impl Eq for EddsaVerifyingKey {}
