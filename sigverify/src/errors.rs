//! Error types for signature verification.

use thiserror::Error;

/// Errors that can occur while decoding keys, points or signatures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The SEC1 point prefix is not `0x04` (compressed keys are not supported).
    #[error("unsupported point prefix 0x{0:02x}")]
    UnsupportedPrefix(u8),

    /// The encoding does not have the length the curve requires.
    #[error("invalid encoding length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    /// A coordinate is not smaller than the field modulus.
    #[error("coordinate out of range")]
    CoordinateOutOfRange,

    /// The decoded coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// `x^2 = (y^2 - 1) / (d y^2 - a)` has no solution for the encoded `y`.
    #[error("no square root for the encoded point")]
    NoSquareRoot,

    /// The sign bit is set but `x = 0`.
    #[error("non-canonical sign bit")]
    NonCanonicalSign,
}

/// Errors that abort a verification before the verification equation is
/// evaluated.
///
/// A cryptographically invalid signature is not an error: verification
/// returns `Ok(false)` for it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// A signature scalar lies outside `(0, n)` (ECDSA) or `[0, L)` (EdDSA).
    #[error("signature component out of range")]
    OutOfRange,

    /// The signature does not have the length the curve requires.
    #[error("invalid signature length: expected {expected} bytes, got {got}")]
    InvalidSignatureLength { expected: usize, got: usize },

    /// A public key or signature point failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The context is longer than 255 bytes, or was supplied for pure Ed25519.
    #[error("invalid signing context")]
    InvalidContext,

    /// The curve is not usable with the requested scheme.
    #[error("unsupported curve")]
    UnsupportedCurve,

    /// The offload worker went away or answered with a malformed message.
    #[error("offload worker failed")]
    Offload,
}
