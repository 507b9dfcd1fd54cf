//! Byte encodings of points, scalars and signatures.
//!
//! Weierstrass public keys are SEC1 uncompressed points `0x04 || x || y`
//! with big-endian coordinates. Edwards points use the RFC 8032 compressed
//! form: `y` little-endian with the sign of `x` in the top bit of the last
//! byte.

use curve::{EdwardsCurve, EdwardsPoint, Group, JacobianPoint, WeierstrassCurve};
use num_bigint::BigUint;
use num_integer::Integer;

use crate::constants::SEC1_UNCOMPRESSED;
use crate::errors::{DecodeError, VerifyError};

/// Big-endian encoding of `v`, left-padded to `len` bytes.
///
/// `v` must fit in `len` bytes.
pub fn to_bytes_be(v: &BigUint, len: usize) -> Vec<u8> {
    let bytes = v.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// Little-endian encoding of `v`, right-padded to `len` bytes.
pub fn to_bytes_le(v: &BigUint, len: usize) -> Vec<u8> {
    let mut out = v.to_bytes_le();
    out.resize(len.max(out.len()), 0);
    out
}

/// Split a signature into its two equal halves.
pub fn split_signature(bytes: &[u8], half: usize) -> Result<(&[u8], &[u8]), VerifyError> {
    if bytes.len() != 2 * half {
        return Err(VerifyError::InvalidSignatureLength {
            expected: 2 * half,
            got: bytes.len(),
        });
    }
    Ok(bytes.split_at(half))
}

/// Decode an uncompressed SEC1 point.
pub fn decode_sec1(curve: &WeierstrassCurve, bytes: &[u8]) -> Result<JacobianPoint, DecodeError> {
    let len = curve.coordinate_len();
    let (&prefix, coords) = bytes.split_first().ok_or(DecodeError::InvalidLength {
        expected: 1 + 2 * len,
        got: 0,
    })?;
    if prefix != SEC1_UNCOMPRESSED {
        return Err(DecodeError::UnsupportedPrefix(prefix));
    }
    if coords.len() != 2 * len {
        return Err(DecodeError::InvalidLength {
            expected: 1 + 2 * len,
            got: bytes.len(),
        });
    }

    let (x, y) = coords.split_at(len);
    let x = BigUint::from_bytes_be(x);
    let y = BigUint::from_bytes_be(y);
    let p = curve.field.modulus();
    if &x >= p || &y >= p {
        return Err(DecodeError::CoordinateOutOfRange);
    }
    if !curve.is_on_curve(&x, &y) {
        return Err(DecodeError::NotOnCurve);
    }
    Ok(JacobianPoint::from_affine(curve, x, y))
}

/// Encode a point as an uncompressed SEC1 string, or `None` for the point
/// at infinity.
pub fn encode_sec1(curve: &WeierstrassCurve, point: &JacobianPoint) -> Option<Vec<u8>> {
    let (x, y) = point.to_affine(curve)?;
    let len = curve.coordinate_len();
    let mut out = Vec::with_capacity(1 + 2 * len);
    out.push(SEC1_UNCOMPRESSED);
    out.extend(to_bytes_be(&x, len));
    out.extend(to_bytes_be(&y, len));
    Some(out)
}

/// Decode an RFC 8032 compressed Edwards point.
pub fn decode_edwards(curve: &EdwardsCurve, bytes: &[u8]) -> Result<EdwardsPoint, DecodeError> {
    if bytes.len() != curve.key_len {
        return Err(DecodeError::InvalidLength {
            expected: curve.key_len,
            got: bytes.len(),
        });
    }

    let mut y_bytes = bytes.to_vec();
    let last = curve.key_len - 1;
    let sign = y_bytes[last] & 0x80 != 0;
    y_bytes[last] &= 0x7f;
    let y = BigUint::from_bytes_le(&y_bytes);
    if &y >= curve.field.modulus() {
        return Err(DecodeError::CoordinateOutOfRange);
    }

    let x = match curve.recover_x(&y, sign) {
        Some(x) => x,
        // `recover_x` also refuses `x = 0` with the sign bit set.
        None if sign && curve.recover_x(&y, false).is_some() => {
            return Err(DecodeError::NonCanonicalSign);
        }
        None => return Err(DecodeError::NoSquareRoot),
    };
    Ok(EdwardsPoint::from_affine(curve, x, y))
}

/// Compress an Edwards point.
pub fn encode_edwards(curve: &EdwardsCurve, point: &EdwardsPoint) -> Vec<u8> {
    let (x, y) = point.to_affine(curve);
    let mut out = to_bytes_le(&y, curve.key_len);
    if x.is_odd() {
        out[curve.key_len - 1] |= 0x80;
    }
    out
}
