//! ECDSA verification over the NIST P-curves.
//!
//! Verification computes `P = u1 * G + u2 * Q` with `u1 = e / s` and
//! `u2 = r / s` modulo `n`, and accepts iff `P` is finite and
//! `P.x mod n == r`. `u1 * G` goes through the generator's memoised window
//! table, `u2 * Q` through the signed-wNAF engine.

use curve::scalar_mul::wnaf;
use curve::{CurveParams, Field, Group, JacobianPoint, MulConfig, WeierstrassCurve};
use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::VerifyError;
use crate::keys::EcdsaVerifyingKey;
use crate::offload::OffloadWorker;
use crate::signatures::EcdsaSignature;

/// Interpret a digest as an integer, keeping its leftmost `bits(n)` bits.
pub fn truncate_digest(curve: &WeierstrassCurve, digest: &[u8]) -> BigUint {
    let e = BigUint::from_bytes_be(digest);
    let excess = (digest.len() as u64 * 8).saturating_sub(curve.n.bits());
    e >> excess
}

fn check_range(curve: &WeierstrassCurve, sig: &EcdsaSignature) -> Result<(), VerifyError> {
    let n = &curve.n;
    if sig.r.is_zero() || &sig.r >= n || sig.s.is_zero() || &sig.s >= n {
        debug!("{}: signature component out of range", curve.id.name());
        return Err(VerifyError::OutOfRange);
    }
    Ok(())
}

/// `(u1, u2)` for digest integer `e`.
fn scalars(
    curve: &WeierstrassCurve,
    e: &BigUint,
    sig: &EcdsaSignature,
) -> Result<(BigUint, BigUint), VerifyError> {
    check_range(curve, sig)?;
    let scalar_field = Field::new(curve.n.clone());
    // `s` is in (0, n) and `n` is prime.
    let w = scalar_field.inv(&sig.s).ok_or(VerifyError::OutOfRange)?;
    let u1 = scalar_field.mul(&scalar_field.reduce(e), &w);
    let u2 = scalar_field.mul(&sig.r, &w);
    Ok((u1, u2))
}

fn accept(curve: &WeierstrassCurve, u1g: &JacobianPoint, u2q: &JacobianPoint, r: &BigUint) -> bool {
    let sum = u1g.add(u2q, curve);
    let Some((x, _)) = sum.to_affine(curve) else {
        debug!("{}: u1*G + u2*Q is the point at infinity", curve.id.name());
        return false;
    };
    let ok = &(x % &curve.n) == r;
    if !ok {
        debug!("{}: signature does not match", curve.id.name());
    }
    ok
}

/// Verify `sig` over `msg`.
pub fn verify(key: &EcdsaVerifyingKey, msg: &[u8], sig: &EcdsaSignature) -> Result<bool, VerifyError> {
    let curve = key.curve();
    let e = truncate_digest(curve, &curve.digest(msg));
    let (u1, u2) = scalars(curve, &e, sig)?;

    let u1g = curve.multiply_base(&u1);
    let u2q = wnaf::multiply(key.point(), &u2, curve, &MulConfig::default());
    Ok(accept(curve, &u1g, &u2q, &sig.r))
}

/// [`verify`] with `u1 * G` and `u2 * Q` computed in parallel.
pub fn verify_par(key: &EcdsaVerifyingKey, msg: &[u8], sig: &EcdsaSignature) -> Result<bool, VerifyError> {
    let curve = key.curve();
    let e = truncate_digest(curve, &curve.digest(msg));
    let (u1, u2) = scalars(curve, &e, sig)?;

    let (u1g, u2q) = rayon::join(
        || curve.multiply_base(&u1),
        || wnaf::multiply_par(key.point(), &u2, curve, &MulConfig::default()),
    );
    Ok(accept(curve, &u1g, &u2q, &sig.r))
}

/// Verify from raw encodings: an uncompressed SEC1 key and `r || s`.
pub fn verify_bytes(
    curve: &'static WeierstrassCurve,
    msg: &[u8],
    sig: &[u8],
    public_key: &[u8],
) -> Result<bool, VerifyError> {
    let sig = EcdsaSignature::from_bytes(curve, sig)?;
    let key = EcdsaVerifyingKey::from_sec1_bytes(curve, public_key)?;
    verify(&key, msg, &sig)
}

/// [`verify_bytes`] with key decoding and message hashing forked before the
/// parallel multiplication.
pub fn verify_bytes_par(
    curve: &'static WeierstrassCurve,
    msg: &[u8],
    sig: &[u8],
    public_key: &[u8],
) -> Result<bool, VerifyError> {
    let sig = EcdsaSignature::from_bytes(curve, sig)?;
    let (key, e) = rayon::join(
        || EcdsaVerifyingKey::from_sec1_bytes(curve, public_key),
        || truncate_digest(curve, &curve.digest(msg)),
    );
    let key = key?;
    let (u1, u2) = scalars(curve, &e, &sig)?;

    let (u1g, u2q) = rayon::join(
        || curve.multiply_base(&u1),
        || wnaf::multiply_par(key.point(), &u2, curve, &MulConfig::default()),
    );
    Ok(accept(curve, &u1g, &u2q, &sig.r))
}

/// [`verify`] with `u2 * Q` sent to an offload worker while `u1 * G` is
/// computed on the calling thread.
pub fn verify_offloaded(
    worker: &OffloadWorker,
    key: &EcdsaVerifyingKey,
    msg: &[u8],
    sig: &EcdsaSignature,
) -> Result<bool, VerifyError> {
    let curve = key.curve();
    let e = truncate_digest(curve, &curve.digest(msg));
    let (u1, u2) = scalars(curve, &e, sig)?;

    let pending = worker.multiply(key.point(), &u2, curve)?;
    let u1g = curve.multiply_base(&u1);
    let u2q = pending.wait()?;
    Ok(accept(curve, &u1g, &u2q, &sig.r))
}
