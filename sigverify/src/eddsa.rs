//! EdDSA verification for Ed25519 and Ed448 (RFC 8032).
//!
//! Verification decodes `R`, derives `k = H(dom || R || A || M) mod L` and
//! checks `O = S * B - (R + k * A)` is the neutral element. The cofactorless
//! equation is used.

use curve::scalar_mul::wnaf;
use curve::{CurveId, EdwardsCurve, EdwardsPoint, Group, MulConfig};
use log::debug;
use num_bigint::BigUint;

use crate::constants::{DOM2_PREFIX, DOM4_PREFIX, MAX_CONTEXT_LEN};
use crate::encoding::decode_edwards;
use crate::errors::VerifyError;
use crate::keys::EddsaVerifyingKey;
use crate::signatures::EddsaSignature;

/// RFC 8032 signing variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Domain<'a> {
    /// Ed25519 or Ed448 with an empty context.
    Pure,
    /// Ed25519ctx (non-empty context) or Ed448 with a context.
    Context(&'a [u8]),
    /// Ed25519ph or Ed448ph; the message is prehashed with the curve's
    /// prehash function.
    Prehashed(&'a [u8]),
}

/// The `dom2` / `dom4` prefix for `domain` on `curve`.
pub fn domain_prefix(curve: &EdwardsCurve, domain: Domain<'_>) -> Result<Vec<u8>, VerifyError> {
    let (phflag, ctx) = match domain {
        Domain::Pure => (0u8, &[][..]),
        Domain::Context(ctx) => (0u8, ctx),
        Domain::Prehashed(ctx) => (1u8, ctx),
    };
    if ctx.len() > MAX_CONTEXT_LEN {
        return Err(VerifyError::InvalidContext);
    }

    let tag = match curve.id {
        CurveId::Ed25519 => match domain {
            Domain::Pure => return Ok(Vec::new()),
            Domain::Context([]) => return Err(VerifyError::InvalidContext),
            _ => DOM2_PREFIX,
        },
        CurveId::Ed448 => DOM4_PREFIX,
        _ => return Err(VerifyError::UnsupportedCurve),
    };

    let mut prefix = Vec::with_capacity(tag.len() + 2 + ctx.len());
    prefix.extend_from_slice(tag);
    prefix.push(phflag);
    prefix.push(ctx.len() as u8);
    prefix.extend_from_slice(ctx);
    Ok(prefix)
}

/// `H(prefix || R || A || M)` read little-endian, reduced mod `L`.
pub fn hash_domain_to_scalar(
    curve: &EdwardsCurve,
    prefix: &[u8],
    r: &[u8],
    a: &[u8],
    msg: &[u8],
) -> BigUint {
    let mut input = Vec::with_capacity(prefix.len() + r.len() + a.len() + msg.len());
    input.extend_from_slice(prefix);
    input.extend_from_slice(r);
    input.extend_from_slice(a);
    input.extend_from_slice(msg);
    BigUint::from_bytes_le(&(curve.hash)(&input)) % &curve.l
}

fn check_range(curve: &EdwardsCurve, sig: &EddsaSignature) -> Result<(), VerifyError> {
    if sig.s >= curve.l {
        debug!("{}: S is not below the group order", curve.id.name());
        return Err(VerifyError::OutOfRange);
    }
    Ok(())
}

/// Challenge scalar for `sig` on `msg`, applying the prehash if requested.
fn challenge(
    key: &EddsaVerifyingKey,
    msg: &[u8],
    sig: &EddsaSignature,
    domain: Domain<'_>,
) -> Result<BigUint, VerifyError> {
    let curve = key.curve();
    let prefix = domain_prefix(curve, domain)?;
    let k = match domain {
        Domain::Prehashed(_) => {
            let ph = (curve.prehash)(msg);
            hash_domain_to_scalar(curve, &prefix, &sig.r, key.as_bytes(), &ph)
        }
        _ => hash_domain_to_scalar(curve, &prefix, &sig.r, key.as_bytes(), msg),
    };
    Ok(k)
}

fn decode_r(curve: &EdwardsCurve, sig: &EddsaSignature) -> Result<EdwardsPoint, VerifyError> {
    decode_edwards(curve, &sig.r).map_err(|e| {
        debug!("{}: cannot decode R: {e}", curve.id.name());
        VerifyError::Decode(e)
    })
}

fn accept(curve: &EdwardsCurve, sb: &EdwardsPoint, rka: &EdwardsPoint) -> bool {
    let ok = sb.sub(rka, curve).is_identity();
    if !ok {
        debug!("{}: S*B != R + k*A", curve.id.name());
    }
    ok
}

/// Verify `sig` over `msg` in the given domain.
pub fn verify_with(
    key: &EddsaVerifyingKey,
    msg: &[u8],
    sig: &EddsaSignature,
    domain: Domain<'_>,
) -> Result<bool, VerifyError> {
    let curve = key.curve();
    check_range(curve, sig)?;
    let r = decode_r(curve, sig)?;
    let k = challenge(key, msg, sig, domain)?;

    let sb = curve.multiply_base(&sig.s);
    let ka = wnaf::multiply(key.point(), &k, curve, &MulConfig::default());
    Ok(accept(curve, &sb, &r.add(&ka, curve)))
}

/// [`verify_with`] with `S * B` forked from decoding, hashing and `k * A`.
pub fn verify_with_par(
    key: &EddsaVerifyingKey,
    msg: &[u8],
    sig: &EddsaSignature,
    domain: Domain<'_>,
) -> Result<bool, VerifyError> {
    let curve = key.curve();
    check_range(curve, sig)?;

    let (sb, rka) = rayon::join(
        || curve.multiply_base(&sig.s),
        || -> Result<EdwardsPoint, VerifyError> {
            let (r, k) = rayon::join(|| decode_r(curve, sig), || challenge(key, msg, sig, domain));
            let ka = wnaf::multiply_par(key.point(), &k?, curve, &MulConfig::default());
            Ok(r?.add(&ka, curve))
        },
    );
    Ok(accept(curve, &sb, &rka?))
}

/// Verify a pure Ed25519 / Ed448 signature.
pub fn verify(key: &EddsaVerifyingKey, msg: &[u8], sig: &EddsaSignature) -> Result<bool, VerifyError> {
    verify_with(key, msg, sig, Domain::Pure)
}

/// Parallel form of [`verify`].
pub fn verify_par(key: &EddsaVerifyingKey, msg: &[u8], sig: &EddsaSignature) -> Result<bool, VerifyError> {
    verify_with_par(key, msg, sig, Domain::Pure)
}

/// Verify from raw encodings of the public key and `R || S`.
pub fn verify_bytes(
    curve: &'static EdwardsCurve,
    msg: &[u8],
    sig: &[u8],
    public_key: &[u8],
) -> Result<bool, VerifyError> {
    let sig = EddsaSignature::from_bytes(curve, sig)?;
    let key = EddsaVerifyingKey::from_bytes(curve, public_key)?;
    verify(&key, msg, &sig)
}
