//! Bit-by-bit double-and-add, the reference every other engine is checked against.

use crate::Group;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// `k * P` for a signed scalar; negative scalars multiply `-P` by `|k|`.
pub fn multiply<P: Group>(point: &P, k: &BigInt, curve: &P::Curve) -> P {
    match k.sign() {
        Sign::Minus => multiply_unsigned(&point.negate(curve), k.magnitude(), curve),
        _ => multiply_unsigned(point, k.magnitude(), curve),
    }
}

pub fn multiply_unsigned<P: Group>(point: &P, k: &BigUint, curve: &P::Curve) -> P {
    if k.is_zero() {
        return P::identity();
    }
    if k.is_one() {
        return point.clone();
    }

    let mut result = P::identity();
    let mut addend = point.clone();
    let mut k = k.clone();

    while !k.is_zero() {
        if k.is_odd() {
            result = result.add(&addend, curve);
        }
        addend = addend.double(curve);
        k >>= 1u32;
    }

    result
}
