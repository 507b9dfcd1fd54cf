//! Scalar recoding for the windowed engines.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// Signed width-`w` NAF of `k`, least significant digit first.
///
/// One digit is produced per bit position, so runs of zeros appear
/// explicitly. Nonzero digits are odd and lie in `[-(2^(w-1) - 1), 2^(w-1) - 1]`,
/// and the last digit is nonzero. `k = 0` yields an empty vector.
pub fn compute_wnaf(k: &BigUint, w: u32) -> Vec<i64> {
    assert!((2..=30).contains(&w), "wNAF window must be in 2..=30");

    let window = 1i64 << w;
    let half = window >> 1;
    let mask = BigInt::from(window - 1);

    let mut k = BigInt::from(k.clone());
    let mut digits = Vec::with_capacity(k.bits() as usize + 1);
    while !k.is_zero() {
        let mut z = 0i64;
        if k.is_odd() {
            // k > 0 here, so the masked value is the non-negative residue.
            z = (&k & &mask).to_i64().unwrap_or_default();
            if z > half {
                z -= window;
            }
            k -= z;
        }
        digits.push(z);
        k >>= 1u32;
    }
    digits
}

/// Unsigned base-`2^w` digits of `k`, least significant first.
pub fn chunk_scalar(k: &BigUint, w: u32) -> Vec<usize> {
    assert!((1..=usize::BITS - 1).contains(&w), "chunk width out of range");

    let mask = BigUint::from((1usize << w) - 1);
    let mut k = k.clone();
    let mut chunks = Vec::with_capacity(k.bits().div_ceil(w as u64) as usize);
    while !k.is_zero() {
        chunks.push((&k & &mask).to_usize().unwrap_or_default());
        k >>= w;
    }
    chunks
}
