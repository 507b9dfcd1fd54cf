//! Montgomery's simultaneous inversion trick.

use crate::field::Field;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Invert every element of `values` with a single field inversion.
///
/// Zero inputs are skipped in the running product and map to zero in the
/// output, so a stray identity point does not poison the whole batch.
pub fn batch_inverse(field: &Field, values: &[BigUint]) -> Vec<BigUint> {
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = BigUint::one();
    for v in values {
        prefix.push(acc.clone());
        if !v.is_zero() {
            acc = field.mul(&acc, v);
        }
    }

    // acc is a product of nonzero elements of a prime field, so it is invertible.
    let mut inv = match field.inv(&acc) {
        Some(inv) => inv,
        None => return vec![BigUint::zero(); values.len()],
    };

    let mut out = vec![BigUint::zero(); values.len()];
    for (i, v) in values.iter().enumerate().rev() {
        if v.is_zero() {
            continue;
        }
        out[i] = field.mul(&inv, &prefix[i]);
        inv = field.mul(&inv, v);
    }
    out
}
