//! Prime field arithmetic over an arbitrary odd modulus.
//!
//! Elements are plain `BigUint`s kept in `[0, p)`. Every point formula in this
//! crate is written against the handful of operations exposed here, so the
//! same point code serves every supported curve modulus.

use core::fmt::{self, Debug, Formatter};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Arithmetic modulo a fixed odd prime `p`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    p: BigUint,
    p_signed: BigInt,
}

impl Field {
    pub fn new(p: BigUint) -> Self {
        let p_signed = BigInt::from(p.clone());
        Field { p, p_signed }
    }

    /// The modulus `p`.
    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Bit length of the modulus.
    #[inline]
    pub fn bits(&self) -> u64 {
        self.p.bits()
    }

    /// Reduce any non-negative integer into `[0, p)`.
    #[inline]
    pub fn reduce(&self, v: &BigUint) -> BigUint {
        if v < &self.p {
            v.clone()
        } else {
            v % &self.p
        }
    }

    /// Reduce a signed integer into `[0, p)`.
    pub fn reduce_signed(&self, v: &BigInt) -> BigUint {
        v.mod_floor(&self.p_signed).magnitude().clone()
    }

    /// Operands of `add`, `sub` and `neg` must already be reduced.
    #[inline]
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        if sum >= self.p {
            sum - &self.p
        } else {
            sum
        }
    }

    #[inline]
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            &self.p - (b - a)
        }
    }

    #[inline]
    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.p - a
        }
    }

    #[inline]
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    #[inline]
    pub fn sqr(&self, a: &BigUint) -> BigUint {
        (a * a) % &self.p
    }

    /// Multiply by a small constant (the 2, 3, 4, 8, 12 factors in point formulas).
    #[inline]
    pub fn mul_small(&self, a: &BigUint, k: u32) -> BigUint {
        (a * k) % &self.p
    }

    /// Multiplicative inverse by the extended Euclidean algorithm.
    ///
    /// Returns `None` when no inverse exists, which for a prime modulus only
    /// happens on `0`.
    pub fn inv(&self, a: &BigUint) -> Option<BigUint> {
        let (mut r0, mut r1) = (BigInt::from(self.reduce(a)), self.p_signed.clone());
        let (mut s0, mut s1) = (BigInt::one(), BigInt::zero());

        while !r1.is_zero() {
            let q = &r0 / &r1;

            let rt = &r0 - &q * &r1;
            r0 = r1;
            r1 = rt;

            let st = &s0 - &q * &s1;
            s0 = s1;
            s1 = st;
        }

        if !r0.is_one() {
            return None;
        }
        Some(self.reduce_signed(&s0))
    }

    #[inline]
    pub fn pow(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        base.modpow(exp, &self.p)
    }

    /// `x^(2^k)` by `k` successive squarings.
    pub fn pow2k(&self, x: &BigUint, k: u32) -> BigUint {
        let mut res = x.clone();
        for _ in 0..k {
            res = self.sqr(&res);
        }
        res
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Field(0x{:x})", self.p)
    }
}
