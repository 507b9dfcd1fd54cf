//! Twisted Edwards points in extended coordinates.
//!
//! A point (X:Y:Z:T) represents the affine point (X/Z, Y/Z) with `XY = TZ`.
//! `T` is only consumed by additions, so operations whose result is
//! immediately doubled may leave it unset; it is rebuilt on demand.

use crate::curves::{CurveParams, EdwardsCurve};
use crate::Group;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdwardsPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
    /// `None` when the producing operation deferred it.
    pub t: Option<BigUint>,
}

impl EdwardsPoint {
    pub fn new(x: BigUint, y: BigUint, z: BigUint, t: Option<BigUint>) -> Self {
        EdwardsPoint { x, y, z, t }
    }

    /// The neutral element (0:1:1:0).
    pub fn neutral() -> Self {
        EdwardsPoint::new(
            BigUint::zero(),
            BigUint::one(),
            BigUint::one(),
            Some(BigUint::zero()),
        )
    }

    /// Affine coordinates.
    pub fn to_affine(&self, curve: &EdwardsCurve) -> (BigUint, BigUint) {
        let p = self.normalize(curve, None);
        (p.x, p.y)
    }

    pub fn is_on_curve(&self, curve: &EdwardsCurve) -> bool {
        let (x, y) = self.to_affine(curve);
        curve.is_on_curve(&x, &y)
    }

    /// (X, Y, Z, T), rescaling to (XZ:YZ:Z^2:XY) when `T` was deferred.
    fn extended(&self, curve: &EdwardsCurve) -> (BigUint, BigUint, BigUint, BigUint) {
        match &self.t {
            Some(t) => (self.x.clone(), self.y.clone(), self.z.clone(), t.clone()),
            None => {
                let f = &curve.field;
                (
                    f.mul(&self.x, &self.z),
                    f.mul(&self.y, &self.z),
                    f.sqr(&self.z),
                    f.mul(&self.x, &self.y),
                )
            }
        }
    }

    /// add-2008-hwcd with generic `a`.
    fn add_inner(&self, other: &Self, curve: &EdwardsCurve, is_next0: bool) -> Self {
        let (x1, y1, z1, t1) = self.extended(curve);
        let (x2, y2, z2, t2) = other.extended(curve);
        let f = &curve.field;

        let a = f.mul(&x1, &x2);
        let b = f.mul(&y1, &y2);
        let c = f.mul(&f.mul(&t1, &curve.d), &t2);
        let d = f.mul(&z1, &z2);
        let e = f.sub(&f.sub(&f.mul(&f.add(&x1, &y1), &f.add(&x2, &y2)), &a), &b);
        let ff = f.sub(&d, &c);
        let g = f.add(&d, &c);
        let h = f.sub(&b, &f.mul(&curve.a, &a));

        let t3 = (!is_next0).then(|| f.mul(&e, &h));
        EdwardsPoint::new(f.mul(&e, &ff), f.mul(&g, &h), f.mul(&ff, &g), t3)
    }

    /// dbl-2008-hwcd with generic `a`. Reads only X, Y and Z.
    fn double_inner(&self, curve: &EdwardsCurve, is_next0: bool) -> Self {
        let f = &curve.field;

        let a = f.sqr(&self.x);
        let b = f.sqr(&self.y);
        let c = f.mul_small(&f.sqr(&self.z), 2);
        let d = f.mul(&curve.a, &a);
        let e = f.sub(&f.sub(&f.sqr(&f.add(&self.x, &self.y)), &a), &b);
        let g = f.add(&d, &b);
        let ff = f.sub(&g, &c);
        let h = f.sub(&d, &b);

        let t3 = (!is_next0).then(|| f.mul(&e, &h));
        EdwardsPoint::new(f.mul(&e, &ff), f.mul(&g, &h), f.mul(&ff, &g), t3)
    }
}

impl Group for EdwardsPoint {
    type Curve = EdwardsCurve;

    #[inline]
    fn identity() -> Self {
        Self::neutral()
    }

    /// `x == 0 && y == z`; the order-2 point (0, -1) is not the identity.
    #[inline]
    fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    fn from_affine(curve: &EdwardsCurve, x: BigUint, y: BigUint) -> Self {
        let t = curve.field.mul(&x, &y);
        EdwardsPoint::new(x, y, BigUint::one(), Some(t))
    }

    fn add(&self, other: &Self, curve: &EdwardsCurve) -> Self {
        self.add_inner(other, curve, false)
    }

    fn double(&self, curve: &EdwardsCurve) -> Self {
        self.double_inner(curve, false)
    }

    fn add_deferred(&self, other: &Self, curve: &EdwardsCurve, is_next0: bool) -> Self {
        self.add_inner(other, curve, is_next0)
    }

    fn double_deferred(&self, curve: &EdwardsCurve, is_next0: bool) -> Self {
        self.double_inner(curve, is_next0)
    }

    fn double_n(&self, n: u32, curve: &EdwardsCurve) -> Self {
        let mut result = self.clone();
        for i in 0..n {
            result = result.double_inner(curve, i + 1 < n);
        }
        result
    }

    fn negate(&self, curve: &EdwardsCurve) -> Self {
        if self.is_identity() {
            return self.clone();
        }
        let f = &curve.field;
        EdwardsPoint::new(
            f.neg(&self.x),
            self.y.clone(),
            self.z.clone(),
            self.t.as_ref().map(|t| f.neg(t)),
        )
    }

    fn normalize(&self, curve: &EdwardsCurve, z_inv: Option<&BigUint>) -> Self {
        if self.is_identity() {
            return Self::neutral();
        }
        let f = curve.field();
        if self.z.is_one() {
            let t = f.mul(&self.x, &self.y);
            return EdwardsPoint::new(self.x.clone(), self.y.clone(), BigUint::one(), Some(t));
        }
        let zi = match z_inv {
            Some(zi) => zi.clone(),
            None => match f.inv(&self.z) {
                Some(zi) => zi,
                // z = 0 never occurs for points on a complete Edwards curve.
                None => return Self::neutral(),
            },
        };
        let x = f.mul(&self.x, &zi);
        let y = f.mul(&self.y, &zi);
        let t = f.mul(&x, &y);
        EdwardsPoint::new(x, y, BigUint::one(), Some(t))
    }

    #[inline]
    fn x(&self) -> &BigUint {
        &self.x
    }

    #[inline]
    fn y(&self) -> &BigUint {
        &self.y
    }

    #[inline]
    fn z(&self) -> &BigUint {
        &self.z
    }
}
