use crate::curves::{CurveParams, WeierstrassCurve};
use crate::Group;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Point on a short Weierstrass curve in Jacobian coordinates.
/// Represents (X:Y:Z) with affine (x,y) = (X/Z^2, Y/Z^3).
/// The point at infinity is represented as (0:1:0).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JacobianPoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
}

impl JacobianPoint {
    pub fn new(x: BigUint, y: BigUint, z: BigUint) -> Self {
        JacobianPoint { x, y, z }
    }

    /// The point at infinity: (0:1:0).
    pub fn infinity() -> Self {
        JacobianPoint::new(BigUint::zero(), BigUint::one(), BigUint::zero())
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Affine coordinates, or `None` for the point at infinity.
    pub fn to_affine(&self, curve: &WeierstrassCurve) -> Option<(BigUint, BigUint)> {
        if self.is_infinity() {
            return None;
        }
        let p = self.normalize(curve, None);
        Some((p.x, p.y))
    }

    /// Check the point satisfies the curve equation.
    pub fn is_on_curve(&self, curve: &WeierstrassCurve) -> bool {
        match self.to_affine(curve) {
            None => true,
            Some((x, y)) => curve.is_on_curve(&x, &y),
        }
    }

    /// Mixed addition where `other` has `z = 1` (madd-2007-bl).
    pub fn add_affine(&self, other: &Self, curve: &WeierstrassCurve) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }
        let f = &curve.field;

        let z1z1 = f.sqr(&self.z);
        let u2 = f.mul(&other.x, &z1z1);
        let s2 = f.mul(&f.mul(&other.y, &self.z), &z1z1);

        if self.x == u2 {
            return if self.y == s2 {
                self.double(curve)
            } else {
                Self::infinity()
            };
        }

        let h = f.sub(&u2, &self.x);
        let i = f.mul_small(&f.sqr(&h), 4);
        let j = f.mul(&h, &i);
        let r = f.mul_small(&f.sub(&s2, &self.y), 2);
        let v = f.mul(&self.x, &i);

        let x3 = f.sub(&f.sub(&f.sqr(&r), &j), &f.mul_small(&v, 2));
        let y3 = f.sub(
            &f.mul(&r, &f.sub(&v, &x3)),
            &f.mul_small(&f.mul(&self.y, &j), 2),
        );
        let z3 = f.mul_small(&f.mul(&self.z, &h), 2);

        JacobianPoint::new(x3, y3, z3)
    }
}

impl Group for JacobianPoint {
    type Curve = WeierstrassCurve;

    #[inline]
    fn identity() -> Self {
        Self::infinity()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    fn from_affine(_curve: &WeierstrassCurve, x: BigUint, y: BigUint) -> Self {
        JacobianPoint::new(x, y, BigUint::one())
    }

    /// add-2007-bl, falling back to the mixed form when either side has `z = 1`.
    fn add(&self, other: &Self, curve: &WeierstrassCurve) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }
        if other.z.is_one() {
            return self.add_affine(other, curve);
        }
        if self.z.is_one() {
            return other.add_affine(self, curve);
        }
        let f = &curve.field;

        let z1z1 = f.sqr(&self.z);
        let z2z2 = f.sqr(&other.z);
        let u1 = f.mul(&self.x, &z2z2);
        let u2 = f.mul(&other.x, &z1z1);
        let s1 = f.mul(&f.mul(&self.y, &other.z), &z2z2);
        let s2 = f.mul(&f.mul(&other.y, &self.z), &z1z1);

        if u1 == u2 {
            return if s1 == s2 {
                self.double(curve)
            } else {
                Self::infinity()
            };
        }

        let h = f.sub(&u2, &u1);
        let i = f.mul_small(&f.sqr(&h), 4);
        let j = f.mul(&h, &i);
        let r = f.mul_small(&f.sub(&s2, &s1), 2);
        let v = f.mul(&u1, &i);

        let x3 = f.sub(&f.sub(&f.sqr(&r), &j), &f.mul_small(&v, 2));
        let y3 = f.sub(
            &f.mul(&r, &f.sub(&v, &x3)),
            &f.mul_small(&f.mul(&s1, &j), 2),
        );
        let z3 = f.mul_small(&f.mul(&f.mul(&self.z, &other.z), &h), 2);

        JacobianPoint::new(x3, y3, z3)
    }

    fn double(&self, curve: &WeierstrassCurve) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::infinity();
        }
        let f = &curve.field;

        let yy = f.sqr(&self.y);
        let zz = f.sqr(&self.z);
        let s = f.mul_small(&f.mul(&self.x, &yy), 4);
        let m = f.add(
            &f.mul_small(&f.sqr(&self.x), 3),
            &f.mul(&curve.a, &f.sqr(&zz)),
        );

        let x3 = f.sub(&f.sqr(&m), &f.mul_small(&s, 2));
        let y3 = f.sub(&f.mul(&m, &f.sub(&s, &x3)), &f.mul_small(&f.sqr(&yy), 8));
        let z3 = f.mul_small(&f.mul(&self.y, &self.z), 2);

        JacobianPoint::new(x3, y3, z3)
    }

    /// Dedicated tripling (tpl-2005-dim) used by the ternary halving engine.
    fn triple(&self, curve: &WeierstrassCurve) -> Self {
        if self.is_infinity() {
            return Self::infinity();
        }
        let f = &curve.field;

        let yy = f.sqr(&self.y);
        let z4 = f.sqr(&f.sqr(&self.z));
        let m = f.add(&f.mul_small(&f.sqr(&self.x), 3), &f.mul(&curve.a, &z4));
        let e = f.sub(&f.mul_small(&f.mul(&self.x, &yy), 12), &f.sqr(&m));
        if e.is_zero() {
            // 3P lands on infinity or P has order 2; take the generic path.
            return self.double(curve).add(self, curve);
        }
        let t = f.mul_small(&f.sqr(&yy), 8);
        let t_me = f.sub(&t, &f.mul(&m, &e));

        let x3 = f.add(
            &f.mul(&f.mul_small(&yy, 8), &t_me),
            &f.mul(&self.x, &f.sqr(&e)),
        );
        let inner = f.add(
            &f.mul_small(&f.mul(&t_me, &f.add(&t, &t_me)), 4),
            &f.mul(&f.sqr(&e), &e),
        );
        let y3 = f.mul(&self.y, &f.neg(&inner));
        let z3 = f.mul(&self.z, &e);

        JacobianPoint::new(x3, y3, z3)
    }

    fn negate(&self, curve: &WeierstrassCurve) -> Self {
        if self.is_infinity() {
            return self.clone();
        }
        JacobianPoint::new(self.x.clone(), curve.field.neg(&self.y), self.z.clone())
    }

    fn normalize(&self, curve: &WeierstrassCurve, z_inv: Option<&BigUint>) -> Self {
        if self.is_infinity() {
            return Self::infinity();
        }
        if self.z.is_one() {
            return self.clone();
        }
        let f = curve.field();
        let zi = match z_inv {
            Some(zi) => zi.clone(),
            None => match f.inv(&self.z) {
                Some(zi) => zi,
                None => return Self::infinity(),
            },
        };
        let zi2 = f.sqr(&zi);
        let zi3 = f.mul(&zi2, &zi);
        JacobianPoint::new(f.mul(&self.x, &zi2), f.mul(&self.y, &zi3), BigUint::one())
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
