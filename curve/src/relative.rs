//! Relative Jacobian coordinates for co-Z doubling chains
//! (Rivain, eprint 2014/1014).
//!
//! Every point in a chain shares an implicit `Z0` taken from the precomputed
//! table. Tables are normalised first, so `Z0 = 1` and the relative `z` is
//! the ordinary Jacobian `z`.

use crate::curves::WeierstrassCurve;
use crate::jacobian::JacobianPoint;
use crate::Group;
use num_bigint::BigUint;
use num_traits::One;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativePoint {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
    /// `a * z^4`, carried between consecutive doublings.
    pub a_z4: Option<BigUint>,
}

impl RelativePoint {
    /// Bring a Jacobian point to `z = 1`, optionally with a precomputed `1/z`.
    pub fn align(p: &JacobianPoint, curve: &WeierstrassCurve, z_inv: Option<&BigUint>) -> Self {
        let n = p.normalize(curve, z_inv);
        RelativePoint {
            x: n.x,
            y: n.y,
            z: BigUint::one(),
            a_z4: Some(curve.a.clone()),
        }
    }

    pub fn negate(&self, curve: &WeierstrassCurve) -> Self {
        RelativePoint {
            x: self.x.clone(),
            y: curve.field.neg(&self.y),
            z: self.z.clone(),
            a_z4: self.a_z4.clone(),
        }
    }

    pub fn to_jacobian(&self) -> JacobianPoint {
        JacobianPoint::new(self.x.clone(), self.y.clone(), self.z.clone())
    }
}

/// `P0 + 2*P1` for an affine `P0`, as two co-Z addition passes.
///
/// The first pass yields `P0 + P1` together with `P1` rescaled to the same
/// `z`; the second adds those two. Neither pass may see equal or opposite
/// operands, which the signed-window chain guarantees for scalars below the
/// group order.
pub fn double_add_relative(
    p0: &RelativePoint,
    p1: &RelativePoint,
    curve: &WeierstrassCurve,
) -> RelativePoint {
    let f = &curve.field;
    let (mut x1, mut y1, mut z) = (p1.x.clone(), p1.y.clone(), p1.z.clone());

    let zz = f.sqr(&z);
    let mut u = f.mul(&p0.x, &zz);
    let mut v = f.mul(&p0.y, &f.mul(&z, &zz));

    for _ in 0..2 {
        let l = f.sub(&y1, &v);
        let dx = f.sub(&x1, &u);
        z = f.mul(&dx, &z);

        let dx2 = f.sqr(&dx);
        let u_scaled = f.mul(&u, &dx2);
        let x1_scaled = f.mul(&x1, &dx2);

        let x3 = f.sub(&f.sub(&f.sqr(&l), &u_scaled), &x1_scaled);
        let dx3 = f.sub(&x1_scaled, &u_scaled);
        let y1_scaled = f.mul(&y1, &dx3);
        let y3 = f.sub(&f.mul(&l, &f.sub(&x1_scaled, &x3)), &y1_scaled);

        // (x1, y1) becomes the sum, (u, v) the rescaled previous operand.
        u = x1_scaled;
        v = y1_scaled;
        x1 = x3;
        y1 = y3;
    }

    RelativePoint {
        x: x1,
        y: y1,
        z,
        a_z4: None,
    }
}

/// `2*P1`, reusing the carried `a*z^4` when present.
///
/// Unless `is_last` is set the result carries its own `a*z^4` for the next
/// doubling in the chain.
pub fn double_relative(p1: &RelativePoint, curve: &WeierstrassCurve, is_last: bool) -> RelativePoint {
    let f = &curve.field;
    let s = match &p1.a_z4 {
        Some(s) => s.clone(),
        None => f.mul(&f.sqr(&f.sqr(&p1.z)), &curve.a),
    };

    let xx = f.sqr(&p1.x);
    let l = f.add(&f.mul_small(&xx, 3), &s);
    let z3 = f.mul_small(&f.mul(&p1.y, &p1.z), 2);

    let yy2 = f.mul_small(&f.sqr(&p1.y), 2);
    let v = f.mul_small(&f.mul(&p1.x, &yy2), 2);
    let x3 = f.sub(&f.sub(&f.sqr(&l), &v), &v);

    let y4_8 = f.mul_small(&f.sqr(&yy2), 2);
    let y3 = f.sub(&f.mul(&l, &f.sub(&v, &x3)), &y4_8);

    let a_z4 = (!is_last).then(|| f.mul_small(&f.mul(&y4_8, &s), 2));

    RelativePoint {
        x: x3,
        y: y3,
        z: z3,
        a_z4,
    }
}

/// Doubling specialised for `a = -3`: `3x^2 + a z^4 = 3(x - z^2)(x + z^2)`.
///
/// `z0_sqr` is the square of the chain's shared `Z0`.
pub fn double_a_minus3(p1: &RelativePoint, curve: &WeierstrassCurve, z0_sqr: &BigUint) -> RelativePoint {
    let f = &curve.field;

    let t = f.mul(&f.sqr(&p1.z), z0_sqr);
    let m = f.mul_small(&f.mul(&f.add(&p1.x, &t), &f.sub(&p1.x, &t)), 3);
    let z3 = f.mul_small(&f.mul(&p1.y, &p1.z), 2);

    let yy2 = f.mul_small(&f.sqr(&p1.y), 2);
    let v = f.mul_small(&f.mul(&p1.x, &yy2), 2);
    let x3 = f.sub(&f.sub(&f.sqr(&m), &v), &v);
    let y3 = f.sub(
        &f.mul(&m, &f.sub(&v, &x3)),
        &f.mul_small(&f.sqr(&yy2), 2),
    );

    RelativePoint {
        x: x3,
        y: y3,
        z: z3,
        a_z4: None,
    }
}
