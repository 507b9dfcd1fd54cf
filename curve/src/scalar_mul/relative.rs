//! Signed-window multiplication on the relative Jacobian doubling chain.
//!
//! Each nonzero digit costs one fused double-add and each zero digit one
//! doubling. On `a = -3` curves the zero-digit doubling uses the cheaper
//! specialised formula.

use crate::batch::batch_inverse;
use crate::config::MulConfig;
use crate::curves::{CurveParams, WeierstrassCurve};
use crate::decompose::compute_wnaf;
use crate::jacobian::JacobianPoint;
use crate::relative::{double_a_minus3, double_add_relative, double_relative, RelativePoint};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// `k * P`. The scalar is reduced modulo the group order first, which keeps
/// every co-Z addition in the chain away from equal or opposite operands.
pub fn multiply(
    point: &JacobianPoint,
    k: &BigUint,
    curve: &WeierstrassCurve,
    cfg: &MulConfig,
) -> JacobianPoint {
    let k = k % &curve.n;
    if k.is_zero() || point.is_infinity() {
        return JacobianPoint::infinity();
    }
    let digits = compute_wnaf(&k, cfg.signed_window());
    let table = relative_table(point, curve, cfg);
    relative_core(&digits, &table, curve)
}

pub fn multiply_par(
    point: &JacobianPoint,
    k: &BigUint,
    curve: &WeierstrassCurve,
    cfg: &MulConfig,
) -> JacobianPoint {
    let k = k % &curve.n;
    if k.is_zero() || point.is_infinity() {
        return JacobianPoint::infinity();
    }
    let (digits, table) = rayon::join(
        || compute_wnaf(&k, cfg.signed_window()),
        || relative_table(point, curve, cfg),
    );
    relative_core(&digits, &table, curve)
}

/// Odd multiples of `P`, aligned to `z = 1` with one batch inversion.
fn relative_table(point: &JacobianPoint, curve: &WeierstrassCurve, cfg: &MulConfig) -> Vec<RelativePoint> {
    let odd = curve.caches().odd_table(point, cfg.signed_window(), cfg.normalize, curve);
    let zs: Vec<BigUint> = odd.points().map(|p| p.z.clone()).collect();
    let inverses = batch_inverse(&curve.field, &zs);
    odd.points()
        .zip(&inverses)
        .map(|(p, zi)| RelativePoint::align(p, curve, Some(zi)))
        .collect()
}

fn relative_core(digits: &[i64], table: &[RelativePoint], curve: &WeierstrassCurve) -> JacobianPoint {
    let lookup = |d: i64| {
        let entry = &table[(d.unsigned_abs() as usize - 1) / 2];
        if d < 0 {
            entry.negate(curve)
        } else {
            entry.clone()
        }
    };

    let Some((&top, rest)) = digits.split_last() else {
        return JacobianPoint::infinity();
    };
    let one = BigUint::one();
    let mut acc = lookup(top);
    for (i, &digit) in rest.iter().enumerate().rev() {
        acc = if digit != 0 {
            double_add_relative(&lookup(digit), &acc, curve)
        } else if curve.a_is_minus3 {
            double_a_minus3(&acc, curve, &one)
        } else {
            double_relative(&acc, curve, i == 0)
        };
    }
    acc.to_jacobian()
}
