//! Variable-base signed-window multiplication over an odd-multiple table.

use crate::config::MulConfig;
use crate::curves::CurveParams;
use crate::decompose::compute_wnaf;
use crate::table::OddTable;
use crate::Group;
use num_bigint::BigUint;
use num_traits::Zero;

pub fn multiply<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    if k.is_zero() || point.is_identity() {
        return P::identity();
    }
    let digits = compute_wnaf(k, cfg.signed_window());
    let table = curve.caches().odd_table(point, cfg.signed_window(), cfg.normalize, curve);
    wnaf_core(&table, &digits, curve)
}

/// Builds the table and recodes the scalar on separate rayon tasks.
pub fn multiply_par<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    if k.is_zero() || point.is_identity() {
        return P::identity();
    }
    let (digits, table) = rayon::join(
        || compute_wnaf(k, cfg.signed_window()),
        || curve.caches().odd_table(point, cfg.signed_window(), cfg.normalize, curve),
    );
    wnaf_core(&table, &digits, curve)
}

/// Fold digits most significant first: double, then add the signed entry.
pub fn wnaf_core<P: Group>(table: &OddTable<P>, digits: &[i64], curve: &P::Curve) -> P {
    let mut q = P::identity();
    let Some(top) = digits.len().checked_sub(1) else {
        return q;
    };

    for i in (0..=top).rev() {
        let digit = digits[i];
        if i < top {
            // Another doubling follows when this digit adds nothing.
            q = q.double_deferred(curve, digit == 0 && i > 0);
        }
        if digit != 0 {
            q = q.add_deferred(table.get(digit, curve), curve, i > 0);
        }
    }
    q
}
