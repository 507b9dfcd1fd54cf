//! Windowed multiplication with explicit per-window offsets.
//!
//! Each window contributes at most one table addition, chosen by
//! scalar-dependent branches and offsets. Only use it with public scalars.

use crate::config::MulConfig;
use crate::curves::CurveParams;
use crate::table::WindowTable;
use crate::Group;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Build the per-window table for `point`.
pub fn precompute<P: Group>(point: &P, w: u32, normalize: bool, curve: &P::Curve) -> WindowTable<P> {
    WindowTable::build(point, w, normalize, curve)
}

/// Sum the table entries selected by the signed windows of `k`.
///
/// A window value above `2^(w-1)` is replaced by its negative complement and
/// carries one into the next window. `k` must fit the table's windows.
pub fn multiply_unsafe<P: Group>(table: &WindowTable<P>, k: &BigUint, curve: &P::Curve) -> P {
    let w = table.w();
    let window_size = table.window_size() as i64;
    let max = 1i64 << w;
    let mask = BigUint::from((1u64 << w) - 1);

    let mut k = k.clone();
    let mut acc = P::identity();
    for window in 0..table.windows() {
        if k.is_zero() {
            break;
        }
        let mut wbits = (&k & &mask).to_i64().unwrap_or_default();
        k >>= w;
        if wbits > window_size {
            wbits -= max;
            k += 1u32;
        }
        if wbits == 0 {
            continue;
        }
        let offset = window * table.window_size() + wbits.unsigned_abs() as usize - 1;
        acc = acc.add(table.entry(offset).signed(wbits < 0, curve), curve);
    }
    acc
}

/// `k * P` through the memoised window table of `P`.
///
/// `k` is reduced modulo the group order, so `P` must lie in the prime-order
/// subgroup.
pub fn multiply<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let k = k % curve.order();
    if k.is_zero() || point.is_identity() {
        return P::identity();
    }
    let table = curve.caches().window_table(point, cfg.signed_window(), cfg.normalize, curve);
    multiply_unsafe(&table, &k, curve)
}

/// `k * G` through the generator's normalised window table of width `base_window`.
pub fn multiply_base<C: CurveParams>(curve: &C, k: &BigUint) -> C::Point {
    let cfg = MulConfig::with_window(curve.base_window()).normalized();
    multiply(&curve.generator(), k, curve, &cfg)
}
