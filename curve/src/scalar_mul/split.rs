//! Recursive halving: `k * P` from a cached `floor(k / 2) * P`.
//!
//! Repeated multiplications of one point by related scalars hit the product
//! cache, which is bounded per curve (see [`crate::table::DEFAULT_PRODUCT_CAPACITY`]).

use crate::config::MulConfig;
use crate::curves::CurveParams;
use crate::scalar_mul::wnaf;
use crate::table::ProductKey;
use crate::Group;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;

fn cached_multiply<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    curve
        .caches()
        .products
        .get_or_insert_with(ProductKey::new(point, k), || wnaf::multiply(point, k, curve, cfg))
}

fn cached_multiply_par<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    curve
        .caches()
        .products
        .get_or_insert_with(ProductKey::new(point, k), || wnaf::multiply_par(point, k, curve, cfg))
}

fn finish<P: Group>(q: P, curve: &P::Curve, cfg: &MulConfig) -> P {
    if cfg.normalize {
        q.normalize(curve, None)
    } else {
        q
    }
}

/// `2T` or `2T + P` with `T = floor(k / 2) * P`.
pub fn multiply<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let t = cached_multiply(point, &(k >> 1u32), curve, cfg);
    halve_finish(t, point, k, curve, cfg)
}

pub fn multiply_par<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let t = cached_multiply_par(point, &(k >> 1u32), curve, cfg);
    halve_finish(t, point, k, curve, cfg)
}

fn halve_finish<P: Group>(t: P, point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let doubled = t.double(curve);
    let q = if k.is_odd() {
        doubled.add(point, curve)
    } else {
        doubled
    };
    finish(q, curve, cfg)
}

/// Ternary variant: `k = 3q + r`, result `3T + rP` with `T = q * P`.
pub fn triple<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let (q, r) = k.div_rem(&BigUint::from(3u32));
    let t = cached_multiply(point, &q, curve, cfg).triple(curve);
    let out = match r.to_u32() {
        Some(1) => t.add(point, curve),
        Some(2) => t.add(&point.double(curve), curve),
        _ => t,
    };
    finish(out, curve, cfg)
}

/// Strip the low `w` bits at once: `2^w * T + rem * P` with `T = (k >> w) * P`.
///
/// `rem * P` comes from an odd-multiple table of width `w + 1`; an even
/// remainder uses `(rem + 1)P - P`.
pub fn multiply_n<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let w = cfg.window();
    let base = k >> w;
    // w <= MAX_WINDOW, so the low digit holds the whole remainder.
    let rem = (k.iter_u64_digits().next().unwrap_or(0) & ((1u64 << w) - 1)) as i64;

    let shifted = cached_multiply(point, &base, curve, cfg).double_n(w, curve);
    if rem == 0 {
        return finish(shifted, curve, cfg);
    }

    let table = curve.caches().odd_table(point, w + 1, cfg.normalize, curve);
    let out = if rem & 1 == 1 {
        shifted.add(table.get(rem, curve), curve)
    } else {
        let above = table.get(rem + 1, curve).sub(point, curve);
        shifted.add(&above, curve)
    };
    finish(out, curve, cfg)
}

/// Drop every cached product for this curve.
pub fn clear_cache<C: CurveParams>(curve: &C) {
    curve.caches().products.clear();
}
