//! Fixed-base multiplication over unsigned `w`-bit chunks (multibase).
//!
//! The table spans every chunk value, so each chunk is a single lookup with
//! no sign handling. Worth it when the table is reused, as for the generator.

use crate::config::MulConfig;
use crate::curves::CurveParams;
use crate::decompose::chunk_scalar;
use crate::table::BaseTable;
use crate::Group;
use num_bigint::BigUint;

pub fn multiply<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    let chunks = chunk_scalar(k, cfg.window());
    if chunks.is_empty() || point.is_identity() {
        return P::identity();
    }
    let table = curve.caches().base_table(point, cfg.window(), cfg.normalize, curve);
    multibase_core(&table, &chunks, curve)
}

pub fn multiply_par<P: Group>(point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    if point.is_identity() {
        return P::identity();
    }
    let (chunks, table) = rayon::join(
        || chunk_scalar(k, cfg.window()),
        || curve.caches().base_table(point, cfg.window(), cfg.normalize, curve),
    );
    multibase_core(&table, &chunks, curve)
}

/// `k * G` with the generator's normalised table of width `base_window`.
pub fn multiply_generator<C: CurveParams>(curve: &C, k: &BigUint) -> C::Point {
    let cfg = MulConfig::with_window(curve.base_window()).normalized();
    multiply(&curve.generator(), k, curve, &cfg)
}

pub fn multibase_core<P: Group>(table: &BaseTable<P>, chunks: &[usize], curve: &P::Curve) -> P {
    let Some((low, high)) = chunks.split_first() else {
        return P::identity();
    };

    let mut q = P::identity();
    for &chunk in high.iter().rev() {
        q = q.add(table.get(chunk), curve);
        q = q.double_n(table.w(), curve);
    }
    q.add(table.get(*low), curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{ed25519, secp256r1};
    use crate::scalar_mul::double_add;
    use num_traits::Zero;

    #[test]
    fn test_multibase_matches_double_add() {
        let curve = secp256r1();
        let g = curve.generator().mul_u64(3, curve);
        let k = curve.n.clone() >> 3u32;
        let expected = double_add::multiply_unsigned(&g, &k, curve);
        for w in [1, 3, 4, 5] {
            let cfg = MulConfig::with_window(w);
            assert!(multiply(&g, &k, curve, &cfg).equals(&expected, curve));
        }
        let par = multiply_par(&g, &k, curve, &MulConfig::default().normalized());
        assert!(par.equals(&expected, curve));
    }

    #[test]
    fn test_zero_chunks_inside_scalar() {
        let curve = ed25519();
        let b = curve.generator();
        // 0x1000_0001 has six zero chunks between its ends.
        let k = BigUint::from(0x1000_0001u64);
        let cfg = MulConfig::default();
        assert!(multiply(&b, &k, curve, &cfg).equals(&double_add::multiply_unsigned(&b, &k, curve), curve));
        assert!(multiply(&b, &BigUint::zero(), curve, &cfg).is_identity());
    }

    #[test]
    fn test_multiply_generator() {
        let curve = ed25519();
        let k = curve.l.clone() - 1u32;
        let expected = curve.generator().negate(curve);
        assert!(multiply_generator(curve, &k).equals(&expected, curve));
    }
}
