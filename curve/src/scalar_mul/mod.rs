//! Scalar multiplication engines.
//!
//! Every engine computes the same `k * P`; they differ in table shape, scalar
//! recoding and what they memoise. `*_par` variants fork their independent
//! setup steps with `rayon::join` and combine once both finish.

pub mod double_add;
pub mod fixed_base;
pub mod relative;
pub mod split;
pub mod window;
pub mod wnaf;

use crate::config::MulConfig;
use crate::Group;
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};

/// Selects one of the curve-generic engines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engine {
    DoubleAdd,
    SignedWnaf,
    FixedBase,
    Split,
    SplitTriple,
    SplitN,
    Window,
}

impl Engine {
    pub const ALL: [Engine; 7] = [
        Engine::DoubleAdd,
        Engine::SignedWnaf,
        Engine::FixedBase,
        Engine::Split,
        Engine::SplitTriple,
        Engine::SplitN,
        Engine::Window,
    ];
}

/// `k * P` with the chosen engine.
pub fn multiply<P: Group>(engine: Engine, point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    match engine {
        Engine::DoubleAdd => double_add::multiply(point, &BigInt::from(k.clone()), curve),
        Engine::SignedWnaf => wnaf::multiply(point, k, curve, cfg),
        Engine::FixedBase => fixed_base::multiply(point, k, curve, cfg),
        Engine::Split => split::multiply(point, k, curve, cfg),
        Engine::SplitTriple => split::triple(point, k, curve, cfg),
        Engine::SplitN => split::multiply_n(point, k, curve, cfg),
        Engine::Window => window::multiply(point, k, curve, cfg),
    }
}

/// Parallel form of [`multiply`]; engines without independent setup steps
/// run as in the sequential form.
pub fn multiply_par<P: Group>(engine: Engine, point: &P, k: &BigUint, curve: &P::Curve, cfg: &MulConfig) -> P {
    match engine {
        Engine::SignedWnaf => wnaf::multiply_par(point, k, curve, cfg),
        Engine::FixedBase => fixed_base::multiply_par(point, k, curve, cfg),
        Engine::Split => split::multiply_par(point, k, curve, cfg),
        _ => multiply(engine, point, k, curve, cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{ed25519, ed448, secp256r1, secp384r1, secp521r1, CurveParams};
    use crate::random::RandomScalar;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check_engines<C: CurveParams>(curve: &C, scalars: &[BigUint]) {
        let g = curve.generator();
        let p = g.mul_u64(31337, curve);
        let cfg = MulConfig::default();
        for k in scalars {
            let expected_g = double_add::multiply_unsigned(&g, k, curve).normalize(curve, None);
            let expected_p = double_add::multiply_unsigned(&p, k, curve).normalize(curve, None);
            for engine in Engine::ALL {
                let got = multiply(engine, &p, k, curve, &cfg).normalize(curve, None);
                assert_eq!(got, expected_p, "{engine:?} on {:?}", curve.id());
                let got = multiply_par(engine, &g, k, curve, &cfg.normalized()).normalize(curve, None);
                assert_eq!(got, expected_g, "{engine:?} (par) on {:?}", curve.id());
            }
            let base = window::multiply_base(curve, k).normalize(curve, None);
            assert_eq!(base, expected_g);
            let generator = fixed_base::multiply_generator(curve, k).normalize(curve, None);
            assert_eq!(generator, expected_g);
        }
    }

    fn edge_scalars<C: CurveParams>(curve: &C, rng: &mut StdRng) -> Vec<BigUint> {
        let n = curve.order();
        vec![
            BigUint::from(0u32),
            BigUint::from(1u32),
            BigUint::from(2u32),
            n - 1u32,
            n >> 1u32,
            curve.random_scalar(rng),
            curve.random_scalar(rng),
        ]
    }

    #[test]
    fn test_cross_engine_agreement_weierstrass() {
        let mut rng = StdRng::seed_from_u64(42);
        let curve = secp256r1();
        check_engines(curve, &edge_scalars(curve, &mut rng));
        let curve = secp384r1();
        check_engines(curve, &edge_scalars(curve, &mut rng));
    }

    #[test]
    fn test_cross_engine_agreement_p521() {
        let mut rng = StdRng::seed_from_u64(521);
        let curve = secp521r1();
        let scalars = vec![curve.n.clone() - 1u32, curve.random_scalar(&mut rng)];
        check_engines(curve, &scalars);
    }

    #[test]
    fn test_cross_engine_agreement_edwards() {
        let mut rng = StdRng::seed_from_u64(25519);
        let curve = ed25519();
        check_engines(curve, &edge_scalars(curve, &mut rng));
        let curve = ed448();
        check_engines(curve, &edge_scalars(curve, &mut rng));
    }

    #[test]
    fn test_relative_engine_agreement() {
        let mut rng = StdRng::seed_from_u64(1014);
        for curve in [secp256r1(), secp384r1(), secp521r1()] {
            let p = curve.generator().mul_u64(99, curve);
            for k in edge_scalars(curve, &mut rng) {
                let expected = double_add::multiply_unsigned(&p, &k, curve).normalize(curve, None);
                let got = relative::multiply(&p, &k, curve, &MulConfig::default());
                assert_eq!(got.normalize(curve, None), expected);
                let got = relative::multiply_par(&p, &k, curve, &MulConfig::default().normalized());
                assert_eq!(got.normalize(curve, None), expected);
            }
        }
    }
}
