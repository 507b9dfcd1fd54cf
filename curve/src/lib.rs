//! Elliptic curve arithmetic over the NIST P-curves and the Edwards curves
//! Ed25519 and Ed448.
//!
//! This crate provides prime field arithmetic with batch inversion, Jacobian
//! and extended Edwards points behind a common [`Group`] trait, scalar
//! recodings, memoised precomputation tables and the scalar multiplication
//! engines in [`scalar_mul`]. Curve parameters are fixed to the descriptors
//! in the `curves` module.

mod batch;
mod config;
mod curves;
mod decompose;
mod edwards;
mod field;
mod group;
pub mod hash;
mod jacobian;
mod random;
pub mod relative;
pub mod scalar_mul;
pub mod table;

pub use batch::batch_inverse;
pub use config::{MulConfig, DEFAULT_WINDOW, MAX_WINDOW, MIN_SIGNED_WINDOW, MIN_WINDOW};
pub use curves::{
    ed25519, ed448, edwards, secp256r1, secp384r1, secp521r1, weierstrass, CurveId, CurveParams,
    EdwardsCurve, WeierstrassCurve, BASE_WINDOW,
};
pub use decompose::{chunk_scalar, compute_wnaf};
pub use edwards::EdwardsPoint;
pub use field::Field;
pub use group::Group;
pub use hash::{HashAlg, HashFn};
pub use jacobian::JacobianPoint;
pub use random::RandomScalar;
pub use scalar_mul::Engine;
