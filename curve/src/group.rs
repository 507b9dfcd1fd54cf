use crate::curves::CurveParams;
use core::fmt::Debug;
use num_bigint::BigUint;

/// Projective point arithmetic shared by the Jacobian and extended Edwards
/// representations. Every operation takes the curve descriptor explicitly.
pub trait Group: Clone + Debug + PartialEq + Send + Sync + 'static {
    type Curve: CurveParams<Point = Self>;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn from_affine(curve: &Self::Curve, x: BigUint, y: BigUint) -> Self;

    fn add(&self, other: &Self, curve: &Self::Curve) -> Self;
    fn double(&self, curve: &Self::Curve) -> Self;
    fn negate(&self, curve: &Self::Curve) -> Self;

    /// Scale to `z = 1`. `z_inv` may carry a precomputed inverse of `z`.
    fn normalize(&self, curve: &Self::Curve, z_inv: Option<&BigUint>) -> Self;

    fn x(&self) -> &BigUint;
    fn y(&self) -> &BigUint;
    fn z(&self) -> &BigUint;

    /// Addition whose result feeds straight into a doubling when `is_next0`
    /// is set, letting representations skip coordinates the doubling ignores.
    #[inline]
    fn add_deferred(&self, other: &Self, curve: &Self::Curve, _is_next0: bool) -> Self {
        self.add(other, curve)
    }

    /// Doubling counterpart of [`Group::add_deferred`].
    #[inline]
    fn double_deferred(&self, curve: &Self::Curve, _is_next0: bool) -> Self {
        self.double(curve)
    }

    fn double_n(&self, n: u32, curve: &Self::Curve) -> Self {
        let mut result = self.clone();
        for _ in 0..n {
            result = result.double(curve);
        }
        result
    }

    fn triple(&self, curve: &Self::Curve) -> Self {
        self.double(curve).add(self, curve)
    }

    #[inline]
    fn sub(&self, other: &Self, curve: &Self::Curve) -> Self {
        self.add(&other.negate(curve), curve)
    }

    /// Equality of the represented points, independent of scaling.
    fn equals(&self, other: &Self, curve: &Self::Curve) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => {
                let a = self.normalize(curve, None);
                let b = other.normalize(curve, None);
                a.x() == b.x() && a.y() == b.y()
            }
            _ => false,
        }
    }

    fn mul_u64(&self, n: u64, curve: &Self::Curve) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = Self::identity();
        let mut temp = self.clone();
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result.add(&temp, curve);
            }
            temp = temp.double(curve);
            bits >>= 1;
        }

        result
    }
}
