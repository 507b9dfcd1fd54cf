use num_bigint::BigUint;
use rand::Rng;

use crate::curves::CurveParams;

/// Helper trait for sampling random scalars in `[1, n)`.
pub trait RandomScalar {
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint;
}

impl<C: CurveParams> RandomScalar for C {
    #[inline]
    fn random_scalar<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        let n = self.order();
        // Eight spare bytes keep the modular bias negligible.
        let mut buf = vec![0u8; (n.bits() as usize).div_ceil(8) + 8];
        rng.fill_bytes(&mut buf);
        BigUint::from_bytes_be(&buf) % (n - 1u32) + 1u32
    }
}
