//! Curve descriptors for the supported NIST and Edwards curves.
//!
//! Each descriptor bundles the field, group order, coefficients, generator,
//! paired hash function and the memo caches for its points. Descriptors are
//! built once behind `LazyLock` statics and handed out as `&'static`
//! references, so every point operation takes its curve explicitly.

use crate::edwards::EdwardsPoint;
use crate::field::Field;
use crate::group::Group;
use crate::hash::{self, HashAlg, HashFn};
use crate::jacobian::JacobianPoint;
use crate::table::Caches;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Window width of the generator's fixed-base table.
pub const BASE_WINDOW: u32 = 8;

/// Identifies one of the supported curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    Secp256r1,
    Secp384r1,
    Secp521r1,
    Ed25519,
    Ed448,
}

impl CurveId {
    pub fn name(self) -> &'static str {
        match self {
            CurveId::Secp256r1 => "secp256r1",
            CurveId::Secp384r1 => "secp384r1",
            CurveId::Secp521r1 => "secp521r1",
            CurveId::Ed25519 => "Ed25519",
            CurveId::Ed448 => "Ed448",
        }
    }

    pub fn is_edwards(self) -> bool {
        matches!(self, CurveId::Ed25519 | CurveId::Ed448)
    }
}

/// What the scalar multiplication engines need to know about a curve.
pub trait CurveParams: Send + Sync + 'static {
    type Point: Group<Curve = Self>;

    fn id(&self) -> CurveId;
    fn field(&self) -> &Field;
    /// Order of the prime subgroup generated by the base point.
    fn order(&self) -> &BigUint;
    /// Bit size of the curve, which sizes the fixed-base window table.
    fn bits(&self) -> u32;
    fn generator(&self) -> Self::Point;
    fn base_window(&self) -> u32;
    fn caches(&self) -> &Caches<Self::Point>;
    /// Hash `msg` with the curve's paired hash function.
    fn digest(&self, msg: &[u8]) -> Vec<u8>;
}

/// Short Weierstrass curve `y^2 = x^3 + ax + b`.
pub struct WeierstrassCurve {
    pub id: CurveId,
    pub oid: &'static str,
    pub field: Field,
    pub n: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
    pub h: u32,
    pub bit: u32,
    pub hash_alg: HashAlg,
    pub hash: HashFn,
    pub base_window: u32,
    /// `a == p - 3`, which enables the cheaper co-Z doubling.
    pub a_is_minus3: bool,
    caches: Caches<JacobianPoint>,
}

impl WeierstrassCurve {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: CurveId,
        oid: &'static str,
        p: &str,
        n: &str,
        b: &str,
        gx: &str,
        gy: &str,
        bit: u32,
        hash_alg: HashAlg,
        hash: HashFn,
    ) -> Self {
        let field = Field::new(from_hex(p));
        let a = field.modulus() - 3u32;
        WeierstrassCurve {
            id,
            oid,
            n: from_hex(n),
            a,
            b: from_hex(b),
            gx: from_hex(gx),
            gy: from_hex(gy),
            h: 1,
            bit,
            hash_alg,
            hash,
            base_window: BASE_WINDOW,
            a_is_minus3: true,
            caches: Caches::new(),
            field,
        }
    }

    /// Check `y^2 == x^3 + ax + b` for affine coordinates.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let f = &self.field;
        if x >= f.modulus() || y >= f.modulus() {
            return false;
        }
        let lhs = f.sqr(y);
        let x3 = f.mul(&f.sqr(x), x);
        let rhs = f.add(&f.add(&x3, &f.mul(&self.a, x)), &self.b);
        lhs == rhs
    }

    /// Byte length of one encoded coordinate.
    pub fn coordinate_len(&self) -> usize {
        self.bit.div_ceil(8) as usize
    }

    /// `k * G` through the generator's window table.
    pub fn multiply_base(&self, k: &BigUint) -> JacobianPoint {
        crate::scalar_mul::window::multiply_base(self, k)
    }
}

impl CurveParams for WeierstrassCurve {
    type Point = JacobianPoint;

    fn id(&self) -> CurveId {
        self.id
    }

    fn field(&self) -> &Field {
        &self.field
    }

    fn order(&self) -> &BigUint {
        &self.n
    }

    fn bits(&self) -> u32 {
        self.bit
    }

    fn generator(&self) -> JacobianPoint {
        JacobianPoint::from_affine(self, self.gx.clone(), self.gy.clone())
    }

    fn base_window(&self) -> u32 {
        self.base_window
    }

    fn caches(&self) -> &Caches<JacobianPoint> {
        &self.caches
    }

    fn digest(&self, msg: &[u8]) -> Vec<u8> {
        (self.hash)(msg)
    }
}

/// Twisted Edwards curve `a*x^2 + y^2 = 1 + d*x^2*y^2`.
pub struct EdwardsCurve {
    pub id: CurveId,
    pub field: Field,
    /// Prime subgroup order `L`.
    pub l: BigUint,
    pub a: BigUint,
    pub d: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
    pub h: u32,
    pub bit: u32,
    /// Length of an encoded point, and of each signature half.
    pub key_len: usize,
    pub hash_alg: HashAlg,
    pub hash: HashFn,
    /// Prehash applied to the message by the `ph` signature variants.
    pub prehash: HashFn,
    /// A square root of -1, present when `p = 5 mod 8`.
    pub sqrt_m1: Option<BigUint>,
    pub base_window: u32,
    caches: Caches<EdwardsPoint>,
}

impl EdwardsCurve {
    /// Check `a*x^2 + y^2 == 1 + d*x^2*y^2` for affine coordinates.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let f = &self.field;
        if x >= f.modulus() || y >= f.modulus() {
            return false;
        }
        let xx = f.sqr(x);
        let yy = f.sqr(y);
        let lhs = f.add(&f.mul(&self.a, &xx), &yy);
        let rhs = f.add(&BigUint::one(), &f.mul(&self.d, &f.mul(&xx, &yy)));
        lhs == rhs
    }

    /// Square root of `u / v`, or `None` when the ratio is not a square.
    ///
    /// Both roots are valid; callers pick the sign they need.
    pub fn sqrt_ratio(&self, u: &BigUint, v: &BigUint) -> Option<BigUint> {
        let f = &self.field;
        let p = f.modulus();

        if p.mod_floor(&BigUint::from(4u32)) == BigUint::from(3u32) {
            // x = u^3 v (u^5 v^3)^((p-3)/4)
            let u2 = f.sqr(u);
            let u3 = f.mul(&u2, u);
            let u5 = f.mul(&u3, &u2);
            let v3 = f.mul(&f.sqr(v), v);
            let e = (p - 3u32) >> 2u32;
            let x = f.mul(&f.mul(&u3, v), &f.pow(&f.mul(&u5, &v3), &e));
            return (f.mul(v, &f.sqr(&x)) == f.reduce(u)).then_some(x);
        }

        // x = u v^3 (u v^7)^((p-5)/8)
        let v2 = f.sqr(v);
        let v3 = f.mul(&v2, v);
        let v7 = f.mul(&f.sqr(&v3), v);
        let e = (p - 5u32) >> 3u32;
        let x = f.mul(&f.mul(u, &v3), &f.pow(&f.mul(u, &v7), &e));
        let vxx = f.mul(v, &f.sqr(&x));
        let u = f.reduce(u);
        if vxx == u {
            Some(x)
        } else if vxx == f.neg(&u) {
            self.sqrt_m1.as_ref().map(|m1| f.mul(&x, m1))
        } else {
            None
        }
    }

    /// Recover `x` from `y` and the encoded sign bit of `x`.
    pub fn recover_x(&self, y: &BigUint, sign: bool) -> Option<BigUint> {
        let f = &self.field;
        let yy = f.sqr(y);
        let u = f.sub(&yy, &BigUint::one());
        let v = f.sub(&f.mul(&self.d, &yy), &self.a);
        let x = self.sqrt_ratio(&u, &v)?;
        if x.is_zero() && sign {
            return None;
        }
        if x.is_odd() != sign {
            Some(f.neg(&x))
        } else {
            Some(x)
        }
    }

    /// `k * B` through the generator's window table.
    pub fn multiply_base(&self, k: &BigUint) -> EdwardsPoint {
        crate::scalar_mul::window::multiply_base(self, k)
    }
}

impl CurveParams for EdwardsCurve {
    type Point = EdwardsPoint;

    fn id(&self) -> CurveId {
        self.id
    }

    fn field(&self) -> &Field {
        &self.field
    }

    fn order(&self) -> &BigUint {
        &self.l
    }

    fn bits(&self) -> u32 {
        self.bit
    }

    fn generator(&self) -> EdwardsPoint {
        EdwardsPoint::from_affine(self, self.gx.clone(), self.gy.clone())
    }

    fn base_window(&self) -> u32 {
        self.base_window
    }

    fn caches(&self) -> &Caches<EdwardsPoint> {
        &self.caches
    }

    fn digest(&self, msg: &[u8]) -> Vec<u8> {
        (self.hash)(msg)
    }
}

fn from_hex(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("curve constants are valid hex")
}

static SECP256R1: LazyLock<WeierstrassCurve> = LazyLock::new(|| {
    WeierstrassCurve::new(
        CurveId::Secp256r1,
        "1.2.840.10045.3.1.7",
        "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
        "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
        "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
        "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
        256,
        HashAlg::Sha256,
        hash::sha256,
    )
});

static SECP384R1: LazyLock<WeierstrassCurve> = LazyLock::new(|| {
    WeierstrassCurve::new(
        CurveId::Secp384r1,
        "1.3.132.0.34",
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973",
        "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
        "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
        "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
        384,
        HashAlg::Sha384,
        hash::sha384,
    )
});

static SECP521R1: LazyLock<WeierstrassCurve> = LazyLock::new(|| {
    WeierstrassCurve::new(
        CurveId::Secp521r1,
        "1.3.132.0.35",
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "01fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409",
        "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00",
        "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66",
        "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650",
        521,
        HashAlg::Sha512,
        hash::sha512,
    )
});

static ED25519: LazyLock<EdwardsCurve> = LazyLock::new(|| {
    let p = (BigUint::one() << 255u32) - 19u32;
    let field = Field::new(p.clone());
    let sqrt_m1 = field.pow(&BigUint::from(2u32), &((&p - 1u32) >> 2u32));
    EdwardsCurve {
        id: CurveId::Ed25519,
        l: from_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        a: &p - 1u32,
        d: from_hex("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"),
        gx: from_hex("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
        gy: from_hex("6666666666666666666666666666666666666666666666666666666666666658"),
        h: 8,
        bit: 255,
        key_len: 32,
        hash_alg: HashAlg::Sha512,
        hash: hash::sha512,
        prehash: hash::sha512,
        sqrt_m1: Some(sqrt_m1),
        base_window: BASE_WINDOW,
        caches: Caches::new(),
        field,
    }
});

static ED448: LazyLock<EdwardsCurve> = LazyLock::new(|| {
    let p = (BigUint::one() << 448u32) - (BigUint::one() << 224u32) - 1u32;
    let field = Field::new(p.clone());
    EdwardsCurve {
        id: CurveId::Ed448,
        l: from_hex("3fffffffffffffffffffffffffffffffffffffffffffffffffffffff7cca23e9c44edb49aed63690216cc2728dc58f552378c292ab5844f3"),
        a: BigUint::one(),
        d: &p - 39081u32,
        gx: from_hex("4f1970c66bed0ded221d15a622bf36da9e146570470f1767ea6de324a3d3a46412ae1af72ab66511433b80e18b00938e2626a82bc70cc05e"),
        gy: from_hex("693f46716eb6bc248876203756c9c7624bea73736ca3984087789c1e05a0c2d73ad3ff1ce67c39c4fdbd132c4ed7c8ad9808795bf230fa14"),
        h: 4,
        bit: 448,
        key_len: 57,
        hash_alg: HashAlg::Shake256(114),
        hash: hash::shake256_114,
        prehash: hash::shake256_64,
        sqrt_m1: None,
        base_window: BASE_WINDOW,
        caches: Caches::new(),
        field,
    }
});

pub fn secp256r1() -> &'static WeierstrassCurve {
    &SECP256R1
}

pub fn secp384r1() -> &'static WeierstrassCurve {
    &SECP384R1
}

pub fn secp521r1() -> &'static WeierstrassCurve {
    &SECP521R1
}

pub fn ed25519() -> &'static EdwardsCurve {
    &ED25519
}

pub fn ed448() -> &'static EdwardsCurve {
    &ED448
}

/// Look up a Weierstrass descriptor by id.
pub fn weierstrass(id: CurveId) -> Option<&'static WeierstrassCurve> {
    match id {
        CurveId::Secp256r1 => Some(secp256r1()),
        CurveId::Secp384r1 => Some(secp384r1()),
        CurveId::Secp521r1 => Some(secp521r1()),
        CurveId::Ed25519 | CurveId::Ed448 => None,
    }
}

/// Look up an Edwards descriptor by id.
pub fn edwards(id: CurveId) -> Option<&'static EdwardsCurve> {
    match id {
        CurveId::Ed25519 => Some(ed25519()),
        CurveId::Ed448 => Some(ed448()),
        _ => None,
    }
}
