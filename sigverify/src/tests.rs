use super::*;
use crate::eddsa::{domain_prefix, hash_domain_to_scalar};
use curve::scalar_mul::wnaf;
use curve::{
    CurveParams, EdwardsCurve, Field, Group, MulConfig, RandomScalar, WeierstrassCurve, ed448, ed25519,
    secp256r1, secp384r1, secp521r1,
};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;

const P256_UX: &str = "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6";
const P256_UY: &str = "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299";
const P256_D: &str = "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";

const P256_SAMPLE_R: &str = "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716";
const P256_SAMPLE_S: &str = "f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8";
const P256_TEST_R: &str = "f1abb023518351cd71d881567b1ea663ed3efcf6c5132b354f28d3b0b7d38367";
const P256_TEST_S: &str = "019f4113742a2b14bd25926b49c649155f267e60d3814b4c0cc84250e46f0083";

const P384_UX: &str = "ec3a4e415b4e19a4568618029f427fa5da9a8bc4ae92e02e06aae5286b300c64def8f0ea9055866064a254515480bc13";
const P384_UY: &str = "8015d9b72d7d57244ea8ef9ac0c621896708a59367f9dfb9f54ca84b3f1c9db1288b231c3ae0d4fe7344fd2533264720";
const P384_D: &str = "6b9d3dad2e1b8c1c05b19875b6659f4de23c3b667bf297ba9aa47740787137d896d5724e4c70a825f872c9ea60d2edf5";
const P384_SAMPLE_R: &str = "94edbb92a5ecb8aad4736e56c691916b3f88140666ce9fa73d64c4ea95ad133c81a648152e44acf96e36dd1e80fabe46";
const P384_SAMPLE_S: &str = "99ef4aeb15f178cea1fe40db2603138f130e740a19624526203b6351d0a3a94fa329c145786e679e7b82c71a38628ac8";

const P521_UX: &str = concat!(
    "01894550d0785932e00eaa23b694f213f8c3121f86dc97a04e5a7167db4e5bcd37",
    "1123d46e45db6b5d5370a7f20fb633155d38ffa16d2bd761dcac474b9a2f5023a4",
);
const P521_UY: &str = concat!(
    "00493101c962cd4d2fddf782285e64584139c2f91b47f87ff82354d6630f746a28",
    "a0db25741b5b34a828008b22acc23f924faafbd4d33f81ea66956dfeaa2bfdfcf5",
);
const P521_D: &str = concat!(
    "00fad06daa62ba3b25d2fb40133da757205de67f5bb0018fee8c86e1b68c7e75ca",
    "a896eb32f1f47c70855836a6d16fcc1466f6d8fbec67db89ec0c08b0e996b83538",
);
const P521_SAMPLE_R: &str = concat!(
    "00c328fafcbd79dd77850370c46325d987cb525569fb63c5d3bc53950e6d4c5f17",
    "4e25a1ee9017b5d450606add152b534931d7d4e8455cc91f9b15bf05ec36e377fa",
);
const P521_SAMPLE_S: &str = concat!(
    "00617cce7cf5064806c467f678d3b4080d6f1cc50af26ca209417308281b68af28",
    "2623eaa63e5b5c0723d8b8c37ff0777b1a20f8ccb1dccc43997f1ee0e44da4a67a",
);

const ED25519_PK: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
const ED25519_SIG: &str = concat!(
    "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155",
    "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
);

const ED448_PK: &str = concat!(
    "5fd7449b59b461fd2ce787ec616ad46a1da1342485a70e1f8a0ea75d80e96778",
    "edf124769b46c7061bd6783df1e50f6cd1fa1abeafe8256180",
);
const ED448_SIG: &str = concat!(
    "533a37f6bbe457251f023c0d88f976ae2dfb504a843e34d2074fd823d41a591f",
    "2b233f034f628281f2fd7a22ddd47d7828c59bd0a21bfd3980ff0d2028d4b18a",
    "9df63e006c5d1c2d345b925d8dc00b4104852db99ac5c7cdda8530a113a0f4db",
    "b61149f05a7363268c71d95808ff2e652600",
);

const ED448_CTX_PK: &str = concat!(
    "43ba28f430cdff456ae531545f7ecd0ac834a55d9358c0372bfa0c6c6798c086",
    "6aea01eb00742802b8438ea4cb82169c235160627b4c3a9480",
);
const ED448_CTX_SIG: &str = concat!(
    "d4f8f6131770dd46f40867d6fd5d5055de43541f8c5e35abbcd001b32a89f7d2",
    "151f7647f11d8ca2ae279fb842d607217fce6e042f6815ea000c85741de5c8da",
    "1144a6a1aba7f96de42505d7a7298524fda538fccbbb754f578c1cad10d54d0d",
    "5428407e85dcbc98a49155c13764e66c3c00",
);

const ED448PH_PK: &str = concat!(
    "259b71c19f83ef77a7abd26524cbdb3161b590a48f7d17de3ee0ba9c52beb743",
    "c09428a131d6b1b57303d90d8132c276d5ed3d5d01c0f53880",
);
const ED448PH_SIG: &str = concat!(
    "822f6901f7480f3d5f562c592994d9693602875614483256505600bbc281ae38",
    "1f54d6bce2ea911574932f52a4e6cadd78769375ec3ffd1b801a0d9b3f4030cd",
    "433964b6457ea39476511214f97469b57dd32dbc560a9a94d00bff07620464a3",
    "ad203df7dc7ce360c3cd3696d9d9fab90f00",
);

fn big(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).expect("hex")
}

fn sec1_key(curve: &'static WeierstrassCurve, ux: &str, uy: &str) -> EcdsaVerifyingKey {
    let mut bytes = vec![0x04];
    bytes.extend(hex::decode(ux).expect("hex"));
    bytes.extend(hex::decode(uy).expect("hex"));
    EcdsaVerifyingKey::from_sec1_bytes(curve, &bytes).expect("key")
}

fn p256_key() -> EcdsaVerifyingKey {
    sec1_key(secp256r1(), P256_UX, P256_UY)
}

fn eddsa_vector(
    curve: &'static EdwardsCurve,
    pk: &str,
    sig: &str,
) -> (EddsaVerifyingKey, EddsaSignature) {
    let pk = hex::decode(pk).expect("hex");
    let sig = hex::decode(sig).expect("hex");
    let key = EddsaVerifyingKey::from_bytes(curve, &pk).expect("key");
    let sig = EddsaSignature::from_bytes(curve, &sig).expect("sig");
    (key, sig)
}

/// ECDSA signature with a caller-chosen nonce.
fn ecdsa_sign(curve: &WeierstrassCurve, d: &BigUint, nonce: &BigUint, msg: &[u8]) -> EcdsaSignature {
    let scalar = Field::new(curve.n.clone());
    let (x, _) = curve.multiply_base(nonce).to_affine(curve).expect("finite");
    let r = x % &curve.n;
    let e = ecdsa::truncate_digest(curve, &curve.digest(msg));
    let s = scalar.mul(
        &scalar.inv(nonce).expect("invertible"),
        &scalar.add(&scalar.reduce(&e), &scalar.mul(&r, d)),
    );
    EcdsaSignature::new(r, s)
}

/// EdDSA signature from a raw secret scalar and nonce.
fn eddsa_sign(
    curve: &'static EdwardsCurve,
    a: &BigUint,
    nonce: &BigUint,
    msg: &[u8],
    domain: Domain<'_>,
) -> (EddsaVerifyingKey, EddsaSignature) {
    let key = EddsaVerifyingKey::from_point(curve, &curve.multiply_base(a));
    let r = encode_edwards(curve, &curve.multiply_base(nonce));
    let prefix = domain_prefix(curve, domain).expect("domain");
    let m = match domain {
        Domain::Prehashed(_) => (curve.prehash)(msg),
        _ => msg.to_vec(),
    };
    let k = hash_domain_to_scalar(curve, &prefix, &r, key.as_bytes(), &m);
    let s = (nonce + k * a) % &curve.l;
    (key, EddsaSignature { r, s })
}

fn flip_bit(v: &BigUint, bit: u64) -> BigUint {
    v ^ (BigUint::from(1u32) << bit)
}

#[test]
fn test_p256_key_matches_private_key() {
    let curve = secp256r1();
    let q = curve.multiply_base(&big(P256_D));
    assert_eq!(EcdsaVerifyingKey::from_point(curve, &q).expect("key"), p256_key());
}

#[test]
fn test_ecdsa_p256_vectors() {
    let key = p256_key();
    let sample = EcdsaSignature::new(big(P256_SAMPLE_R), big(P256_SAMPLE_S));
    let test = EcdsaSignature::new(big(P256_TEST_R), big(P256_TEST_S));

    assert_eq!(key.verify(b"sample", &sample), Ok(true));
    assert_eq!(key.verify(b"test", &test), Ok(true));
    assert_eq!(key.verify(b"test", &sample), Ok(false));
    assert_eq!(key.verify(b"sample", &test), Ok(false));
}

#[test]
fn test_ecdsa_p384_p521_vectors() {
    let cases = [
        (secp384r1(), P384_UX, P384_UY, P384_D, P384_SAMPLE_R, P384_SAMPLE_S),
        (secp521r1(), P521_UX, P521_UY, P521_D, P521_SAMPLE_R, P521_SAMPLE_S),
    ];
    for (curve, ux, uy, d, r, s) in cases {
        let name = curve.id.name();
        let key = sec1_key(curve, ux, uy);
        let derived = curve.multiply_base(&big(d));
        assert_eq!(EcdsaVerifyingKey::from_point(curve, &derived).expect("key"), key, "{name}");

        let sig = EcdsaSignature::new(big(r), big(s));
        assert_eq!(key.verify(b"sample", &sig), Ok(true), "{name}");
        assert_eq!(key.verify_par(b"sample", &sig), Ok(true), "{name}");
        assert_eq!(key.verify(b"test", &sig), Ok(false), "{name}");

        let bytes = sig.to_bytes(curve);
        assert_eq!(bytes.len(), 2 * curve.coordinate_len(), "{name}");
        assert_eq!(EcdsaSignature::from_bytes(curve, &bytes), Ok(sig.clone()), "{name}");

        let tweaked = EcdsaSignature::new(big(r), big(s) + 1u32);
        assert_eq!(key.verify(b"sample", &tweaked), Ok(false), "{name}");
    }
}

#[test]
fn test_ecdsa_rejects_flipped_bits() {
    let key = p256_key();
    let r = big(P256_SAMPLE_R);
    let s = big(P256_SAMPLE_S);
    for bit in [0, 7, 64, 128, 200, 255] {
        let sig = EcdsaSignature::new(flip_bit(&r, bit), s.clone());
        assert_eq!(key.verify(b"sample", &sig), Ok(false), "r bit {bit}");
        let sig = EcdsaSignature::new(r.clone(), flip_bit(&s, bit));
        assert_eq!(key.verify(b"sample", &sig), Ok(false), "s bit {bit}");
    }
}

#[test]
fn test_ecdsa_range_rejection() {
    let key = p256_key();
    let n = secp256r1().n.clone();
    let r = big(P256_SAMPLE_R);
    let s = big(P256_SAMPLE_S);

    let cases = [
        EcdsaSignature::new(r.clone(), n.clone()),
        EcdsaSignature::new(n.clone(), s.clone()),
        EcdsaSignature::new(BigUint::from(0u32), s.clone()),
        EcdsaSignature::new(r.clone(), BigUint::from(0u32)),
        EcdsaSignature::new(r, &n + &s),
    ];
    for sig in &cases {
        assert_eq!(key.verify(b"sample", sig), Err(VerifyError::OutOfRange));
        assert_eq!(key.verify_par(b"sample", sig), Err(VerifyError::OutOfRange));
    }
}

#[test]
fn test_ecdsa_signature_bytes() {
    let curve = secp256r1();
    let sig = EcdsaSignature::new(big(P256_TEST_R), big(P256_TEST_S));
    let bytes = sig.to_bytes(curve);
    assert_eq!(bytes.len(), 64);
    assert_eq!(bytes[32], 0x01);
    assert_eq!(EcdsaSignature::from_bytes(curve, &bytes), Ok(sig));
    assert_eq!(
        EcdsaSignature::from_bytes(curve, &bytes[1..]),
        Err(VerifyError::InvalidSignatureLength { expected: 64, got: 63 })
    );
}

#[test]
fn test_ecdsa_verify_bytes() {
    let curve = secp256r1();
    let key = p256_key().to_sec1_bytes();
    let sig = EcdsaSignature::new(big(P256_SAMPLE_R), big(P256_SAMPLE_S)).to_bytes(curve);

    assert_eq!(ecdsa::verify_bytes(curve, b"sample", &sig, &key), Ok(true));
    assert_eq!(ecdsa::verify_bytes_par(curve, b"sample", &sig, &key), Ok(true));
    assert_eq!(ecdsa::verify_bytes_par(curve, b"sample!", &sig, &key), Ok(false));

    let mut compressed = key[..33].to_vec();
    compressed[0] = 0x02;
    assert_eq!(
        ecdsa::verify_bytes(curve, b"sample", &sig, &compressed),
        Err(VerifyError::Decode(DecodeError::UnsupportedPrefix(0x02)))
    );
    assert_eq!(
        ecdsa::verify_bytes_par(curve, b"sample", &sig, &key[..64]),
        Err(VerifyError::Decode(DecodeError::InvalidLength { expected: 65, got: 64 }))
    );
}

#[test]
fn test_ecdsa_sign_verify_all_curves() {
    let mut rng = StdRng::seed_from_u64(42);
    for curve in [secp256r1(), secp384r1(), secp521r1()] {
        let d = curve.random_scalar(&mut rng);
        let nonce = curve.random_scalar(&mut rng);
        let key = EcdsaVerifyingKey::from_point(curve, &curve.multiply_base(&d)).expect("key");
        let sig = ecdsa_sign(curve, &d, &nonce, b"hello ecdsa");

        assert_eq!(key.verify(b"hello ecdsa", &sig), Ok(true), "{}", curve.id.name());
        assert_eq!(key.verify_par(b"hello ecdsa", &sig), Ok(true), "{}", curve.id.name());
        assert_eq!(key.verify(b"hello ecdsb", &sig), Ok(false), "{}", curve.id.name());

        let other = EcdsaVerifyingKey::from_point(curve, &curve.multiply_base(&nonce)).expect("key");
        assert_eq!(other.verify(b"hello ecdsa", &sig), Ok(false), "{}", curve.id.name());
    }
}

#[test]
fn test_ecdsa_point_at_infinity_is_rejected() {
    // With d = -e / r, u1 * G + u2 * Q = (e + r d) / s * G is the identity.
    let curve = secp256r1();
    let scalar = Field::new(curve.n.clone());
    let msg = b"infinity";
    let e = scalar.reduce(&ecdsa::truncate_digest(curve, &curve.digest(msg)));
    let r = BigUint::from(12345u32);
    let d = scalar.neg(&scalar.mul(&e, &scalar.inv(&r).expect("invertible")));
    let key = EcdsaVerifyingKey::from_point(curve, &curve.multiply_base(&d)).expect("key");
    let sig = EcdsaSignature::new(r, BigUint::from(777u32));

    assert_eq!(key.verify(msg, &sig), Ok(false));
    assert_eq!(key.verify_par(msg, &sig), Ok(false));
}

#[test]
fn test_truncate_digest() {
    let curve = secp256r1();
    let digest = [0xffu8; 64];
    let e = ecdsa::truncate_digest(curve, &digest);
    assert_eq!(e.bits(), 256);
    // P-521 keeps a full SHA-512 digest.
    let e = ecdsa::truncate_digest(secp521r1(), &digest);
    assert_eq!(e.bits(), 512);
}

#[test]
fn test_ed25519_vector() {
    let (key, sig) = eddsa_vector(ed25519(), ED25519_PK, ED25519_SIG);
    assert_eq!(key.as_bytes().len(), ED25519_KEY_SIZE);
    assert_eq!(key.verify(b"", &sig), Ok(true));
    assert_eq!(key.verify_par(b"", &sig), Ok(true));
    assert_eq!(key.verify(b"\x00", &sig), Ok(false));
}

#[test]
fn test_ed25519_corrupted_signature() {
    let (key, sig) = eddsa_vector(ed25519(), ED25519_PK, ED25519_SIG);

    let mut bad = sig.clone();
    bad.s = flip_bit(&bad.s, 0);
    assert_eq!(key.verify(b"", &bad), Ok(false));

    let mut bytes = hex::decode(ED25519_SIG).expect("hex");
    bytes[5] ^= 0x10;
    let bad = EddsaSignature::from_bytes(ed25519(), &bytes).expect("sig");
    assert!(!matches!(key.verify(b"", &bad), Ok(true)));
}

#[test]
fn test_ed25519_corrupted_key() {
    let sig = hex::decode(ED25519_SIG).expect("hex");
    let sig = EddsaSignature::from_bytes(ed25519(), &sig).expect("sig");
    let mut pk = hex::decode(ED25519_PK).expect("hex");
    for i in [0, 13, 31] {
        pk[i] ^= 0x01;
        let result = EddsaVerifyingKey::from_bytes(ed25519(), &pk).and_then(|key| key.verify(b"", &sig));
        assert!(!matches!(result, Ok(true)), "byte {i}");
        pk[i] ^= 0x01;
    }
}

#[test]
fn test_eddsa_range_rejection() {
    for (curve, pk, sig) in [
        (ed25519(), ED25519_PK, ED25519_SIG),
        (ed448(), ED448_PK, ED448_SIG),
    ] {
        let (key, mut sig) = eddsa_vector(curve, pk, sig);
        sig.s = curve.l.clone();
        assert_eq!(key.verify(b"", &sig), Err(VerifyError::OutOfRange));
        assert_eq!(key.verify_par(b"", &sig), Err(VerifyError::OutOfRange));
    }
}

#[test]
fn test_ed448_vectors() {
    let (key, sig) = eddsa_vector(ed448(), ED448_PK, ED448_SIG);
    assert_eq!(key.as_bytes().len(), ED448_KEY_SIZE);
    assert_eq!(key.verify(b"", &sig), Ok(true));
    assert_eq!(key.verify_par(b"", &sig), Ok(true));
    // An empty context is the pure variant.
    assert_eq!(key.verify_ctx(b"", b"", &sig), Ok(true));
    assert_eq!(key.verify_ctx(b"", b"foo", &sig), Ok(false));

    let (key, sig) = eddsa_vector(ed448(), ED448_CTX_PK, ED448_CTX_SIG);
    assert_eq!(key.verify_ctx(&[0x03], b"foo", &sig), Ok(true));
    assert_eq!(key.verify_ctx(&[0x03], b"bar", &sig), Ok(false));
    assert_eq!(key.verify(&[0x03], &sig), Ok(false));

    let (key, sig) = eddsa_vector(ed448(), ED448PH_PK, ED448PH_SIG);
    assert_eq!(key.verify_prehashed(b"abc", b"", &sig), Ok(true));
    assert_eq!(key.verify(b"abc", &sig), Ok(false));
    assert_eq!(key.verify_prehashed(b"abd", b"", &sig), Ok(false));
}

#[test]
fn test_ed25519_variants() {
    let mut rng = StdRng::seed_from_u64(42);
    let curve = ed25519();
    let a = curve.random_scalar(&mut rng);
    let nonce = curve.random_scalar(&mut rng);
    let msg = b"hello eddsa";

    let (key, sig) = eddsa_sign(curve, &a, &nonce, msg, Domain::Pure);
    assert_eq!(key.verify(msg, &sig), Ok(true));

    let (key, sig) = eddsa_sign(curve, &a, &nonce, msg, Domain::Context(b"ctx"));
    assert_eq!(key.verify_ctx(msg, b"ctx", &sig), Ok(true));
    assert_eq!(key.verify_ctx(msg, b"ctz", &sig), Ok(false));
    assert_eq!(key.verify(msg, &sig), Ok(false));
    assert_eq!(key.verify_prehashed(msg, b"ctx", &sig), Ok(false));

    let (key, sig) = eddsa_sign(curve, &a, &nonce, msg, Domain::Prehashed(b""));
    assert_eq!(key.verify_prehashed(msg, b"", &sig), Ok(true));
    assert_eq!(key.verify(msg, &sig), Ok(false));
}

#[test]
fn test_ed448_sign_verify_par() {
    let mut rng = StdRng::seed_from_u64(42);
    let curve = ed448();
    let a = curve.random_scalar(&mut rng);
    let nonce = curve.random_scalar(&mut rng);

    let (key, sig) = eddsa_sign(curve, &a, &nonce, b"par", Domain::Pure);
    assert_eq!(key.verify_par(b"par", &sig), Ok(true));
    assert_eq!(key.verify_par(b"pas", &sig), Ok(false));
    assert_eq!(
        eddsa::verify_with_par(&key, b"par", &sig, Domain::Context(&[0u8; 256])),
        Err(VerifyError::InvalidContext)
    );
}

#[test]
fn test_invalid_context() {
    let (key, sig) = eddsa_vector(ed25519(), ED25519_PK, ED25519_SIG);
    assert_eq!(key.verify_ctx(b"", b"", &sig), Err(VerifyError::InvalidContext));
    assert_eq!(key.verify_ctx(b"", &[7u8; 256], &sig), Err(VerifyError::InvalidContext));
    assert_eq!(key.verify_prehashed(b"", &[7u8; 256], &sig), Err(VerifyError::InvalidContext));
    assert!(key.verify_ctx(b"", &[7u8; 255], &sig).is_ok());
}

#[test]
fn test_domain_prefix() {
    assert!(domain_prefix(ed25519(), Domain::Pure).expect("pure").is_empty());

    let dom2 = domain_prefix(ed25519(), Domain::Prehashed(b"ab")).expect("ph");
    assert_eq!(&dom2[..32], b"SigEd25519 no Ed25519 collisions");
    assert_eq!(&dom2[32..], &[1, 2, b'a', b'b']);

    let dom4 = domain_prefix(ed448(), Domain::Pure).expect("pure");
    assert_eq!(dom4, b"SigEd448\x00\x00");
    let dom4 = domain_prefix(ed448(), Domain::Context(b"foo")).expect("ctx");
    assert_eq!(dom4, b"SigEd448\x00\x03foo");
}

#[test]
fn test_eddsa_signature_length() {
    let bytes = hex::decode(ED25519_SIG).expect("hex");
    assert_eq!(
        EddsaSignature::from_bytes(ed448(), &bytes),
        Err(VerifyError::InvalidSignatureLength { expected: 114, got: 64 })
    );
    assert_eq!(
        eddsa::verify_bytes(ed25519(), b"", &bytes, &hex::decode(ED25519_PK).expect("hex")),
        Ok(true)
    );
}

#[test]
fn test_offload_roundtrip() {
    let mut rng = StdRng::seed_from_u64(42);
    let worker = OffloadWorker::spawn();
    let cfg = MulConfig::default();

    let curve = secp384r1();
    let p = curve.generator().mul_u64(7, curve);
    let k = curve.random_scalar(&mut rng);
    let pending = worker.multiply(&p, &k, curve).expect("send");
    let expected = wnaf::multiply(&p, &k, curve, &cfg);
    assert!(pending.wait().expect("reply").equals(&expected, curve));

    let curve = ed25519();
    let p = curve.generator().mul_u64(7, curve);
    let k = curve.random_scalar(&mut rng);
    let pending = worker.multiply(&p, &k, curve).expect("send");
    let expected = wnaf::multiply(&p, &k, curve, &cfg);
    assert!(pending.wait().expect("reply").equals(&expected, curve));

    assert_eq!(worker.pending(), 0);
}

#[test]
fn test_offload_ids_and_out_of_order_waits() {
    let worker = OffloadWorker::spawn();
    let curve = secp256r1();
    let g = curve.generator();

    let pending: Vec<_> = (1u32..=4)
        .map(|k| worker.multiply(&g, &BigUint::from(k), curve).expect("send"))
        .collect();
    let ids: Vec<u64> = pending.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    for (i, p) in pending.into_iter().enumerate().rev() {
        let got = p.wait().expect("reply");
        assert!(got.equals(&g.mul_u64(i as u64 + 1, curve), curve));
    }
}

#[test]
fn test_verify_offloaded() {
    let worker = OffloadWorker::default();
    let key = p256_key();
    let sig = EcdsaSignature::new(big(P256_SAMPLE_R), big(P256_SAMPLE_S));
    assert_eq!(key.verify_offloaded(&worker, b"sample", &sig), Ok(true));
    assert_eq!(key.verify_offloaded(&worker, b"samplf", &sig), Ok(false));

    let bad = EcdsaSignature::new(big(P256_SAMPLE_R), secp256r1().n.clone());
    assert_eq!(key.verify_offloaded(&worker, b"sample", &bad), Err(VerifyError::OutOfRange));
}

#[test]
fn test_signature_serde() {
    let sig = EcdsaSignature::new(big(P256_SAMPLE_R), big(P256_SAMPLE_S));
    let bytes = bincode::serialize(&sig).expect("serialize");
    let back: EcdsaSignature = bincode::deserialize(&bytes).expect("deserialize");
    assert_eq!(back, sig);

    let (_, sig) = eddsa_vector(ed448(), ED448_PK, ED448_SIG);
    let bytes = bincode::serialize(&sig).expect("serialize");
    let back: EddsaSignature = bincode::deserialize(&bytes).expect("deserialize");
    assert_eq!(back, sig);
}
