use curve::{CurveParams, RandomScalar, ed25519, secp384r1};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sigverify::{EcdsaVerifyingKey, EddsaSignature, EddsaVerifyingKey, OffloadWorker, ecdsa};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    // Any finite point is a well-formed key; it just won't verify this signature.
    let curve = secp384r1();
    let d = curve.random_scalar(&mut rng);
    let vk = EcdsaVerifyingKey::from_point(curve, &curve.multiply_base(&d)).expect("key");
    let vk_bytes = vk.to_sec1_bytes();
    let vk2 = EcdsaVerifyingKey::from_sec1_bytes(curve, &vk_bytes).expect("decode key");
    assert_eq!(vk, vk2);

    let sig_bytes = vec![0x11u8; 2 * curve.coordinate_len()];
    let ok = ecdsa::verify_bytes(curve, b"hello sigverify", &sig_bytes, &vk_bytes).expect("verify");
    assert!(!ok);

    let worker = OffloadWorker::spawn();
    let sig = sigverify::EcdsaSignature::from_bytes(curve, &sig_bytes).expect("sig");
    let ok = vk2.verify_offloaded(&worker, b"hello sigverify", &sig).expect("verify");
    assert!(!ok);

    let pk = hex::decode("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a").expect("hex");
    let sig = hex::decode(concat!(
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155",
        "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    ))
    .expect("hex");
    let key = EddsaVerifyingKey::from_bytes(ed25519(), &pk).expect("key");
    let sig = EddsaSignature::from_bytes(ed25519(), &sig).expect("sig");

    let sig_wire = bincode::serialize(&sig).expect("serialize sig");
    let sig2: EddsaSignature = bincode::deserialize(&sig_wire).expect("deserialize sig");

    let ok = key.verify_par(b"", &sig2).expect("verify");
    assert!(ok);
    println!("Ed25519 test vector verified on {}", ed25519().id().name());
}
