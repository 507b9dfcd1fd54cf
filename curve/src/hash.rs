//! Per-curve hash functions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

/// A hash function attached to a curve descriptor.
pub type HashFn = fn(&[u8]) -> Vec<u8>;

/// The hash algorithm a curve is paired with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlg {
    Sha256,
    Sha384,
    Sha512,
    /// SHAKE256 squeezed to a fixed output length in bytes.
    Shake256(usize),
}

impl HashAlg {
    /// Output length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
            HashAlg::Shake256(len) => len,
        }
    }
}

pub fn sha256(msg: &[u8]) -> Vec<u8> {
    Sha256::digest(msg).to_vec()
}

pub fn sha384(msg: &[u8]) -> Vec<u8> {
    Sha384::digest(msg).to_vec()
}

pub fn sha512(msg: &[u8]) -> Vec<u8> {
    Sha512::digest(msg).to_vec()
}

/// SHAKE256 squeezed to `len` bytes.
pub fn shake256(msg: &[u8], len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    Update::update(&mut hasher, msg);
    let mut reader = hasher.finalize_xof();
    let mut out = vec![0u8; len];
    reader.read(&mut out);
    out
}

/// SHAKE256 with the 114-byte output Ed448 signs with.
pub fn shake256_114(msg: &[u8]) -> Vec<u8> {
    shake256(msg, 114)
}

/// SHAKE256 with the 64-byte output Ed448ph prehashes with.
pub fn shake256_64(msg: &[u8]) -> Vec<u8> {
    shake256(msg, 64)
}
