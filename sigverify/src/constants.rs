//! Encoding sizes and domain separation tags.

/// Size in bytes of an Ed25519 public key or signature half.
pub const ED25519_KEY_SIZE: usize = 32;

/// Size in bytes of an Ed448 public key or signature half.
pub const ED448_KEY_SIZE: usize = 57;

/// SEC1 tag of an uncompressed point.
pub const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Maximum length of an RFC 8032 context string.
pub const MAX_CONTEXT_LEN: usize = 255;

/// `dom2` prefix for Ed25519ctx and Ed25519ph.
pub const DOM2_PREFIX: &[u8] = b"SigEd25519 no Ed25519 collisions";

/// `dom4` prefix for Ed448 and Ed448ph.
pub const DOM4_PREFIX: &[u8] = b"SigEd448";
