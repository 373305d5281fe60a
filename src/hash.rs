//! BLAKE3 checksums over canonical descriptor forms
//!
//! A component's checksum is the BLAKE3 hash of its canonical JSON
//! serialization. Two descriptors with identical fields always hash
//! identically, and any field change yields a different checksum, which is
//! what install-action resolution relies on.

use blake3::Hasher;
use serde::Serialize;

use crate::error::Result;

/// Hash prefix for BLAKE3 checksums
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the checksum of a descriptor's canonical serialized form
pub fn checksum_of<T: Serialize>(value: &T) -> Result<String> {
    let canonical = serde_json::to_vec(value)?;

    let mut hasher = Hasher::new();
    hasher.update(&canonical);

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Verify a checksum matches the expected value
///
/// Tolerates a missing `blake3:` prefix on either side so checksums read
/// back from older stores still compare.
pub fn verify_checksum(expected: &str, actual: &str) -> bool {
    let normalize = |h: &str| {
        if h.starts_with(HASH_PREFIX) {
            h.to_string()
        } else {
            format!("{}{}", HASH_PREFIX, h)
        }
    };

    normalize(expected) == normalize(actual)
}
