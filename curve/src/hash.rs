//! Hashing into the scalar field.

use sha2::{Digest, Sha256};

use crate::Scalar;

/// SHA-256 over the concatenation of `chunks`, reduced modulo `n`.
///
/// No length framing is applied; callers own the transcript layout.
pub fn hash_to_scalar(chunks: &[&[u8]]) -> Scalar {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    let digest: [u8; 32] = hasher.finalize().into();
    Scalar::from_digest(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_is_transparent() {
        let whole = hash_to_scalar(&[b"abcdef"]);
        let split = hash_to_scalar(&[b"ab", b"", b"cdef"]);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_known_digest() {
        // sha256("abc") is below n, so reduction leaves it unchanged
        let s = hash_to_scalar(&[b"abc"]);
        assert_eq!(
            s.to_padded_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
