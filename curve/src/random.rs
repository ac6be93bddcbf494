use core::fmt::Display;

use rand::TryRngCore;
use zeroize::Zeroize;

use crate::errors::CurveError;
use crate::Scalar;

/// Helper trait for sampling secret scalars.
pub trait RandomField: Sized {
    /// Sample uniformly from `[1, n - 1]`.
    ///
    /// Failures of the random source surface as [`CurveError::Entropy`];
    /// there is no fallback source.
    fn random<R>(rng: &mut R) -> Result<Self, CurveError>
    where
        R: TryRngCore,
        R::Error: Display;
}

impl RandomField for Scalar {
    fn random<R>(rng: &mut R) -> Result<Self, CurveError>
    where
        R: TryRngCore,
        R::Error: Display,
    {
        let mut bytes = [0u8; 32];
        // Rejection sampling keeps the distribution uniform; a 32-byte draw
        // lands outside [1, n - 1] with probability below 2^-127.
        let scalar = loop {
            rng.try_fill_bytes(&mut bytes)
                .map_err(|e| CurveError::Entropy(e.to_string()))?;
            match Scalar::from_be_bytes(&bytes) {
                Ok(s) if !s.is_zero() => break s,
                _ => continue,
            }
        };
        bytes.zeroize();
        Ok(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Yields a fixed byte pattern, then real randomness.
    struct PatternThenRng {
        pattern: Vec<[u8; 32]>,
        inner: StdRng,
    }

    impl rand::RngCore for PatternThenRng {
        fn next_u32(&mut self) -> u32 {
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            if let Some(next) = self.pattern.pop() {
                dst.copy_from_slice(&next);
            } else {
                self.inner.fill_bytes(dst);
            }
        }
    }

    struct BrokenRng;

    impl TryRngCore for BrokenRng {
        type Error = std::io::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Err(std::io::Error::other("no entropy"))
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Err(std::io::Error::other("no entropy"))
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
            Err(std::io::Error::other("no entropy"))
        }
    }

    #[test]
    fn test_rejects_zero_and_overflow() {
        let mut rng = PatternThenRng {
            // popped from the back: zero first, then 2^256 - 1
            pattern: vec![[0xff; 32], [0u8; 32]],
            inner: StdRng::seed_from_u64(7),
        };
        let s = Scalar::random(&mut rng).expect("sample");
        assert!(!s.is_zero());
        assert!(rng.pattern.is_empty());
    }

    #[test]
    fn test_entropy_failure_is_reported() {
        let err = Scalar::random(&mut BrokenRng).expect_err("must fail");
        assert!(matches!(err, CurveError::Entropy(msg) if msg.contains("no entropy")));
    }

    #[test]
    fn test_samples_differ() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Scalar::random(&mut rng).expect("a");
        let b = Scalar::random(&mut rng).expect("b");
        assert_ne!(a, b);
    }
}
