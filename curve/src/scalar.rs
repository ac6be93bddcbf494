//! Scalars modulo the secp256k1 group order.
//! n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
//!
//! Thin wrapper over `k256::Scalar` adding the hex conventions used on the
//! wire: big-endian, lowercase, unpadded on output, padded or unpadded on
//! input.

use core::ops::{Add, Mul, Neg, Sub};

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::errors::CurveError;

/// Number of hex digits in a fully padded scalar.
pub const SCALAR_HEX_LEN: usize = 64;

/// Integer modulo the group order `n`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scalar(pub(crate) k256::Scalar);

impl Scalar {
    /// Additive identity.
    pub const ZERO: Self = Scalar(k256::Scalar::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Scalar(k256::Scalar::ONE);

    /// Create a scalar from a small integer.
    #[inline]
    pub fn from_u64(val: u64) -> Self {
        Scalar(k256::Scalar::from(val))
    }

    /// Parse a canonical big-endian 32-byte encoding.
    ///
    /// Fails with [`CurveError::ScalarOutOfRange`] when the integer is `>= n`.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self, CurveError> {
        let repr = *FieldBytes::from_slice(bytes);
        Option::<k256::Scalar>::from(k256::Scalar::from_repr(repr))
            .map(Scalar)
            .ok_or(CurveError::ScalarOutOfRange)
    }

    /// Big-endian 32-byte encoding.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    /// Reduce a 32-byte big-endian digest modulo `n`.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Scalar(<k256::Scalar as Reduce<U256>>::reduce_bytes(
            FieldBytes::from_slice(digest),
        ))
    }

    /// Parse hex of any width up to the magnitude of `n`.
    ///
    /// Accepts an optional `0x` prefix, odd lengths and leading zeros. The
    /// value must be strictly below `n`; zero is accepted.
    pub fn from_hex(input: &str) -> Result<Self, CurveError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CurveError::InvalidHex);
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > SCALAR_HEX_LEN {
            return Err(CurveError::ScalarOutOfRange);
        }

        let padded = format!("{significant:0>width$}", width = SCALAR_HEX_LEN);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|_| CurveError::InvalidHex)?;
        let scalar = Self::from_be_bytes(&bytes);
        bytes.zeroize();
        scalar
    }

    /// Lowercase big-endian hex without leading zeros (`"0"` for zero).
    pub fn to_hex(&self) -> String {
        let full = self.to_padded_hex();
        let significant = full.trim_start_matches('0');
        if significant.is_empty() {
            "0".to_string()
        } else {
            significant.to_string()
        }
    }

    /// Lowercase big-endian hex, always 64 digits.
    pub fn to_padded_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        bool::from(self.0.is_zero())
    }
}

impl Add for Scalar {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Scalar(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Scalar(self.0 - rhs.0)
    }
}

impl Mul for Scalar {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Scalar(self.0 * rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Scalar(-self.0)
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Scalar::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_HEX: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    #[test]
    fn test_hex_accepts_padded_and_unpadded() {
        let unpadded = Scalar::from_hex("1f").expect("unpadded");
        let padded = Scalar::from_hex(&format!("{:0>64}", "1f")).expect("padded");
        let prefixed = Scalar::from_hex("0x001F").expect("prefixed");
        assert_eq!(unpadded, Scalar::from_u64(31));
        assert_eq!(unpadded, padded);
        assert_eq!(unpadded, prefixed);
    }

    #[test]
    fn test_hex_output_is_unpadded() {
        assert_eq!(Scalar::from_u64(255).to_hex(), "ff");
        assert_eq!(Scalar::ZERO.to_hex(), "0");
        assert_eq!(Scalar::ONE.to_padded_hex().len(), SCALAR_HEX_LEN);
    }

    #[test]
    fn test_hex_rejects_order_and_above() {
        assert_eq!(Scalar::from_hex(ORDER_HEX), Err(CurveError::ScalarOutOfRange));
        let too_long = format!("1{ORDER_HEX}");
        assert_eq!(Scalar::from_hex(&too_long), Err(CurveError::ScalarOutOfRange));

        let leading_zeros = format!("0000{ORDER_HEX}");
        assert_eq!(Scalar::from_hex(&leading_zeros), Err(CurveError::ScalarOutOfRange));
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(Scalar::from_hex(""), Err(CurveError::InvalidHex));
        assert_eq!(Scalar::from_hex("0x"), Err(CurveError::InvalidHex));
        assert_eq!(Scalar::from_hex("12zz"), Err(CurveError::InvalidHex));
        assert_eq!(Scalar::from_hex("-1"), Err(CurveError::InvalidHex));
    }

    #[test]
    fn test_order_minus_one_is_valid() {
        let max = Scalar::from_hex(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
        )
        .expect("n - 1");
        assert_eq!(max + Scalar::ONE, Scalar::ZERO);
        assert_eq!(-Scalar::ONE, max);
    }

    #[test]
    fn test_digest_reduction() {
        let digest = [0xffu8; 32];
        let reduced = Scalar::from_digest(&digest);
        // 2^256 - 1 - n
        assert_eq!(
            reduced.to_hex(),
            "14551231950b75fc4402da1732fc9bebe"
        );
    }
}
