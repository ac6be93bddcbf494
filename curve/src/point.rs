//! Points of the secp256k1 group.

use core::ops::{Add, Mul, Neg, Sub};

use k256::elliptic_curve::group::{Group, GroupEncoding};
use k256::elliptic_curve::sec1::{FromEncodedPoint, Tag};
use k256::{EncodedPoint, ProjectivePoint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CurveError;
use crate::scalar::Scalar;

/// Size of a SEC1 compressed point.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Size of a SEC1 uncompressed point.
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// Element of the secp256k1 group, held in projective coordinates.
///
/// Decoding never yields the identity; arithmetic may, and callers that
/// need a public value check [`GroupElement::is_identity`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GroupElement(pub(crate) ProjectivePoint);

impl GroupElement {
    /// The standard base point `G`.
    #[inline]
    pub fn generator() -> Self {
        GroupElement(ProjectivePoint::GENERATOR)
    }

    /// The point at infinity.
    #[inline]
    pub fn identity() -> Self {
        GroupElement(ProjectivePoint::IDENTITY)
    }

    /// Compute `scalar * G`.
    #[inline]
    pub fn mul_generator(scalar: &Scalar) -> Self {
        GroupElement(ProjectivePoint::GENERATOR * scalar.0)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }

    /// Decode a compressed or uncompressed SEC1 encoding.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CurveError> {
        if bytes.len() != COMPRESSED_POINT_SIZE && bytes.len() != UNCOMPRESSED_POINT_SIZE {
            return Err(CurveError::InvalidPoint("unexpected encoding length"));
        }

        let encoded =
            EncodedPoint::from_bytes(bytes).map_err(|_| CurveError::InvalidPoint("bad tag"))?;
        // Only 02/03 and 04. The x-only compact tag would give one point
        // several accepted encodings.
        match (bytes.len(), encoded.tag()) {
            (COMPRESSED_POINT_SIZE, Tag::CompressedEvenY | Tag::CompressedOddY)
            | (UNCOMPRESSED_POINT_SIZE, Tag::Uncompressed) => {}
            _ => return Err(CurveError::InvalidPoint("bad tag")),
        }
        let point = Option::<ProjectivePoint>::from(ProjectivePoint::from_encoded_point(&encoded))
            .ok_or(CurveError::InvalidPoint("not on curve"))?;

        if bool::from(point.is_identity()) {
            return Err(CurveError::InvalidPoint("identity"));
        }

        Ok(GroupElement(point))
    }

    /// SEC1 compressed encoding.
    ///
    /// The identity encodes as 33 zero bytes, which [`Self::from_sec1_bytes`]
    /// refuses.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let encoded = self.0.to_affine().to_bytes();
        let mut out = [0u8; COMPRESSED_POINT_SIZE];
        out.copy_from_slice(encoded.as_slice());
        out
    }

    /// Decode SEC1 hex (compressed or uncompressed, either case).
    pub fn from_hex(input: &str) -> Result<Self, CurveError> {
        let bytes = hex::decode(input.trim()).map_err(|_| CurveError::InvalidHex)?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Lowercase hex of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }
}

impl Add for GroupElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        GroupElement(self.0 + rhs.0)
    }
}

impl Sub for GroupElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        GroupElement(self.0 - rhs.0)
    }
}

impl Neg for GroupElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        GroupElement(-self.0)
    }
}

impl Mul<&Scalar> for &GroupElement {
    type Output = GroupElement;

    #[inline]
    fn mul(self, rhs: &Scalar) -> GroupElement {
        GroupElement(self.0 * rhs.0)
    }
}

impl Mul<Scalar> for GroupElement {
    type Output = GroupElement;

    #[inline]
    fn mul(self, rhs: Scalar) -> GroupElement {
        &self * &rhs
    }
}

impl Serialize for GroupElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for GroupElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        GroupElement::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_generator_encoding() {
        assert_eq!(GroupElement::generator().to_hex(), G_COMPRESSED);
        assert_eq!(GroupElement::mul_generator(&Scalar::ONE), GroupElement::generator());
    }

    #[test]
    fn test_uncompressed_decodes_to_same_point() {
        let a = GroupElement::from_hex(G_COMPRESSED).expect("compressed");
        let b = GroupElement::from_hex(G_UNCOMPRESSED).expect("uncompressed");
        assert_eq!(a, b);
        assert_eq!(b.to_hex(), G_COMPRESSED);
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let upper = G_COMPRESSED.to_uppercase();
        assert_eq!(
            GroupElement::from_hex(&upper).expect("uppercase"),
            GroupElement::generator()
        );
    }

    #[test]
    fn test_rejects_identity_and_garbage() {
        let zeros = "00".repeat(COMPRESSED_POINT_SIZE);
        assert!(GroupElement::from_hex(&zeros).is_err());
        assert!(GroupElement::from_hex("00").is_err());
        assert!(GroupElement::from_hex("not hex").is_err());
        assert!(GroupElement::from_hex("").is_err());
        // valid tag, x-coordinate with no matching y
        let off_curve = format!("02{}", "00".repeat(31) + "05");
        assert!(GroupElement::from_hex(&off_curve).is_err());
        // compact x-only tag
        let compact = format!("05{}", &G_COMPRESSED[2..]);
        assert_eq!(
            GroupElement::from_hex(&compact),
            Err(CurveError::InvalidPoint("bad tag"))
        );
        // compressed tag on a 65-byte body, uncompressed tag on 33 bytes
        let mixed = format!("02{}", &G_UNCOMPRESSED[2..]);
        assert!(GroupElement::from_hex(&mixed).is_err());
        let short = format!("04{}", &G_COMPRESSED[2..]);
        assert!(GroupElement::from_hex(&short).is_err());
    }

    #[test]
    fn test_group_law() {
        let g = GroupElement::generator();
        let two = Scalar::from_u64(2);
        assert_eq!(g + g, GroupElement::mul_generator(&two));
        assert_eq!(g * two - g, g);
        assert!((g + (-g)).is_identity());
    }

    #[test]
    fn test_serde_as_hex() {
        let json = serde_json::to_string(&GroupElement::generator()).expect("serialize");
        assert_eq!(json, format!("\"{G_COMPRESSED}\""));
        let back: GroupElement = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, GroupElement::generator());
    }
}
