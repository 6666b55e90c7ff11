//! Cramer-Shoup key material.

use std::fmt::{Debug, Formatter};

use ed448_goldilocks::{DecafPoint, DecafScalar as Scalar};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

use crate::errors::{DecodeError, EntropyError};
use crate::group::{self, random_scalar, G1, G2, POINT_LEN, SCALAR_LEN};
use crate::transcript;

/// The length of an encoded public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 3 * POINT_LEN;

/// The length of an encoded private key in bytes.
pub const PRIVATE_KEY_LEN: usize = 5 * SCALAR_LEN;

/// A Cramer-Shoup public key: the points c = x1·G1 + x2·G2,
/// d = y1·G1 + y2·G2, and h = z·G1.
#[derive(Clone, Copy)]
pub struct PublicKey {
    pub(crate) c: DecafPoint,
    pub(crate) d: DecafPoint,
    pub(crate) h: DecafPoint,
}

impl PublicKey {
    /// Encodes the public key as the 168-byte concatenation (c, d, h).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        let mut b = [0u8; PUBLIC_KEY_LEN];
        b[..POINT_LEN].copy_from_slice(&group::encode_point(&self.c));
        b[POINT_LEN..2 * POINT_LEN].copy_from_slice(&group::encode_point(&self.d));
        b[2 * POINT_LEN..].copy_from_slice(&group::encode_point(&self.h));
        b
    }

    /// Decodes a 168-byte public key, enforcing canonical point encodings
    /// and h ≠ identity.
    pub fn from_bytes(b: &[u8]) -> Result<PublicKey, DecodeError> {
        if b.len() != PUBLIC_KEY_LEN {
            return Err(DecodeError::InvalidLength);
        }
        let (c, cursor) = transcript::extract_point(b, 0)?;
        let (d, cursor) = transcript::extract_point(b, cursor)?;
        let (h, _) = transcript::extract_point(b, cursor)?;
        if bool::from(h.ct_eq(&DecafPoint::IDENTITY)) {
            return Err(DecodeError::InvalidPoint);
        }
        Ok(PublicKey { c, d, h })
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x?}", self.to_bytes())
    }
}

impl Eq for PublicKey {}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

/// A Cramer-Shoup private key: the five scalars (x1, x2, y1, y2, z).
#[derive(Clone)]
pub struct PrivateKey {
    pub(crate) x1: Scalar,
    pub(crate) x2: Scalar,
    pub(crate) y1: Scalar,
    pub(crate) y2: Scalar,
    pub(crate) z: Scalar,
}

impl PrivateKey {
    /// Generates a private key from five uniform scalars, consuming exactly
    /// 280 bytes of the source.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Result<PrivateKey, EntropyError> {
        Ok(PrivateKey {
            x1: random_scalar(rng)?,
            x2: random_scalar(rng)?,
            y1: random_scalar(rng)?,
            y2: random_scalar(rng)?,
            z: random_scalar(rng)?,
        })
    }

    /// Derives the corresponding public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            c: G1 * self.x1 + *G2 * self.x2,
            d: G1 * self.y1 + *G2 * self.y2,
            h: G1 * self.z,
        }
    }

    /// Encodes the private key as the 280-byte concatenation
    /// (x1, x2, y1, y2, z).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        let mut b = [0u8; PRIVATE_KEY_LEN];
        for (slot, s) in
            [&self.x1, &self.x2, &self.y1, &self.y2, &self.z].into_iter().enumerate()
        {
            b[slot * SCALAR_LEN..(slot + 1) * SCALAR_LEN]
                .copy_from_slice(&group::encode_scalar(s));
        }
        b
    }

    /// Decodes a 280-byte private key, enforcing canonical scalar encodings.
    pub fn from_bytes(b: &[u8]) -> Result<PrivateKey, DecodeError> {
        if b.len() != PRIVATE_KEY_LEN {
            return Err(DecodeError::InvalidLength);
        }
        let (x1, cursor) = transcript::extract_scalar(b, 0)?;
        let (x2, cursor) = transcript::extract_scalar(b, cursor)?;
        let (y1, cursor) = transcript::extract_scalar(b, cursor)?;
        let (y2, cursor) = transcript::extract_scalar(b, cursor)?;
        let (z, _) = transcript::extract_scalar(b, cursor)?;
        Ok(PrivateKey { x1, x2, y1, y2, z })
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Never print the scalars themselves.
        write!(f, "PrivateKey({:02x?})", self.public_key().to_bytes())
    }
}
