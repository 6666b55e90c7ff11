//! Three-key Schnorr ring authentication: a signature proving the signer
//! holds the private key matching one of three public keys, without
//! revealing which.

use std::fmt::{Debug, Formatter};

use ed448_goldilocks::{DecafPoint, DecafScalar as Scalar};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

use crate::errors::{DecodeError, EntropyError};
use crate::group::{self, random_scalar, G1, GROUP_ORDER_LE, SCALAR_LEN};
use crate::transcript::{concat_and_hash, extract_scalar, Item};

/// The length of an encoded ring signature in bytes.
pub const SIGMA_LEN: usize = 6 * SCALAR_LEN;

/// A ring signature: (c1, c2, c3, r1, r2, r3) with
/// c1 + c2 + c3 = H(transcript).
#[derive(Clone, Copy)]
pub struct RingSignature {
    pub(crate) c1: Scalar,
    pub(crate) c2: Scalar,
    pub(crate) c3: Scalar,
    pub(crate) r1: Scalar,
    pub(crate) r2: Scalar,
    pub(crate) r3: Scalar,
}

impl RingSignature {
    /// Encodes the signature as the 336-byte concatenation c1 c2 c3 r1 r2
    /// r3.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGMA_LEN] {
        let mut b = [0u8; SIGMA_LEN];
        let scalars = [&self.c1, &self.c2, &self.c3, &self.r1, &self.r2, &self.r3];
        for (slot, s) in scalars.into_iter().enumerate() {
            b[slot * SCALAR_LEN..(slot + 1) * SCALAR_LEN]
                .copy_from_slice(&group::encode_scalar(s));
        }
        b
    }

    /// Decodes a 336-byte signature, enforcing canonical scalar encodings.
    pub fn from_bytes(b: &[u8]) -> Result<RingSignature, DecodeError> {
        if b.len() != SIGMA_LEN {
            return Err(DecodeError::InvalidLength);
        }
        let (c1, cursor) = extract_scalar(b, 0)?;
        let (c2, cursor) = extract_scalar(b, cursor)?;
        let (c3, cursor) = extract_scalar(b, cursor)?;
        let (r1, cursor) = extract_scalar(b, cursor)?;
        let (r2, cursor) = extract_scalar(b, cursor)?;
        let (r3, _) = extract_scalar(b, cursor)?;
        Ok(RingSignature { c1, c2, c3, r1, r2, r3 })
    }
}

impl Debug for RingSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x?}", self.to_bytes())
    }
}

impl Eq for RingSignature {}

impl PartialEq for RingSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

/// Appends a ring signature's canonical encoding, no prefix.
pub fn append_signature(b: &mut Vec<u8>, sigma: &RingSignature) {
    b.extend_from_slice(&sigma.to_bytes());
}

/// Signs `message` under the ring {A, B, T}, where `secret · G1` equals
/// exactly one of the three keys. Consumes exactly 280 bytes of the source:
/// a (c, r) pair for each of the two other positions, then the commitment
/// nonce.
///
/// Exactly-one-match is the caller's contract; if the secret matches none of
/// the keys, the returned signature simply fails verification.
pub fn auth(
    rng: &mut impl CryptoRngCore,
    key_a: &DecafPoint,
    key_b: &DecafPoint,
    key_t: &DecafPoint,
    secret: &Scalar,
    message: &[u8],
) -> Result<RingSignature, EntropyError> {
    let keys = [key_a, key_b, key_t];
    let held = G1 * *secret;
    let j = keys.iter().position(|&key| bool::from(held.ct_eq(key))).unwrap_or(0);

    let mut c = [Scalar::ZERO; 3];
    let mut r = [Scalar::ZERO; 3];
    for i in 0..3 {
        if i != j {
            c[i] = random_scalar(rng)?;
            r[i] = random_scalar(rng)?;
        }
    }
    let t = random_scalar(rng)?;

    let mut commitments = [DecafPoint::IDENTITY; 3];
    for i in 0..3 {
        commitments[i] =
            if i == j { G1 * t } else { G1 * r[i] + *keys[i] * c[i] };
    }

    let challenge = ring_challenge(key_a, key_b, key_t, &commitments, message);
    c[j] = challenge - c[(j + 1) % 3] - c[(j + 2) % 3];
    r[j] = t - c[j] * *secret;

    Ok(RingSignature { c1: c[0], c2: c[1], c3: c[2], r1: r[0], r2: r[1], r3: r[2] })
}

/// Verifies a ring signature over `message` under the ring {A, B, T}.
/// A single boolean; no reason codes.
#[must_use]
pub fn verify(
    key_a: &DecafPoint,
    key_b: &DecafPoint,
    key_t: &DecafPoint,
    sigma: &RingSignature,
    message: &[u8],
) -> bool {
    let keys = [key_a, key_b, key_t];
    let c = [sigma.c1, sigma.c2, sigma.c3];
    let r = [sigma.r1, sigma.r2, sigma.r3];

    let mut commitments = [DecafPoint::IDENTITY; 3];
    for i in 0..3 {
        commitments[i] = G1 * r[i] + *keys[i] * c[i];
    }

    let expected = ring_challenge(key_a, key_b, key_t, &commitments, message);

    bool::from((sigma.c1 + sigma.c2 + sigma.c3).ct_eq(&expected))
}

fn ring_challenge(
    key_a: &DecafPoint,
    key_b: &DecafPoint,
    key_t: &DecafPoint,
    commitments: &[DecafPoint; 3],
    message: &[u8],
) -> Scalar {
    concat_and_hash(&[
        Item::Point(&G1),
        Item::Bytes(&GROUP_ORDER_LE),
        Item::Point(key_a),
        Item::Point(key_b),
        Item::Point(key_t),
        Item::Point(&commitments[0]),
        Item::Point(&commitments[1]),
        Item::Point(&commitments[2]),
        Item::Bytes(message),
    ])
}
