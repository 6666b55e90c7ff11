//! The Fiat-Shamir proof that the two sub-ciphertexts of a dual-receiver
//! message encrypt the same plaintext under independent randomness.
//!
//! The challenge transcript is a fixed byte sequence; reordering or omitting
//! an element changes the challenge and breaks interop with other
//! implementations.

use ed448_goldilocks::{DecafPoint, DecafScalar as Scalar};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

use crate::dre::DrCipher;
use crate::errors::EntropyError;
use crate::group::{random_scalar, G1};
use crate::keys::PublicKey;
use crate::transcript::{concat_and_hash, Item};

/// Closes the challenge transcript.
const DOMAIN_TAG: &[u8] = b"otr4.dre.proof";

/// A dual-encryption proof: the challenge and the two responses.
#[derive(Clone, Copy)]
pub struct DualProof {
    pub(crate) l: Scalar,
    pub(crate) n1: Scalar,
    pub(crate) n2: Scalar,
}

/// Proves that the two sub-ciphertexts share a plaintext, given their
/// ephemeral scalars. Consumes exactly 112 bytes of the source.
pub(crate) fn prove(
    k1: &Scalar,
    k2: &Scalar,
    pub1: &PublicKey,
    pub2: &PublicKey,
    cipher: &DrCipher,
    rng: &mut impl CryptoRngCore,
) -> Result<DualProof, EntropyError> {
    let t1 = random_scalar(rng)?;
    let t2 = random_scalar(rng)?;

    let big_t1 = G1 * t1;
    let big_t2 = G1 * t2;
    // The subtraction is the same-plaintext cross-term.
    let big_t3 = pub1.h * t1 - pub2.h * t2;

    let l = challenge(pub1, pub2, cipher, &big_t1, &big_t2, &big_t3);

    Ok(DualProof { l, n1: t1 - l * *k1, n2: t2 - l * *k2 })
}

/// Verifies a dual-encryption proof by reconstructing the commitments and
/// recomputing the challenge over the identical transcript.
#[must_use]
pub(crate) fn verify(
    proof: &DualProof,
    pub1: &PublicKey,
    pub2: &PublicKey,
    cipher: &DrCipher,
) -> bool {
    let big_t1 = G1 * proof.n1 + cipher.first.u1 * proof.l;
    let big_t2 = G1 * proof.n2 + cipher.second.u1 * proof.l;
    let big_t3 = pub1.h * proof.n1 - pub2.h * proof.n2
        + (cipher.first.e - cipher.second.e) * proof.l;

    let expected = challenge(pub1, pub2, cipher, &big_t1, &big_t2, &big_t3);

    bool::from(expected.ct_eq(&proof.l))
}

fn challenge(
    pub1: &PublicKey,
    pub2: &PublicKey,
    cipher: &DrCipher,
    big_t1: &DecafPoint,
    big_t2: &DecafPoint,
    big_t3: &DecafPoint,
) -> Scalar {
    concat_and_hash(&[
        Item::Point(&G1),
        Item::Point(&pub1.h),
        Item::Point(&pub2.h),
        Item::Point(&cipher.first.u1),
        Item::Point(&cipher.second.u1),
        Item::Point(&cipher.first.e),
        Item::Point(&cipher.second.e),
        Item::Point(big_t1),
        Item::Point(big_t2),
        Item::Point(big_t3),
        Item::Bytes(DOMAIN_TAG),
    ])
}
