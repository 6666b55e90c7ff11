//! The Decaf448 group seam: generators, uniform scalar sampling, and the
//! fixed-width point and scalar codecs shared by every transcript and wire
//! format in the crate.

use std::sync::LazyLock;

use ed448_goldilocks::{CompressedDecaf, DecafPoint, DecafScalar as Scalar, DecafScalarBytes as ScalarBytes, WideDecafScalarBytes as WideScalarBytes};
use rand_core::CryptoRngCore;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

use crate::errors::EntropyError;

/// The length of an encoded scalar in bytes.
pub const SCALAR_LEN: usize = 56;

/// The length of an encoded point in bytes.
pub const POINT_LEN: usize = 56;

/// The prime order of the Decaf448 group, encoded as 56 little-endian bytes
/// like every other scalar-sized transcript element.
pub(crate) const GROUP_ORDER_LE: [u8; SCALAR_LEN] = [
    0xf3, 0x44, 0x58, 0xab, 0x92, 0xc2, 0x78, 0x23, 0x55, 0x8f, 0xc5, 0x8d, 0x72, 0xc2, 0x6c,
    0x21, 0x90, 0x36, 0xd6, 0xae, 0x49, 0xdb, 0x4e, 0xc4, 0xe9, 0x23, 0xca, 0x7c, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x3f,
];

/// The primary generator.
pub(crate) const G1: DecafPoint = DecafPoint::GENERATOR;

/// The second Cramer-Shoup generator, derived from a fixed domain string via
/// the group's uniform map. Its discrete log with respect to [`G1`] is
/// unknown.
pub(crate) static G2: LazyLock<DecafPoint> = LazyLock::new(|| {
    let mut uniform = [0u8; 2 * POINT_LEN];
    let mut reader = Shake256::default().chain(b"otr4.group.generator2").finalize_xof();
    reader.read(&mut uniform);
    DecafPoint::from_uniform_bytes(&uniform)
});

/// Hashes arbitrary input to a scalar: SHAKE-256 with a 56-byte output,
/// reduced into the scalar field. Domain separation is the caller's choice
/// of prefix bytes.
#[must_use]
pub fn hash_to_scalar(input: &[u8]) -> Scalar {
    let mut digest = [0u8; SCALAR_LEN];
    let mut reader = Shake256::default().chain(input).finalize_xof();
    reader.read(&mut digest);
    reduce_bytes(&digest)
}

/// Interprets 56 little-endian bytes as an integer and reduces it into the
/// scalar field. Full-width reduction, not rejection sampling.
#[must_use]
pub(crate) fn reduce_bytes(b: &[u8; SCALAR_LEN]) -> Scalar {
    let mut wide = WideScalarBytes::default();
    wide[..SCALAR_LEN].copy_from_slice(b);
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Draws one uniform scalar, consuming exactly 56 bytes of the source.
pub(crate) fn random_scalar(rng: &mut impl CryptoRngCore) -> Result<Scalar, EntropyError> {
    let mut b = [0u8; SCALAR_LEN];
    rng.try_fill_bytes(&mut b).map_err(|_| EntropyError)?;
    Ok(reduce_bytes(&b))
}

/// The canonical 56-byte encoding of a scalar.
#[must_use]
pub(crate) fn encode_scalar(s: &Scalar) -> [u8; SCALAR_LEN] {
    s.to_bytes()
}

/// Decodes a canonically encoded scalar, if possible.
#[must_use]
pub(crate) fn decode_scalar(b: &[u8; SCALAR_LEN]) -> Option<Scalar> {
    let mut sb = ScalarBytes::default();
    sb[..SCALAR_LEN].copy_from_slice(b);
    Option::from(Scalar::from_canonical_bytes(&sb))
}

/// The canonical 56-byte decaf encoding of a point.
#[must_use]
pub(crate) fn encode_point(p: &DecafPoint) -> [u8; POINT_LEN] {
    p.compress().0
}

/// Decodes a canonical decaf encoding, if possible. Non-canonical
/// representatives and points outside the prime-order group are rejected.
#[must_use]
pub(crate) fn decode_point(b: &[u8; POINT_LEN]) -> Option<DecafPoint> {
    Option::from(CompressedDecaf(*b).decompress())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_round_trip() {
        let s = hash_to_scalar(b"some scalar");
        let b = encode_scalar(&s);
        assert_eq!(Some(s), decode_scalar(&b));
    }

    #[test]
    fn point_round_trip() {
        let p = G1 * hash_to_scalar(b"some point");
        let b = encode_point(&p);
        assert_eq!(Some(p), decode_point(&b));
    }

    #[test]
    fn non_canonical_scalar_rejected() {
        // The group order itself is the smallest non-canonical value.
        assert_eq!(None, decode_scalar(&GROUP_ORDER_LE));
        assert_eq!(None, decode_scalar(&[0xff; SCALAR_LEN]));
    }

    #[test]
    fn order_bytes_reduce_to_zero() {
        assert_eq!(Scalar::ZERO, reduce_bytes(&GROUP_ORDER_LE));
    }

    #[test]
    fn hash_to_scalar_is_deterministic() {
        assert_eq!(hash_to_scalar(b"input"), hash_to_scalar(b"input"));
        assert_ne!(hash_to_scalar(b"input"), hash_to_scalar(b"different input"));
    }

    #[test]
    fn second_generator_is_independent() {
        assert_ne!(DecafPoint::IDENTITY, *G2);
        assert_ne!(G1, *G2);
    }
}
