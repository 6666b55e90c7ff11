//! Deterministic transcript assembly: concatenation of group elements,
//! scalars, and raw bytes, plus the fixed-width appenders and cursor
//! decoders the wire formats are built from.
//!
//! Challenge scalars are derived by hashing a transcript with SHAKE-256; the
//! byte sequence is part of the interop contract, so items are appended in
//! exactly the order given with no implicit framing.

use ed448_goldilocks::{DecafPoint, DecafScalar as Scalar};

use crate::errors::DecodeError;
use crate::group::{self, POINT_LEN, SCALAR_LEN};

/// A transcript element.
#[derive(Clone, Copy)]
pub enum Item<'a> {
    /// A group element, appended as its canonical 56-byte decaf encoding.
    Point(&'a DecafPoint),

    /// A scalar, appended as its canonical 56-byte encoding.
    Scalar(&'a Scalar),

    /// Raw bytes, appended as-is with no length prefix.
    Bytes(&'a [u8]),
}

/// Concatenates the canonical encodings of the given items into a fresh
/// buffer.
///
/// # Panics
///
/// Panics when fewer than two items are supplied: a one-element transcript
/// is a caller bug, not an input error.
#[must_use]
pub fn concat(items: &[Item<'_>]) -> Vec<u8> {
    assert!(items.len() >= 2, "programmer error: missing concat arguments");

    let mut b = Vec::with_capacity(items.len() * POINT_LEN);
    for item in items {
        match *item {
            Item::Point(p) => b.extend_from_slice(&group::encode_point(p)),
            Item::Scalar(s) => b.extend_from_slice(&group::encode_scalar(s)),
            Item::Bytes(data) => b.extend_from_slice(data),
        }
    }
    b
}

/// Concatenates the given items and hashes the transcript to a scalar.
#[must_use]
pub fn concat_and_hash(items: &[Item<'_>]) -> Scalar {
    group::hash_to_scalar(&concat(items))
}

/// Appends a 32-bit big-endian word.
pub fn append_word32(b: &mut Vec<u8>, data: u32) {
    b.extend_from_slice(&data.to_be_bytes());
}

/// Appends a 64-bit big-endian word.
pub fn append_word64(b: &mut Vec<u8>, data: u64) {
    b.extend_from_slice(&data.to_be_bytes());
}

/// Appends a length-prefixed blob: a 32-bit big-endian length, then the
/// payload.
pub fn append_data(b: &mut Vec<u8>, data: &[u8]) {
    append_word32(b, u32::try_from(data.len()).expect("unexpected overflow"));
    b.extend_from_slice(data);
}

/// Appends the minimal big-endian magnitude of a nonnegative integer,
/// length-prefixed. Leading zero bytes are stripped; zero encodes as an
/// empty blob.
pub fn append_mpi(b: &mut Vec<u8>, magnitude: &[u8]) {
    let first = magnitude.iter().position(|&x| x != 0).unwrap_or(magnitude.len());
    append_data(b, &magnitude[first..]);
}

/// Appends a point's canonical encoding, no prefix.
pub fn append_point(b: &mut Vec<u8>, p: &DecafPoint) {
    b.extend_from_slice(&group::encode_point(p));
}

/// Appends a scalar's canonical encoding, no prefix.
pub fn append_scalar(b: &mut Vec<u8>, s: &Scalar) {
    b.extend_from_slice(&group::encode_scalar(s));
}

/// Reads a 56-byte canonical point at `cursor` and returns it with the
/// advanced cursor.
pub fn extract_point(b: &[u8], cursor: usize) -> Result<(DecafPoint, usize), DecodeError> {
    let end = cursor.checked_add(POINT_LEN).ok_or(DecodeError::InvalidLength)?;
    let chunk = b.get(cursor..end).ok_or(DecodeError::InvalidLength)?;
    let mut bytes = [0u8; POINT_LEN];
    bytes.copy_from_slice(chunk);
    let p = group::decode_point(&bytes).ok_or(DecodeError::InvalidPoint)?;
    Ok((p, end))
}

/// Reads a 56-byte canonical scalar at `cursor` and returns it with the
/// advanced cursor.
pub fn extract_scalar(b: &[u8], cursor: usize) -> Result<(Scalar, usize), DecodeError> {
    let end = cursor.checked_add(SCALAR_LEN).ok_or(DecodeError::InvalidLength)?;
    let chunk = b.get(cursor..end).ok_or(DecodeError::InvalidLength)?;
    let mut bytes = [0u8; SCALAR_LEN];
    bytes.copy_from_slice(chunk);
    let s = group::decode_scalar(&bytes).ok_or(DecodeError::InvalidScalar)?;
    Ok((s, end))
}
