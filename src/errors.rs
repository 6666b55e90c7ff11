use thiserror::Error;

/// An error returned when the random source could not supply enough bytes.
///
/// Every operation that samples scalars reads the source in a single linear
/// pass and consumes exactly the bytes it needs; a short read aborts the
/// operation with no partial output.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("cannot source enough entropy")]
pub struct EntropyError;

/// An error returned when decoding a fixed-width field was unsuccessful.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// Decoding failed because the buffer was shorter than the fixed field
    /// width.
    #[error("buffer shorter than a fixed-width field")]
    InvalidLength,

    /// Decoding failed because the bytes were not a canonical encoding of a
    /// prime-order group element.
    #[error("invalid point encoding")]
    InvalidPoint,

    /// Decoding failed because the bytes were not a canonical scalar.
    #[error("invalid scalar encoding")]
    InvalidScalar,
}

/// An error returned when decrypting a dual-receiver message was
/// unsuccessful.
///
/// The ciphertext may have been altered, or it may not have been encrypted
/// for the given receiver. The two variants exist for local diagnostics
/// only; both read as "invalid ciphertext" and neither should be surfaced to
/// an untrusted peer.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DecryptError {
    /// The proof binding the two sub-ciphertexts did not verify.
    #[error("invalid ciphertext")]
    InvalidProof,

    /// The Cramer-Shoup validity equation failed for the selected receiver.
    #[error("invalid ciphertext")]
    InvalidCiphertext,
}
