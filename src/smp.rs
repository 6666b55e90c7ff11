//! Socialist Millionaires' Protocol secret derivation.

use sha3::{Digest, Sha3_512};

/// The length of a derived SMP secret in bytes.
pub const SMP_SECRET_LEN: usize = 64;

/// Derives the shared SMP secret:
/// SHA3-512(fpA ‖ fpB ‖ ssid ‖ secret), 64 bytes.
///
/// Fingerprint and ssid lengths are fixed by the surrounding protocol
/// (typically 64 and 8 bytes); no length constraint is imposed here.
#[must_use]
pub fn generate_smp_secret(
    fp_a: &[u8],
    fp_b: &[u8],
    ssid: &[u8],
    secret: &[u8],
) -> [u8; SMP_SECRET_LEN] {
    let digest = Sha3_512::new()
        .chain_update(fp_a)
        .chain_update(fp_b)
        .chain_update(ssid)
        .chain_update(secret)
        .finalize();
    digest.into()
}
