//! Dual-receiver Cramer-Shoup encryption: one plaintext encrypted to two
//! independent recipients, bound together by a proof that both ciphertexts
//! carry the same message.

use std::fmt::{Debug, Formatter};

use ed448_goldilocks::{DecafPoint, DecafScalar as Scalar};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

use crate::errors::{DecodeError, DecryptError, EntropyError};
use crate::group::{self, random_scalar, G1, G2, POINT_LEN, SCALAR_LEN};
use crate::keys::{PrivateKey, PublicKey};
use crate::nizk::{self, DualProof};
use crate::transcript::{concat_and_hash, extract_point, extract_scalar, Item};

/// The length of an encoded plaintext in bytes.
pub const PLAINTEXT_LEN: usize = 56;

/// The length of an encoded dual-receiver message in bytes: eight points,
/// then the three proof scalars.
pub const DR_MESSAGE_LEN: usize = 8 * POINT_LEN + 3 * SCALAR_LEN;

/// A plaintext, held as the group element its 56-byte encoding decodes to.
///
/// Only canonical encodings are representable. Payloads that are not
/// encodings of a group element (arbitrary session data, say) must be
/// wrapped by the caller; the intended use encrypts freshly sampled secrets,
/// which [`Plaintext::random`] produces directly.
#[derive(Clone, Copy)]
pub struct Plaintext(pub(crate) DecafPoint);

impl Plaintext {
    /// Decodes a 56-byte plaintext, if it is a canonical group-element
    /// encoding.
    pub fn from_bytes(b: &[u8]) -> Result<Plaintext, DecodeError> {
        if b.len() != PLAINTEXT_LEN {
            return Err(DecodeError::InvalidLength);
        }
        let mut bytes = [0u8; PLAINTEXT_LEN];
        bytes.copy_from_slice(b);
        group::decode_point(&bytes).map(Plaintext).ok_or(DecodeError::InvalidPoint)
    }

    /// Samples a uniformly random plaintext, consuming 112 bytes of the
    /// source.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Plaintext, EntropyError> {
        let mut uniform = [0u8; 2 * PLAINTEXT_LEN];
        rng.try_fill_bytes(&mut uniform).map_err(|_| EntropyError)?;
        Ok(Plaintext(DecafPoint::from_uniform_bytes(&uniform)))
    }

    /// The canonical 56-byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PLAINTEXT_LEN] {
        group::encode_point(&self.0)
    }
}

impl Debug for Plaintext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x?}", self.to_bytes())
    }
}

impl Eq for Plaintext {}

impl PartialEq for Plaintext {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.0.ct_eq(&other.0))
    }
}

/// One Cramer-Shoup ciphertext: (u1, u2, e, v).
#[derive(Clone, Copy)]
pub(crate) struct CsCipher {
    pub(crate) u1: DecafPoint,
    pub(crate) u2: DecafPoint,
    pub(crate) e: DecafPoint,
    pub(crate) v: DecafPoint,
}

/// The two sub-ciphertexts of a dual-receiver message, sharing no
/// randomness.
#[derive(Clone, Copy)]
pub struct DrCipher {
    pub(crate) first: CsCipher,
    pub(crate) second: CsCipher,
}

/// Selects which sub-ciphertext [`dr_dec`] opens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Receiver {
    /// The sub-ciphertext addressed to the first public key.
    First,

    /// The sub-ciphertext addressed to the second public key.
    Second,
}

/// A dual-receiver message: the two ciphertexts plus the proof binding them.
/// Immutable once constructed; created by [`dr_enc`], consumed by
/// [`dr_dec`].
#[derive(Clone, Copy)]
pub struct DrMessage {
    pub(crate) cipher: DrCipher,
    pub(crate) proof: DualProof,
}

impl DrMessage {
    /// Encodes the message as its fixed 616-byte wire form: u1₁ u2₁ e₁ v₁
    /// u1₂ u2₂ e₂ v₂, then the proof scalars ℓ n1 n2. No framing.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DR_MESSAGE_LEN] {
        let mut b = [0u8; DR_MESSAGE_LEN];
        let points = [
            &self.cipher.first.u1,
            &self.cipher.first.u2,
            &self.cipher.first.e,
            &self.cipher.first.v,
            &self.cipher.second.u1,
            &self.cipher.second.u2,
            &self.cipher.second.e,
            &self.cipher.second.v,
        ];
        for (slot, p) in points.into_iter().enumerate() {
            b[slot * POINT_LEN..(slot + 1) * POINT_LEN]
                .copy_from_slice(&group::encode_point(p));
        }
        let scalars = [&self.proof.l, &self.proof.n1, &self.proof.n2];
        for (slot, s) in scalars.into_iter().enumerate() {
            let at = 8 * POINT_LEN + slot * SCALAR_LEN;
            b[at..at + SCALAR_LEN].copy_from_slice(&group::encode_scalar(s));
        }
        b
    }

    /// Decodes a 616-byte wire form, enforcing canonical encodings
    /// throughout.
    pub fn from_bytes(b: &[u8]) -> Result<DrMessage, DecodeError> {
        if b.len() != DR_MESSAGE_LEN {
            return Err(DecodeError::InvalidLength);
        }
        let (u11, cursor) = extract_point(b, 0)?;
        let (u21, cursor) = extract_point(b, cursor)?;
        let (e1, cursor) = extract_point(b, cursor)?;
        let (v1, cursor) = extract_point(b, cursor)?;
        let (u12, cursor) = extract_point(b, cursor)?;
        let (u22, cursor) = extract_point(b, cursor)?;
        let (e2, cursor) = extract_point(b, cursor)?;
        let (v2, cursor) = extract_point(b, cursor)?;
        let (l, cursor) = extract_scalar(b, cursor)?;
        let (n1, cursor) = extract_scalar(b, cursor)?;
        let (n2, _) = extract_scalar(b, cursor)?;
        Ok(DrMessage {
            cipher: DrCipher {
                first: CsCipher { u1: u11, u2: u21, e: e1, v: v1 },
                second: CsCipher { u1: u12, u2: u22, e: e2, v: v2 },
            },
            proof: DualProof { l, n1, n2 },
        })
    }
}

/// Encrypts one plaintext to two recipients and proves both sub-ciphertexts
/// equal. Consumes exactly 224 bytes of the source, in a single linear pass.
///
/// The two public keys should be distinct; that is the caller's contract and
/// is not enforced here.
pub fn dr_enc(
    message: &Plaintext,
    rng: &mut impl CryptoRngCore,
    pub1: &PublicKey,
    pub2: &PublicKey,
) -> Result<DrMessage, EntropyError> {
    let k1 = random_scalar(rng)?;
    let k2 = random_scalar(rng)?;

    let cipher = DrCipher {
        first: cs_encrypt(&k1, pub1, message),
        second: cs_encrypt(&k2, pub2, message),
    };
    let proof = nizk::prove(&k1, &k2, pub1, pub2, &cipher, rng)?;

    Ok(DrMessage { cipher, proof })
}

/// Decrypts the sub-ciphertext addressed to `receiver`, whose public key
/// must be the one `priv_key` matches.
///
/// The proof is checked first, then the Cramer-Shoup validity equation in
/// constant time; both failures read as an invalid ciphertext and no partial
/// plaintext is ever produced.
pub fn dr_dec(
    message: &DrMessage,
    pub1: &PublicKey,
    pub2: &PublicKey,
    priv_key: &PrivateKey,
    receiver: Receiver,
) -> Result<Plaintext, DecryptError> {
    if !nizk::verify(&message.proof, pub1, pub2, &message.cipher) {
        return Err(DecryptError::InvalidProof);
    }

    let CsCipher { u1, u2, e, v } = match receiver {
        Receiver::First => message.cipher.first,
        Receiver::Second => message.cipher.second,
    };

    let alpha = concat_and_hash(&[Item::Point(&u1), Item::Point(&u2), Item::Point(&e)]);

    let expected =
        u1 * (priv_key.x1 + alpha * priv_key.y1) + u2 * (priv_key.x2 + alpha * priv_key.y2);
    if !bool::from(v.ct_eq(&expected)) {
        return Err(DecryptError::InvalidCiphertext);
    }

    Ok(Plaintext(e - u1 * priv_key.z))
}

fn cs_encrypt(k: &Scalar, pub_key: &PublicKey, message: &Plaintext) -> CsCipher {
    let u1 = G1 * *k;
    let u2 = *G2 * *k;
    let e = pub_key.h * *k + message.0;
    let alpha = concat_and_hash(&[Item::Point(&u1), Item::Point(&u2), Item::Point(&e)]);
    let v = pub_key.c * *k + pub_key.d * (*k * alpha);
    CsCipher { u1, u2, e, v }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use crate::testutil::FixedRng;

    use super::*;

    #[test]
    fn round_trip_both_receivers() {
        let (mut rng, priv1, priv2, pub1, pub2, message) = setup();
        let encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");

        assert_eq!(
            Ok(message),
            dr_dec(&encrypted, &pub1, &pub2, &priv1, Receiver::First)
        );
        assert_eq!(
            Ok(message),
            dr_dec(&encrypted, &pub1, &pub2, &priv2, Receiver::Second)
        );
    }

    #[test]
    fn wrong_receiver_index() {
        let (mut rng, priv1, priv2, pub1, pub2, message) = setup();
        let encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");

        assert_eq!(
            Err(DecryptError::InvalidCiphertext),
            dr_dec(&encrypted, &pub1, &pub2, &priv1, Receiver::Second)
        );
        assert_eq!(
            Err(DecryptError::InvalidCiphertext),
            dr_dec(&encrypted, &pub1, &pub2, &priv2, Receiver::First)
        );
    }

    #[test]
    fn wrong_private_key() {
        let (mut rng, _, _, pub1, pub2, message) = setup();
        let encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");

        let stranger = PrivateKey::generate(&mut rng).expect("generate");
        assert_eq!(
            Err(DecryptError::InvalidCiphertext),
            dr_dec(&encrypted, &pub1, &pub2, &stranger, Receiver::First)
        );
    }

    #[test]
    fn tampered_proof() {
        let (mut rng, priv1, _, pub1, pub2, message) = setup();
        let mut encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");

        encrypted.proof.l = encrypted.proof.l + Scalar::ONE;
        assert_eq!(
            Err(DecryptError::InvalidProof),
            dr_dec(&encrypted, &pub1, &pub2, &priv1, Receiver::First)
        );
    }

    #[test]
    fn swapped_public_keys() {
        let (mut rng, priv1, _, pub1, pub2, message) = setup();
        let encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");

        assert_eq!(
            Err(DecryptError::InvalidProof),
            dr_dec(&encrypted, &pub2, &pub1, &priv1, Receiver::First)
        );
    }

    #[test]
    fn flip_every_byte() {
        let (mut rng, priv1, priv2, pub1, pub2, message) = setup();
        let encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");
        let b = encrypted.to_bytes();

        // Each receiver's check ignores the other's tag components, so the
        // invariant is that no flipped message passes both receivers.
        for i in 0..b.len() {
            let mut b = b;
            b[i] ^= 1 << (i % 8);
            let both = DrMessage::from_bytes(&b).is_ok_and(|m| {
                dr_dec(&m, &pub1, &pub2, &priv1, Receiver::First).is_ok()
                    && dr_dec(&m, &pub1, &pub2, &priv2, Receiver::Second).is_ok()
            });
            assert!(!both, "flip at byte {i} passed both receivers");
        }
    }

    #[test]
    fn wire_round_trip() {
        let (mut rng, _, _, pub1, pub2, message) = setup();
        let encrypted = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");

        let b = encrypted.to_bytes();
        let decoded = DrMessage::from_bytes(&b).expect("decode");
        assert_eq!(b[..], decoded.to_bytes()[..]);
    }

    #[test]
    fn encryption_is_probabilistic() {
        let (mut rng, _, _, pub1, pub2, message) = setup();

        let one = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");
        let two = dr_enc(&message, &mut rng, &pub1, &pub2).expect("encrypt");
        assert_ne!(one.to_bytes()[..], two.to_bytes()[..]);
    }

    #[test]
    fn fixed_rng_is_deterministic() {
        let (_, priv1, _, pub1, pub2, message) = setup();
        let entropy = vec![0x5a; 4 * SCALAR_LEN];

        let one = dr_enc(&message, &mut FixedRng::new(entropy.clone()), &pub1, &pub2)
            .expect("encrypt");
        let two =
            dr_enc(&message, &mut FixedRng::new(entropy), &pub1, &pub2).expect("encrypt");
        assert_eq!(one.to_bytes()[..], two.to_bytes()[..]);
        assert_eq!(
            Ok(message),
            dr_dec(&one, &pub1, &pub2, &priv1, Receiver::First)
        );
    }

    #[test]
    fn entropy_starvation() {
        let (_, _, _, pub1, pub2, message) = setup();

        let mut starved = FixedRng::new(vec![0x5a; 4 * SCALAR_LEN - 1]);
        assert_eq!(
            Err(EntropyError),
            dr_enc(&message, &mut starved, &pub1, &pub2).map(|_| ())
        );
    }

    #[test]
    fn plaintext_codec() {
        let (_, _, _, _, _, message) = setup();

        let b = message.to_bytes();
        assert_eq!(Ok(message), Plaintext::from_bytes(&b));
        assert!(matches!(
            Plaintext::from_bytes(&b[..PLAINTEXT_LEN - 1]),
            Err(DecodeError::InvalidLength)
        ));
        assert!(matches!(
            Plaintext::from_bytes(&[0xff; PLAINTEXT_LEN]),
            Err(DecodeError::InvalidPoint)
        ));
    }

    fn setup() -> (ChaChaRng, PrivateKey, PrivateKey, PublicKey, PublicKey, Plaintext) {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);

        let priv1 = PrivateKey::generate(&mut rng).expect("generate");
        let priv2 = PrivateKey::generate(&mut rng).expect("generate");
        let pub1 = priv1.public_key();
        let pub2 = priv2.public_key();
        let message = Plaintext::random(&mut rng).expect("plaintext");

        (rng, priv1, priv2, pub1, pub2, message)
    }
}
