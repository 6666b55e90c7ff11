#![warn(missing_docs)]

//! The cryptographic core of an OTRv4-style secure messaging handshake,
//! built over the Decaf448 prime-order group.
//!
//! Three tightly-coupled primitives:
//!
//! - **Dual-receiver encryption** ([`dr_enc`]/[`dr_dec`]): Cramer-Shoup
//!   encryption of one plaintext to two independent recipients, bound by a
//!   proof that both ciphertexts carry the same message. Either recipient's
//!   private key recovers the plaintext.
//! - **Ring authentication** ([`auth`]/[`verify`]): a three-key Schnorr ring
//!   signature proving the signer holds the private key matching one of
//!   {A, B, T} without revealing which.
//! - **SMP secret derivation** ([`generate_smp_secret`]): a fixed-width
//!   hash mixing two long-term fingerprints, a session id, and a
//!   user-supplied secret.
//!
//! The crate is purely functional: no shared state, no background work, and
//! the only external resource is a randomness source borrowed per call.
//!
//! ```
//! use rand::rngs::OsRng;
//! use otr4::{dr_dec, dr_enc, Plaintext, PrivateKey, Receiver};
//!
//! // Alice and Bea hold Cramer-Shoup keypairs.
//! let alice = PrivateKey::generate(&mut OsRng)?;
//! let bea = PrivateKey::generate(&mut OsRng)?;
//!
//! // Anyone can encrypt a fresh secret to both of them at once.
//! let secret = Plaintext::random(&mut OsRng)?;
//! let message = dr_enc(&secret, &mut OsRng, &alice.public_key(), &bea.public_key())?;
//!
//! // Either private key opens its half of the message.
//! let opened = dr_dec(
//!     &message,
//!     &alice.public_key(),
//!     &bea.public_key(),
//!     &bea,
//!     Receiver::Second,
//! )
//! .expect("valid ciphertext");
//! assert_eq!(secret.to_bytes(), opened.to_bytes());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::dre::{
    dr_dec, dr_enc, DrMessage, Plaintext, Receiver, DR_MESSAGE_LEN, PLAINTEXT_LEN,
};
pub use self::errors::{DecodeError, DecryptError, EntropyError};
pub use self::group::{hash_to_scalar, POINT_LEN, SCALAR_LEN};
pub use self::keys::{PrivateKey, PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
pub use self::ring::{append_signature, auth, verify, RingSignature, SIGMA_LEN};
pub use self::smp::{generate_smp_secret, SMP_SECRET_LEN};

pub mod dre;
mod errors;
mod group;
pub mod keys;
mod nizk;
pub mod ring;
pub mod smp;
pub mod transcript;

#[cfg(test)]
pub(crate) mod testutil {
    use core::num::NonZeroU32;

    use rand_core::{CryptoRng, Error, RngCore};

    /// Replays a fixed byte string in a single linear pass, failing once it
    /// runs dry. The in-crate equivalent of handing an operation an
    /// exhaustible entropy source.
    pub struct FixedRng {
        data: Vec<u8>,
        pos: usize,
    }

    impl FixedRng {
        pub fn new(data: Vec<u8>) -> FixedRng {
            FixedRng { data, pos: 0 }
        }
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, out: &mut [u8]) {
            self.try_fill_bytes(out).expect("test rng out of bytes");
        }

        fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), Error> {
            if self.data.len() - self.pos < out.len() {
                let code = NonZeroU32::new(Error::CUSTOM_START).expect("nonzero code");
                return Err(Error::from(code));
            }
            out.copy_from_slice(&self.data[self.pos..self.pos + out.len()]);
            self.pos += out.len();
            Ok(())
        }
    }

    impl CryptoRng for FixedRng {}
}
