//! Elliptic Curve Diffie-Hellman (Ephemeral) Support.
//!
//! This module contains a high-level interface for performing ephemeral
//! Diffie-Hellman key exchanges using the secp256k1 elliptic curve.
//!
//! # Usage
//!
//! This usage example is from the perspective of two participants in the
//! exchange, nicknamed "Alice" and "Bob".
//!
//! ```
//! use secp256k1_curve::{EncodedPoint, PublicKey, ecdh::EphemeralSecret};
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! // Alice
//! let alice_secret = EphemeralSecret::random(&mut OsRng);
//! let alice_pk_bytes = EncodedPoint::from(alice_secret.public_key());
//!
//! // Bob
//! let bob_secret = EphemeralSecret::random(&mut OsRng);
//! let bob_pk_bytes = EncodedPoint::from(bob_secret.public_key());
//!
//! // Alice decodes Bob's serialized public key and computes a shared secret from it
//! let bob_public = PublicKey::from_sec1_bytes(bob_pk_bytes.as_ref())
//!     .expect("bob's public key is invalid!"); // In real usage, don't panic, handle this!
//!
//! let alice_shared = alice_secret.diffie_hellman(&bob_public);
//!
//! // Bob decodes Alice's serialized public key and computes the same shared secret
//! let alice_public = PublicKey::from_sec1_bytes(alice_pk_bytes.as_ref())
//!     .expect("alice's public key is invalid!"); // In real usage, don't panic, handle this!
//!
//! let bob_shared = bob_secret.diffie_hellman(&alice_public);
//!
//! // Both participants arrive on the same shared secret
//! assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
//! ```

pub use elliptic_curve::ecdh::diffie_hellman;

use crate::Secp256k1;

/// secp256k1 Ephemeral Diffie-Hellman Secret.
pub type EphemeralSecret = elliptic_curve::ecdh::EphemeralSecret<Secp256k1>;

/// Shared secret value computed via ECDH key agreement.
pub type SharedSecret = elliptic_curve::ecdh::SharedSecret<Secp256k1>;

#[cfg(test)]
mod tests {
    use super::{diffie_hellman, EphemeralSecret};
    use crate::{glv, ProjectivePoint, PublicKey, SecretKey};
    use elliptic_curve::{point::AffineCoordinates, rand_core::OsRng};

    #[test]
    fn shared_secret_agrees() {
        let alice = EphemeralSecret::random(&mut OsRng);
        let bob = EphemeralSecret::random(&mut OsRng);

        let alice_shared = alice.diffie_hellman(&bob.public_key());
        let bob_shared = bob.diffie_hellman(&alice.public_key());
        assert_eq!(alice_shared.raw_secret_bytes(), bob_shared.raw_secret_bytes());
    }

    #[test]
    fn shared_secret_is_x_of_glv_product() {
        let alice = SecretKey::random(&mut OsRng);
        let bob = SecretKey::random(&mut OsRng);
        let bob_public: PublicKey = bob.public_key();

        let shared = diffie_hellman(alice.to_nonzero_scalar(), bob_public.as_affine());
        let expected = glv::mul(
            &ProjectivePoint::from(*bob_public.as_affine()),
            &alice.to_nonzero_scalar(),
        )
        .unwrap()
        .to_affine()
        .x();

        assert_eq!(shared.raw_secret_bytes(), &expected);
    }
}
