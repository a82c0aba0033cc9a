//! Taproot Schnorr signatures as defined in [BIP340].
//!
//! # About
//!
//! [Schnorr signatures] are a simple group-based digital signature scheme with
//! a number of desirable properties relating to security and composability:
//!
//! - Provably secure: strongly unforgable under chosen message attack (SUF-CMA).
//! - Non-malleable: signatures cannot be altered by an attacker and still verify.
//! - Linear: multiple parties can collaborate to produce a valid signature
//!   a.k.a. multisignatures.
//!
//! Public keys are x-only: a key is the 32-byte x-coordinate of a point whose
//! y-coordinate is even. Secret keys are negated on load when needed so that
//! this holds for every key this module produces.
//!
//! Messages are exactly 32 bytes. The trait-based interfaces hash arbitrary
//! messages with SHA-256 first; the byte-oriented functions reject anything
//! else with [`Error::MalformedEncoding`].
//!
//! # Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use secp256k1_curve::schnorr::{self, SigningKey};
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! let signing_key = SigningKey::random(&mut OsRng);
//! let public_key = signing_key.verifying_key().to_bytes();
//!
//! let message = [0x42u8; 32];
//! let signature = schnorr::sign(&message, &signing_key.to_bytes(), &[0u8; 32])?;
//! assert!(schnorr::verify(&signature, &message, &public_key));
//! # Ok(())
//! # }
//! ```
//!
//! [Schnorr signatures]: https://en.wikipedia.org/wiki/Schnorr_signature
//! [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

#![allow(non_snake_case, clippy::many_single_char_names)]

mod signing;
mod tagged_hash;
mod verifying;

pub use self::{
    signing::SigningKey,
    tagged_hash::tagged_hash,
    verifying::{lift_x, VerifyingKey},
};
pub use signature::{self, rand_core::CryptoRngCore};

#[cfg(feature = "std")]
pub use self::tagged_hash::TaggedHasher;

use crate::{
    arithmetic::FieldElement, AffinePoint, Error, FieldBytes, NonZeroScalar, Result, Scalar,
};
use core::fmt;
use elliptic_curve::{bigint::U256, ff::PrimeField, ops::Reduce, subtle::ConstantTimeEq};
use sha2::Sha256;

pub(crate) const AUX_TAG: &[u8] = b"BIP0340/aux";
pub(crate) const NONCE_TAG: &[u8] = b"BIP0340/nonce";
pub(crate) const CHALLENGE_TAG: &[u8] = b"BIP0340/challenge";

/// Length of messages accepted by the raw signing and verification paths.
pub const MESSAGE_SIZE: usize = 32;

/// `e = int(tagged_hash("BIP0340/challenge", r ‖ px ‖ m)) mod n`
fn challenge(r: &[u8], px: &[u8], msg: &[u8]) -> Scalar {
    let e = tagged_hash(CHALLENGE_TAG, &[r, px, msg]);
    <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&e))
}

/// Taproot Schnorr signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// Taproot Schnorr signature as defined in [BIP340].
///
/// [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki
#[derive(Copy, Clone)]
pub struct Signature {
    r: FieldElement,
    s: NonZeroScalar,
}

impl Signature {
    /// Size of a Taproot Schnorr signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Parse a signature, enforcing `0 < r < p` and `0 < s < n`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTE_SIZE {
            return Err(Error::MalformedEncoding);
        }

        let (r_bytes, s_bytes) = bytes.split_at(Self::BYTE_SIZE / 2);

        let r: FieldElement = Option::from(FieldElement::from_bytes(FieldBytes::from_slice(r_bytes)))
            .ok_or(Error::InputRange)?;

        // R is never the point at infinity, so r = 0 can't be an x-coordinate.
        if r.is_zero().into() {
            return Err(Error::InputRange);
        }

        let s = Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(s_bytes)))
            .and_then(|s| Option::<NonZeroScalar>::from(NonZeroScalar::new(s)))
            .ok_or(Error::InputRange)?;

        Ok(Self { r, s })
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(&self.r.to_bytes());
        s_bytes.copy_from_slice(&self.s.to_repr());
        ret
    }

    /// Get the `r` component of this signature.
    fn r(&self) -> &FieldElement {
        &self.r
    }

    /// Get the `s` component of this signature.
    fn s(&self) -> &NonZeroScalar {
        &self.s
    }

    /// Split this signature into its `r` and `s` components.
    fn split(&self) -> (&FieldElement, &NonZeroScalar) {
        (self.r(), self.s())
    }
}

impl Eq for Signature {}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        (self.r == other.r) && (self.s.ct_eq(&other.s).into())
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        Ok(Self::from_slice(bytes)?)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_bytes())
    }
}

impl signature::SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }
}

impl signature::PrehashSignature for Signature {
    type Digest = Sha256;
}

/// A normalized key pair: the secret scalar `d` and the even-y point `d·G`.
#[derive(Clone, Copy)]
pub struct ExtendedPublicKey {
    /// Secret scalar, negated if needed so that `point` has even y.
    pub scalar: NonZeroScalar,

    /// Public point with even y.
    pub point: AffinePoint,

    /// x-only encoding of `point`.
    pub bytes: [u8; 32],
}

impl fmt::Debug for ExtendedPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedPublicKey")
            .field("bytes", &self.bytes)
            .finish_non_exhaustive()
    }
}

/// Normalizes a 32-byte secret key and derives its x-only public key.
pub fn get_extended_public_key(private_key: &[u8]) -> Result<ExtendedPublicKey> {
    let signing_key = SigningKey::from_bytes(private_key)?;
    let verifying_key = signing_key.verifying_key();

    Ok(ExtendedPublicKey {
        scalar: *signing_key.as_nonzero_scalar(),
        point: *verifying_key.as_affine(),
        bytes: verifying_key.to_bytes().into(),
    })
}

/// Derives the 32-byte x-only public key for a 32-byte secret key.
pub fn get_public_key(private_key: &[u8]) -> Result<[u8; 32]> {
    Ok(get_extended_public_key(private_key)?.bytes)
}

/// Signs a 32-byte message with explicit auxiliary randomness.
///
/// Passing a fixed `aux_rand` makes the signature deterministic, as used by
/// the published test vectors.
pub fn sign(message: &[u8], private_key: &[u8], aux_rand: &[u8]) -> Result<SignatureBytes> {
    if message.len() != MESSAGE_SIZE {
        return Err(Error::MalformedEncoding);
    }

    let aux_rand: &[u8; 32] = aux_rand.try_into().map_err(|_| Error::MalformedEncoding)?;
    let signing_key = SigningKey::from_bytes(private_key)?;
    Ok(signing_key.sign_raw(message, aux_rand)?.to_bytes())
}

/// Signs a 32-byte message with 32 bytes of auxiliary randomness drawn from
/// `rng`.
pub fn sign_with_rng(
    rng: &mut impl CryptoRngCore,
    message: &[u8],
    private_key: &[u8],
) -> Result<SignatureBytes> {
    let mut aux_rand = [0u8; 32];
    rng.fill_bytes(&mut aux_rand);
    sign(message, private_key, &aux_rand)
}

/// Verifies a 64-byte signature over a 32-byte message against an x-only
/// public key. Every malformed input is reported as `false`.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    Signature::from_slice(signature)
        .and_then(|signature| {
            VerifyingKey::from_bytes(public_key)?.verify_raw(message, &signature)
        })
        .is_ok()
}
