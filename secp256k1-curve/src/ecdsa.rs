//! Elliptic Curve Digital Signature Algorithm (ECDSA)
//!
//! Signing and verification are provided by the generic `ecdsa` crate using
//! this crate's [`Scalar`] and [`AffinePoint`]. Messages are hashed with
//! SHA-256 and nonces are derived with RFC6979.
//!
//! Signatures are returned exactly as computed: no low-S normalization is
//! applied, and verification accepts either form of `s`.
//!
//! # Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! use secp256k1_curve::ecdsa::{
//!     signature::{Signer, Verifier},
//!     Signature, SigningKey, VerifyingKey,
//! };
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! let signing_key = SigningKey::random(&mut OsRng);
//! let message = b"ECDSA proves knowledge of a secret number in the context of a single message";
//! let signature: Signature = signing_key.sign(message);
//!
//! let verifying_key = VerifyingKey::from(&signing_key);
//! assert!(verifying_key.verify(message, &signature).is_ok());
//! ```

pub use ecdsa_core::signature::{self, Error};

use crate::{AffinePoint, Scalar, Secp256k1};
use ecdsa_core::hazmat::{SignPrimitive, VerifyPrimitive};

/// ECDSA/secp256k1 signature (fixed-size)
pub type Signature = ecdsa_core::Signature<Secp256k1>;

/// ECDSA/secp256k1 signature (ASN.1 DER encoded)
pub type DerSignature = ecdsa_core::der::Signature<Secp256k1>;

/// ECDSA/secp256k1 signing key
pub type SigningKey = ecdsa_core::SigningKey<Secp256k1>;

/// ECDSA/secp256k1 verification key (i.e. public key)
pub type VerifyingKey = ecdsa_core::VerifyingKey<Secp256k1>;

impl ecdsa_core::hazmat::DigestPrimitive for Secp256k1 {
    type Digest = sha2::Sha256;
}

impl SignPrimitive<Secp256k1> for Scalar {}

impl VerifyPrimitive<Secp256k1> for AffinePoint {}
