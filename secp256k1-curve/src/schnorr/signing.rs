//! Taproot Schnorr signing key.

use super::{
    challenge, tagged_hash, Signature, VerifyingKey, AUX_TAG, MESSAGE_SIZE, NONCE_TAG,
};
use crate::{
    AffinePoint, Error, FieldBytes, NonZeroScalar, PublicKey, Result, Scalar, SecretKey, U256,
};
use core::fmt;
use elliptic_curve::{
    ops::Reduce,
    point::AffineCoordinates,
    rand_core::CryptoRngCore,
    subtle::ConditionallySelectable,
    zeroize::{Zeroize, ZeroizeOnDrop},
    PrimeField,
};
use sha2::{
    digest::{consts::U32, FixedOutput},
    Digest, Sha256,
};
use signature::{
    hazmat::{PrehashSigner, RandomizedPrehashSigner},
    DigestSigner, KeypairRef, RandomizedDigestSigner, RandomizedSigner, Signer,
};

/// Taproot Schnorr signing key.
///
/// The secret scalar is normalized on construction so that the matching
/// public point has an even y-coordinate.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key material
    secret_key: NonZeroScalar,

    /// Verifying key
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a cryptographically random [`SigningKey`].
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        NonZeroScalar::random(rng).into()
    }

    /// Parse signing key from big endian-encoded bytes.
    ///
    /// The key must be exactly 32 bytes encoding an integer in `[1, n)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::MalformedEncoding);
        }

        Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(bytes)))
            .and_then(|scalar| Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar)))
            .map(SigningKey::from)
            .ok_or(Error::InputRange)
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_key.to_repr()
    }

    /// Get the [`VerifyingKey`] that corresponds to this signing key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Borrow the secret [`NonZeroScalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_nonzero_scalar(&self) -> &NonZeroScalar {
        &self.secret_key
    }

    /// Compute Schnorr signature.
    ///
    /// # ⚠️ Warning
    ///
    /// This is a low-level interface intended only for unusual use cases
    /// involving signing pre-hashed messages, or "raw" messages where the
    /// message is not hashed at all prior to being used to generate the
    /// Schnorr signature.
    ///
    /// The preferred interfaces are the [`Signer`] or [`RandomizedSigner`] traits.
    pub fn sign_raw(&self, msg: &[u8], aux_rand: &[u8; 32]) -> Result<Signature> {
        if msg.len() != MESSAGE_SIZE {
            return Err(Error::MalformedEncoding);
        }

        let mut t = tagged_hash(AUX_TAG, &[aux_rand]);

        for (a, b) in t.iter_mut().zip(self.secret_key.to_repr().iter()) {
            *a ^= b
        }

        let px = self.verifying_key.to_bytes();
        let rand = tagged_hash(NONCE_TAG, &[t.as_slice(), px.as_slice(), msg]);
        t.zeroize();

        let k = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(&rand));
        let nonce = Option::<NonZeroScalar>::from(NonZeroScalar::new(k))
            .map(Self::from)
            .ok_or(Error::NonceIsZero)?;

        let rx = nonce.verifying_key.to_bytes();
        let e = challenge(&rx, &px, msg);
        let s = *nonce.secret_key + e * *self.secret_key;

        let mut bytes = [0u8; Signature::BYTE_SIZE];
        bytes[..32].copy_from_slice(&rx);
        bytes[32..].copy_from_slice(&s.to_repr());

        // Rejects s = 0 as well as anything the verifier would refuse.
        let sig = Signature::from_slice(&bytes).map_err(|_| Error::SignatureSelfCheckFailure)?;
        self.verifying_key
            .verify_raw(msg, &sig)
            .map_err(|_| Error::SignatureSelfCheckFailure)?;

        Ok(sig)
    }
}

impl From<NonZeroScalar> for SigningKey {
    #[inline]
    fn from(mut secret_key: NonZeroScalar) -> SigningKey {
        let public_key = PublicKey::from_secret_scalar(&secret_key);
        let point = public_key.as_affine();
        let odd = point.y_is_odd();

        secret_key.conditional_assign(&-secret_key, odd);

        // The negation of a non-identity point is never the identity.
        let even = AffinePoint::conditional_select(point, &-*point, odd);
        let verifying_key = VerifyingKey {
            inner: PublicKey::from_affine(even).unwrap_or(public_key),
        };

        SigningKey {
            secret_key,
            verifying_key,
        }
    }
}

impl From<SecretKey> for SigningKey {
    #[inline]
    fn from(secret_key: SecretKey) -> SigningKey {
        SigningKey::from(&secret_key)
    }
}

impl From<&SecretKey> for SigningKey {
    fn from(secret_key: &SecretKey) -> SigningKey {
        secret_key.to_nonzero_scalar().into()
    }
}

//
// `*Signer` trait impls
//

impl<D> DigestSigner<D, Signature> for SigningKey
where
    D: Digest + FixedOutput<OutputSize = U32>,
{
    fn try_sign_digest(&self, digest: D) -> signature::Result<Signature> {
        Ok(self.sign_raw(&digest.finalize_fixed(), &Default::default())?)
    }
}

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_raw(prehash, &Default::default())?)
    }
}

impl<D> RandomizedDigestSigner<D, Signature> for SigningKey
where
    D: Digest + FixedOutput<OutputSize = U32>,
{
    fn try_sign_digest_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        digest: D,
    ) -> signature::Result<Signature> {
        let mut aux_rand = [0u8; 32];
        rng.fill_bytes(&mut aux_rand);
        Ok(self.sign_raw(&digest.finalize_fixed(), &aux_rand)?)
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        self.try_sign_digest_with_rng(rng, Sha256::new_with_prefix(msg))
    }
}

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        let mut aux_rand = [0u8; 32];
        rng.fill_bytes(&mut aux_rand);

        Ok(self.sign_raw(prehash, &aux_rand)?)
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.try_sign_digest(Sha256::new_with_prefix(msg))
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

impl ZeroizeOnDrop for SigningKey {}
