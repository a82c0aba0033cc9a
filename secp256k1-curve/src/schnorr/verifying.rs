//! Taproot Schnorr verifying key.

use super::{challenge, Signature, MESSAGE_SIZE};
use crate::{
    arithmetic::FieldElement, glv, AffinePoint, EncodedPoint, Error, FieldBytes, ProjectivePoint,
    PublicKey, Result, Secp256k1,
};
use elliptic_curve::{point::AffineCoordinates, sec1::FromEncodedPoint};
use primeorder::PrimeCurveParams;
use sha2::{
    digest::{consts::U32, FixedOutput},
    Digest, Sha256,
};
use signature::{hazmat::PrehashVerifier, DigestVerifier, Verifier};

/// Recovers the point with x-coordinate `x` and even y-coordinate.
///
/// Fails with [`Error::MalformedEncoding`] unless `x` is exactly 32 bytes,
/// [`Error::BadPublicKeyX`] unless `0 < x < p`, and
/// [`Error::NoSquareRoot`] when `x³ + 7` is not a square.
pub fn lift_x(x: &[u8]) -> Result<AffinePoint> {
    if x.len() != 32 {
        return Err(Error::MalformedEncoding);
    }

    let x: FieldElement = Option::from(FieldElement::from_bytes(FieldBytes::from_slice(x)))
        .ok_or(Error::BadPublicKeyX)?;

    if x.is_zero().into() {
        return Err(Error::BadPublicKeyX);
    }

    let c = x.square() * x + Secp256k1::EQUATION_B;
    let mut y = c.sqrt_checked()?;

    if y.is_odd().into() {
        y = -y;
    }

    let encoded = EncodedPoint::from_affine_coordinates(&x.to_bytes(), &y.to_bytes(), false);
    Option::from(AffinePoint::from_encoded_point(&encoded)).ok_or(Error::PointNotOnCurve)
}

/// Taproot Schnorr verifying key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    /// Inner public key
    pub(super) inner: PublicKey,
}

impl VerifyingKey {
    /// Borrow the inner [`AffinePoint`] this type wraps.
    pub fn as_affine(&self) -> &AffinePoint {
        self.inner.as_affine()
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.as_affine().x()
    }

    /// Verify a Schnorr signature over a 32-byte message.
    ///
    /// # ⚠️ Warning
    ///
    /// This is a low-level interface intended only for unusual use cases
    /// involving verifying pre-hashed messages, or "raw" messages where the
    /// message is not hashed at all prior to being used to generate the
    /// Schnorr signature.
    ///
    /// The preferred interfaces are the [`DigestVerifier`] or [`PrehashVerifier`] traits.
    pub fn verify_raw(&self, message: &[u8], signature: &Signature) -> Result<()> {
        if message.len() != MESSAGE_SIZE {
            return Err(Error::MalformedEncoding);
        }

        let (r, s) = signature.split();
        let r = r.to_bytes();
        let e = challenge(&r, &self.to_bytes(), message);

        // R = s·G - e·P
        let R = glv::lincomb(
            &ProjectivePoint::GENERATOR,
            s.as_ref(),
            &self.inner.to_projective(),
            &-e,
        )?
        .to_affine();

        if R.is_identity().into() || R.y_is_odd().into() || R.x() != r {
            return Err(Error::InvalidSignature);
        }

        Ok(())
    }

    /// Parse verifying key from big endian-encoded x-coordinate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = lift_x(bytes)?;
        let inner = PublicKey::from_affine(point).map_err(|_| Error::PointNotOnCurve)?;
        Ok(Self { inner })
    }
}

//
// `*Verifier` trait impls
//

impl<D> DigestVerifier<D, Signature> for VerifyingKey
where
    D: Digest + FixedOutput<OutputSize = U32>,
{
    fn verify_digest(&self, digest: D, signature: &Signature) -> signature::Result<()> {
        self.verify_prehash(digest.finalize_fixed().as_slice(), signature)
    }
}

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        Ok(self.verify_raw(prehash, signature)?)
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        self.verify_digest(Sha256::new_with_prefix(msg), signature)
    }
}

//
// Other trait impls
//

impl From<VerifyingKey> for AffinePoint {
    fn from(vk: VerifyingKey) -> AffinePoint {
        *vk.as_affine()
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(vk: &VerifyingKey) -> AffinePoint {
        *vk.as_affine()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(vk: VerifyingKey) -> PublicKey {
        vk.inner
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(vk: &VerifyingKey) -> PublicKey {
        vk.inner
    }
}

impl TryFrom<PublicKey> for VerifyingKey {
    type Error = signature::Error;

    fn try_from(public_key: PublicKey) -> signature::Result<VerifyingKey> {
        if public_key.as_affine().y_is_odd().into() {
            Err(signature::Error::new())
        } else {
            Ok(Self { inner: public_key })
        }
    }
}

impl TryFrom<&PublicKey> for VerifyingKey {
    type Error = signature::Error;

    fn try_from(public_key: &PublicKey) -> signature::Result<VerifyingKey> {
        Self::try_from(*public_key)
    }
}
