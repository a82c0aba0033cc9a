//! Pure Rust implementation of group operations on secp256k1.
//!
//! Curve parameters can be found in [SEC 2: Recommended Elliptic Curve Domain
//! Parameters](https://www.secg.org/sec2-v2.pdf), section 2.4.1.

pub(crate) mod field;
#[cfg(feature = "hash2curve")]
pub mod hash2curve;
pub mod mul;
pub(crate) mod scalar;

#[cfg(test)]
pub(crate) mod util;

pub use self::{field::FieldElement, scalar::Scalar};

use crate::Secp256k1;
use elliptic_curve::{CurveArithmetic, PrimeCurveArithmetic};
use primeorder::{point_arithmetic, PrimeCurveParams};

/// Elliptic curve point in affine coordinates.
pub type AffinePoint = primeorder::AffinePoint<Secp256k1>;

/// Elliptic curve point in projective coordinates.
pub type ProjectivePoint = primeorder::ProjectivePoint<Secp256k1>;

impl CurveArithmetic for Secp256k1 {
    type AffinePoint = AffinePoint;
    type ProjectivePoint = ProjectivePoint;
    type Scalar = Scalar;
}

impl PrimeCurveArithmetic for Secp256k1 {
    type CurveGroup = ProjectivePoint;
}

/// Adapted from [SEC 2: Recommended Elliptic Curve Domain Parameters](https://www.secg.org/sec2-v2.pdf).
///
/// See section 2.4.1.
impl PrimeCurveParams for Secp256k1 {
    type FieldElement = FieldElement;
    type PointArithmetic = point_arithmetic::EquationAIsGeneric;

    /// a = 0
    const EQUATION_A: FieldElement = FieldElement::ZERO;

    /// b = 7
    const EQUATION_B: FieldElement = FieldElement::from_u64(7);

    /// Base point of secp256k1.
    ///
    /// ```text
    /// Gₓ = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    /// Gᵧ = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    /// ```
    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
        FieldElement::from_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
    );
}
