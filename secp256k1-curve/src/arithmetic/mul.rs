//! Variable-base scalar multiplication accelerated by the secp256k1
//! endomorphism.
//!
//! The curve has an efficiently computable endomorphism
//! `φ(x, y) = (β·x, y)` which acts on the group as multiplication by a fixed
//! scalar `λ`. Any scalar `k` can be split into two halves of roughly 128 bits
//! with `k ≡ k1 + k2·λ (mod n)`, after which `k·P = k1·P + k2·φ(P)` costs about
//! half the doublings of a plain 256-bit ladder.
//!
//! The split uses Babai rounding against the short lattice basis
//! `(a1, b1), (a2, b2)` from "Guide to Elliptic Curve Cryptography"
//! (Hankerson, Menezes, Vanstone), algorithm 3.74:
//!
//! ```text
//! a1 =  0x3086d221a7d46bcde86c90e49284eb15
//! b1 = -0xe4437ed6010e88286f547fa90abfe4c3
//! a2 =  0x114ca50f7a8e2f3f657c1108d9d44cfd8
//! b2 =  0x3086d221a7d46bcde86c90e49284eb15
//! ```
//!
//! The rounded quotients `c1 = round(b2·k / n)` and `c2 = round(-b1·k / n)`
//! are computed exactly in 512-bit integers rather than with a precomputed
//! reciprocal, so the halves are always within the 128-bit bound.

use crate::{
    arithmetic::{field::FieldElement, scalar::Scalar, AffinePoint, ProjectivePoint},
    EncodedPoint, Error, Result,
};
use elliptic_curve::{
    bigint::{Encoding, NonZero, U256, U512},
    group::Group,
    sec1::{FromEncodedPoint, ToEncodedPoint},
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess},
};

/// Endomorphism eigenvalue: `φ(P) = λ·P`.
pub const LAMBDA: Scalar =
    Scalar::from_hex("5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72");

/// Cube root of unity in the base field with `φ(x, y) = (β·x, y)`.
pub(crate) const BETA: FieldElement =
    FieldElement::from_hex("7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee");

const A1: Scalar =
    Scalar::from_hex("000000000000000000000000000000003086d221a7d46bcde86c90e49284eb15");
const A2: Scalar =
    Scalar::from_hex("0000000000000000000000000000000114ca50f7a8e2f3f657c1108d9d44cfd8");

/// `|b1|`; the basis entry itself is negative.
const MINUS_B1: Scalar =
    Scalar::from_hex("00000000000000000000000000000000e4437ed6010e88286f547fa90abfe4c3");
const B2: Scalar = A1;

const MINUS_B1_WIDE: U512 = U512::from_be_hex(concat!(
    "0000000000000000000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000e4437ed6010e88286f547fa90abfe4c3"
));
const B2_WIDE: U512 = U512::from_be_hex(concat!(
    "0000000000000000000000000000000000000000000000000000000000000000",
    "000000000000000000000000000000003086d221a7d46bcde86c90e49284eb15"
));

/// Curve order widened to 512 bits.
const ORDER_WIDE: U512 = U512::from_be_hex(concat!(
    "0000000000000000000000000000000000000000000000000000000000000000",
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
));

/// `n >> 1`, added before dividing to round half up.
const HALF_ORDER_WIDE: U512 = U512::from_be_hex(concat!(
    "0000000000000000000000000000000000000000000000000000000000000000",
    "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"
));

/// Exclusive bound on the magnitude of each half: `2^128`.
const HALF_BOUND: U256 =
    U256::from_be_hex("0000000000000000000000000000000100000000000000000000000000000000");

/// Result of splitting a scalar `k` along the endomorphism.
///
/// Both magnitudes are below `2^128`, and
/// `k ≡ ±k1 ± k2·λ (mod n)` with signs given by the negation flags.
#[derive(Clone, Copy, Debug)]
pub struct ScalarDecomposition {
    /// Magnitude of the first half.
    pub k1: Scalar,
    /// Set when the first half is negative.
    pub k1_neg: Choice,
    /// Magnitude of the second half.
    pub k2: Scalar,
    /// Set when the second half is negative.
    pub k2_neg: Choice,
}

impl ScalarDecomposition {
    /// Recombines the halves into the original scalar.
    pub fn recombine(&self) -> Scalar {
        let k1 = Scalar::conditional_select(&self.k1, &-self.k1, self.k1_neg);
        let k2 = Scalar::conditional_select(&self.k2, &-self.k2, self.k2_neg);
        k1 + k2 * LAMBDA
    }
}

/// Returns `round(x·k / n)` for a constant `x < 2^128`.
fn round_quotient(k: &Scalar, x: &U512) -> Scalar {
    let mut wide = [0u8; 64];
    wide[32..].copy_from_slice(&k.to_bytes());
    let k = U512::from_be_slice(&wide);

    let (order, _) = NonZero::<U512>::const_new(ORDER_WIDE);
    let quotient = k.wrapping_mul(x).wrapping_add(&HALF_ORDER_WIDE) / order;
    let bytes = quotient.to_be_bytes();
    Scalar::from_uint_reduced(&U256::from_be_slice(&bytes[32..]))
}

/// Maps a half to its magnitude and sign, rejecting anything that is still
/// `2^128` or larger afterwards.
fn shorten(k: Scalar) -> Result<(Scalar, Choice)> {
    let neg = !k.to_uint().ct_lt(&HALF_BOUND);
    let k = Scalar::conditional_select(&k, &-k, neg);

    if bool::from(k.to_uint().ct_lt(&HALF_BOUND)) {
        Ok((k, neg))
    } else {
        Err(Error::EndomorphismSplitFailure)
    }
}

/// Find `k1` and `k2` given `k`, such that `k1 + k2·λ ≡ k (mod n)` and both
/// halves fit in 128 bits once their signs are split off.
pub fn split_scalar(k: &Scalar) -> Result<ScalarDecomposition> {
    let c1 = round_quotient(k, &B2_WIDE);
    let c2 = round_quotient(k, &MINUS_B1_WIDE);

    let k1 = k - &(c1 * A1) - &(c2 * A2);
    let k2 = c1 * MINUS_B1 - &(c2 * B2);

    let (k1, k1_neg) = shorten(k1)?;
    let (k2, k2_neg) = shorten(k2)?;

    Ok(ScalarDecomposition {
        k1,
        k1_neg,
        k2,
        k2_neg,
    })
}

/// Applies `φ(x, y) = (β·x, y)` to an affine point.
///
/// `y` is carried over unchanged, so no square root is taken.
pub(crate) fn endomorphism(p: &AffinePoint) -> Result<ProjectivePoint> {
    if bool::from(p.is_identity()) {
        return Ok(ProjectivePoint::IDENTITY);
    }

    let encoded = p.to_encoded_point(false);
    let (x, y) = encoded
        .x()
        .zip(encoded.y())
        .ok_or(Error::PointNotOnCurve)?;
    let x = Option::<FieldElement>::from(FieldElement::from_bytes(x))
        .ok_or(Error::PointNotOnCurve)?;

    let image = EncodedPoint::from_affine_coordinates(&(x * BETA).to_bytes(), y, false);
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&image))
        .map(ProjectivePoint::from)
        .ok_or(Error::PointNotOnCurve)
}

/// Lookup table containing precomputed values `[p, 2p, 3p, ..., 8p]`
#[derive(Clone, Copy)]
struct LookupTable([ProjectivePoint; 8]);

impl Default for LookupTable {
    fn default() -> Self {
        LookupTable([ProjectivePoint::IDENTITY; 8])
    }
}

impl From<&ProjectivePoint> for LookupTable {
    fn from(p: &ProjectivePoint) -> Self {
        let mut points = [*p; 8];
        for j in 0..7 {
            points[j + 1] = p + &points[j];
        }
        LookupTable(points)
    }
}

impl LookupTable {
    /// Given -8 <= x <= 8, returns x * p in constant time.
    fn select(&self, x: i8) -> ProjectivePoint {
        debug_assert!(x >= -8);
        debug_assert!(x <= 8);

        // Compute xabs = |x|
        let xmask = x >> 7;
        let xabs = (x + xmask) ^ xmask;

        // Get an array element in constant time
        let mut t = ProjectivePoint::IDENTITY;
        for j in 1..9 {
            let c = (xabs as u8).ct_eq(&(j as u8));
            t.conditional_assign(&self.0[j - 1], c);
        }
        // Now t == |x| * p.

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_assign(&-t, neg_mask);
        // Now t == x * p.

        t
    }
}

/// Returns `[a_0, ..., a_32]` such that `sum(a_j * 2^(j * 4)) == x`,
/// and `-8 <= a_j <= 7`.
/// Assumes `x < 2^128`.
fn to_radix_16_half(x: &Scalar) -> [i8; 33] {
    // `x` can have up to 128 bits, so we need an additional digit to store the carry.
    let mut output = [0i8; 33];

    // Step 1: change radix.
    // Convert from radix 256 (bytes) to radix 16 (nibbles)
    let bytes = x.to_bytes();
    for i in 0..16 {
        output[2 * i] = (bytes[31 - i] & 0xf) as i8;
        output[2 * i + 1] = ((bytes[31 - i] >> 4) & 0xf) as i8;
    }

    debug_assert!((x >> 128).is_zero().unwrap_u8() == 1);

    // Step 2: recenter coefficients from [0,16) to [-8,8)
    for i in 0..32 {
        let carry = (output[i] + 8) >> 4;
        output[i] -= carry << 4;
        output[i + 1] += carry;
    }

    output
}

/// Computes `sum(ks[i] * xs[i])` with one shared doubling chain for all
/// split halves.
fn lincomb_generic<const N: usize>(
    xs: &[ProjectivePoint; N],
    ks: &[Scalar; N],
) -> Result<ProjectivePoint> {
    let mut tables = [(LookupTable::default(), LookupTable::default()); N];
    let mut digits = [([0i8; 33], [0i8; 33]); N];

    for i in 0..N {
        let split = split_scalar(&ks[i])?;
        let x_beta = endomorphism(&xs[i].to_affine())?;

        tables[i] = (
            LookupTable::from(&ProjectivePoint::conditional_select(
                &xs[i],
                &-xs[i],
                split.k1_neg,
            )),
            LookupTable::from(&ProjectivePoint::conditional_select(
                &x_beta,
                &-x_beta,
                split.k2_neg,
            )),
        );

        digits[i] = (to_radix_16_half(&split.k1), to_radix_16_half(&split.k2));
    }

    let mut acc = ProjectivePoint::IDENTITY;
    for component in 0..N {
        let (table1, table2) = tables[component];
        let (digits1, digits2) = digits[component];

        acc += &table1.select(digits1[32]);
        acc += &table2.select(digits2[32]);
    }

    for i in (0..32).rev() {
        for _j in 0..4 {
            acc = acc.double();
        }

        for component in 0..N {
            let (table1, table2) = tables[component];
            let (digits1, digits2) = digits[component];

            acc += &table1.select(digits1[i]);
            acc += &table2.select(digits2[i]);
        }
    }

    Ok(acc)
}

/// Computes `k·x`.
///
/// Fails only if the scalar split or the endomorphism produce an
/// out-of-range value, which indicates broken curve constants.
pub fn mul(x: &ProjectivePoint, k: &Scalar) -> Result<ProjectivePoint> {
    lincomb_generic(&[*x], &[*k])
}

/// Computes `k·x + l·y`.
pub fn lincomb(
    x: &ProjectivePoint,
    k: &Scalar,
    y: &ProjectivePoint,
    l: &Scalar,
) -> Result<ProjectivePoint> {
    lincomb_generic(&[*x, *y], &[*k, *l])
}
