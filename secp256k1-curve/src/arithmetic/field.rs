//! Field arithmetic modulo p = 2^256 - 2^32 - 977

use crate::{Error, FieldBytes, Result};
use core::fmt::{self, Debug};
use elliptic_curve::{
    bigint::{
        impl_modulus,
        modular::constant_mod::{Residue, ResidueParams},
        ArrayEncoding, Integer, U256,
    },
    ff::{self, Field, PrimeField},
    rand_core::RngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeLess, CtOption},
    zeroize::DefaultIsZeroes,
};

/// Field modulus serialized as hexadecimal.
pub(crate) const MODULUS_HEX: &str =
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

impl_modulus!(
    FieldModulus,
    U256,
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
);

type FieldResidue = Residue<FieldModulus, { FieldModulus::LIMBS }>;

/// p - 2, the inversion exponent.
const P_MINUS_TWO: U256 =
    U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2d");

/// An element in the finite field used for curve coordinates.
///
/// Stored in Montgomery form; every value is canonical, so equality and
/// serialization never need a separate normalization step.
#[derive(Clone, Copy, Default)]
pub struct FieldElement(FieldResidue);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self(FieldResidue::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(FieldResidue::ONE);

    /// Parses a big-endian hex string which must be below the modulus.
    pub(crate) const fn from_hex(hex: &str) -> Self {
        Self(FieldResidue::new(&U256::from_be_hex(hex)))
    }

    /// Converts a `u64` into a field element.
    pub const fn from_u64(w: u64) -> Self {
        Self(FieldResidue::new(&U256::from_u64(w)))
    }

    /// Attempts to parse the given byte array as an SEC1-encoded field element.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in
    /// the range [0, p).
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let uint = U256::from_be_byte_array(*bytes);
        let in_range = uint.ct_lt(&FieldModulus::MODULUS);
        CtOption::new(Self(FieldResidue::new(&uint)), in_range)
    }

    /// Builds a field element from an integer, reducing it modulo p.
    pub(crate) const fn from_uint_reduced(uint: &U256) -> Self {
        Self(FieldResidue::new(uint))
    }

    /// Returns the SEC1 encoding of this field element.
    pub fn to_bytes(self) -> FieldBytes {
        self.0.retrieve().to_be_byte_array()
    }

    /// Determine if this `FieldElement` is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Determine if this `FieldElement` is odd in the SEC1 sense: `self mod 2 == 1`.
    pub fn is_odd(&self) -> Choice {
        self.0.retrieve().is_odd()
    }

    /// Determine if this `FieldElement` is even in the SEC1 sense: `self mod 2 == 0`.
    pub fn is_even(&self) -> Choice {
        !self.is_odd()
    }

    /// Returns self + rhs mod p.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(self.0.add(&rhs.0))
    }

    /// Returns self - rhs mod p.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(self.0.sub(&rhs.0))
    }

    /// Returns self * rhs mod p.
    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self(self.0.mul(&rhs.0))
    }

    /// Returns -self mod p.
    pub const fn neg(&self) -> Self {
        Self(self.0.neg())
    }

    /// Returns self * self mod p.
    pub const fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Returns 2 * self mod p.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Raises self to the power `2^k` by squaring `k` times.
    pub fn pow2k(&self, k: usize) -> Self {
        let mut x = *self;
        for _ in 0..k {
            x = x.square();
        }
        x
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(Self(self.0.pow(&P_MINUS_TWO)), !self.is_zero())
    }

    /// Returns the square root of self mod p, or `None` if no square root
    /// exists.
    ///
    /// Since p ≡ 3 (mod 4), a root is `self^((p + 1) / 4)`. The exponent is
    /// evaluated with a fixed addition chain of 253 squarings and 13
    /// multiplications, where each `xN` below holds `self^(2^N - 1)`.
    pub fn sqrt(&self) -> CtOption<Self> {
        let x2 = self.pow2k(1).multiply(self);
        let x3 = x2.pow2k(1).multiply(self);
        let x6 = x3.pow2k(3).multiply(&x3);
        let x9 = x6.pow2k(3).multiply(&x3);
        let x11 = x9.pow2k(2).multiply(&x2);
        let x22 = x11.pow2k(11).multiply(&x11);
        let x44 = x22.pow2k(22).multiply(&x22);
        let x88 = x44.pow2k(44).multiply(&x44);
        let x176 = x88.pow2k(88).multiply(&x88);
        let x220 = x176.pow2k(44).multiply(&x44);
        let x223 = x220.pow2k(3).multiply(&x3);

        let res = x223
            .pow2k(23)
            .multiply(&x22)
            .pow2k(6)
            .multiply(&x2)
            .pow2k(2);

        let is_root = res.square().ct_eq(self);
        CtOption::new(res, is_root)
    }

    /// Square root which reports a non-residue as [`Error::NoSquareRoot`].
    pub fn sqrt_checked(&self) -> Result<Self> {
        Option::from(self.sqrt()).ok_or(Error::NoSquareRoot)
    }
}

impl_field_ops!(FieldElement);

impl Field for FieldElement {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        let mut bytes = FieldBytes::default();

        // Rejection sampling: the modulus is within 2^33 of 2^256 so this
        // almost never loops.
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(fe) = Self::from_bytes(&bytes).into() {
                return fe;
            }
        }
    }

    #[must_use]
    fn square(&self) -> Self {
        self.square()
    }

    #[must_use]
    fn double(&self) -> Self {
        self.double()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt()
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

impl PrimeField for FieldElement {
    type Repr = FieldBytes;

    const MODULUS: &'static str = MODULUS_HEX;
    const NUM_BITS: u32 = 256;
    const CAPACITY: u32 = 255;
    const TWO_INV: Self =
        Self::from_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffff7ffffe18");
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(3);
    const S: u32 = 1;
    const ROOT_OF_UNITY: Self =
        Self::from_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2e");
    const ROOT_OF_UNITY_INV: Self = Self::ROOT_OF_UNITY;
    const DELTA: Self = Self::from_u64(9);

    fn from_repr(bytes: FieldBytes) -> CtOption<Self> {
        Self::from_bytes(&bytes)
    }

    fn to_repr(&self) -> FieldBytes {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        self.is_odd()
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(FieldResidue::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:X})", self.0.retrieve())
    }
}

impl DefaultIsZeroes for FieldElement {}

impl Eq for FieldElement {}

impl From<u64> for FieldElement {
    fn from(k: u64) -> Self {
        Self::from_u64(k)
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
