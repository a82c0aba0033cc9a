//! Scalar field arithmetic modulo n = 115792089237316195423570985008687907852837564279074904382605163141518161494337

use crate::{FieldBytes, Secp256k1, SecretKey, ORDER_HEX};
use core::{
    fmt::{self, Debug},
    ops::{Shr, ShrAssign},
};
use elliptic_curve::{
    bigint::{
        impl_modulus,
        modular::constant_mod::{Residue, ResidueParams},
        prelude::*,
        NonZero,
        U256,
    },
    ff::{self, Field, PrimeField},
    ops::{Invert, Reduce, ReduceNonZero},
    rand_core::RngCore,
    scalar::{FromUintUnchecked, IsHigh},
    subtle::{
        Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess,
        CtOption,
    },
    zeroize::DefaultIsZeroes,
    Curve, ScalarPrimitive,
};

impl_modulus!(
    ScalarModulus,
    U256,
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
);

type ScalarResidue = Residue<ScalarModulus, { ScalarModulus::LIMBS }>;

/// Constant representing the modulus
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub(crate) const MODULUS: U256 = Secp256k1::ORDER;

/// `MODULUS / 2`
const FRAC_MODULUS_2: U256 = MODULUS.shr_vartime(1);

/// n - 2, the inversion exponent.
const MODULUS_MINUS_TWO: U256 = MODULUS.wrapping_sub(&U256::from_u8(2));

/// (t - 1) / 2 where t = (n - 1) >> S, used by Tonelli-Shanks.
const T_MINUS_ONE_OVER_TWO: U256 =
    U256::from_be_hex("01fffffffffffffffffffffffffffffffd755db9cd5e9140777fa4bd19a06c82");

/// Scalars are elements in the finite field modulo n.
///
/// # Trait impls
///
/// Much of the important functionality of scalars is provided by traits from
/// the [`ff`](https://docs.rs/ff/) crate, which is re-exported as
/// `secp256k1_curve::elliptic_curve::ff`:
///
/// - [`Field`](https://docs.rs/ff/latest/ff/trait.Field.html) -
///   represents elements of finite fields and provides:
///   - [`Field::random`](https://docs.rs/ff/latest/ff/trait.Field.html#tymethod.random) -
///     generate a random scalar
///   - `double`, `square`, and `invert` operations
///   - Bounds for `Add`, `Sub`, `Mul`, and `Neg` (as well as `*Assign` equivalents)
///   - Bounds for [`ConditionallySelectable`] from the `subtle` crate
/// - [`PrimeField`](https://docs.rs/ff/latest/ff/trait.PrimeField.html) -
///   represents elements of prime fields and provides:
///   - `from_repr`/`to_repr` for converting field elements from/to big integers.
///   - `multiplicative_generator` and `root_of_unity` constants.
///
/// Please see the documentation for the relevant traits for more information.
#[derive(Clone, Copy, Default)]
pub struct Scalar(ScalarResidue);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self(ScalarResidue::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(ScalarResidue::ONE);

    /// Builds a scalar from an integer, reducing it modulo n.
    pub const fn from_uint_reduced(uint: &U256) -> Self {
        Self(ScalarResidue::new(uint))
    }

    /// Parses a big-endian hex string, reducing it modulo n.
    pub(crate) const fn from_hex(hex: &str) -> Self {
        Self::from_uint_reduced(&U256::from_be_hex(hex))
    }

    /// Returns the canonical integer representative in `[0, n)`.
    pub const fn to_uint(&self) -> U256 {
        self.0.retrieve()
    }

    /// Returns the SEC1 encoding of this scalar.
    pub fn to_bytes(&self) -> FieldBytes {
        self.to_uint().to_be_byte_array()
    }

    /// Returns self + rhs mod n
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(self.0.add(&rhs.0))
    }

    /// Returns 2*self.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns self - rhs mod n.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(self.0.sub(&rhs.0))
    }

    /// Returns self * rhs mod n
    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self(self.0.mul(&rhs.0))
    }

    /// Returns -self mod n
    pub const fn neg(&self) -> Self {
        Self(self.0.neg())
    }

    /// Returns self * self mod n
    pub const fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Right shifts the canonical representative of the scalar.
    ///
    /// Note: not constant-time with respect to the `shift` parameter.
    pub const fn shr_vartime(&self, shift: usize) -> Scalar {
        Self::from_uint_reduced(&self.to_uint().shr_vartime(shift))
    }

    /// Returns the multiplicative inverse of self, if self is non-zero
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.invert_unchecked(), !self.is_zero())
    }

    /// Returns `self^(n - 2)`, which by Fermat's little theorem is the
    /// inverse of any non-zero scalar.
    const fn invert_unchecked(&self) -> Self {
        Self(self.0.pow(&MODULUS_MINUS_TWO))
    }

    /// Exponentiates `self` by `exp`.
    pub const fn pow(&self, exp: &U256) -> Self {
        Self(self.0.pow(exp))
    }

    /// Is this scalar equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is integer representing equivalence class odd?
    pub fn is_odd(&self) -> Choice {
        self.to_uint().is_odd()
    }

    /// Is integer representing equivalence class even?
    pub fn is_even(&self) -> Choice {
        !self.is_odd()
    }
}

impl_field_ops!(Scalar);

impl AsRef<Scalar> for Scalar {
    fn as_ref(&self) -> &Scalar {
        self
    }
}

impl Field for Scalar {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        let mut bytes = FieldBytes::default();

        // Rejection sampling; with an unbiased RNG the loop almost never
        // repeats since n is close to 2^256.
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(scalar) = Scalar::from_repr(bytes).into() {
                return scalar;
            }
        }
    }

    #[must_use]
    fn square(&self) -> Self {
        Scalar::square(self)
    }

    #[must_use]
    fn double(&self) -> Self {
        self.add(self)
    }

    fn invert(&self) -> CtOption<Self> {
        Scalar::invert(self)
    }

    /// Tonelli-Shank's algorithm for q mod 16 = 1
    /// <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5)
    #[allow(clippy::many_single_char_names)]
    fn sqrt(&self) -> CtOption<Self> {
        let w = self.pow(&T_MINUS_ONE_OVER_TWO);

        let mut v = Self::S;
        let mut x = *self * w;
        let mut b = x * w;
        let mut z = Self::ROOT_OF_UNITY;

        for max_v in (1..=Self::S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&Self::ONE));
            z = z.square();
            b *= z;
            v = k;
        }

        CtOption::new(x, x.square().ct_eq(self))
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

impl PrimeField for Scalar {
    type Repr = FieldBytes;

    const MODULUS: &'static str = ORDER_HEX;
    const NUM_BITS: u32 = 256;
    const CAPACITY: u32 = 255;
    const TWO_INV: Self =
        Self::from_hex("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a1");
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_uint_reduced(&U256::from_u8(7));
    const S: u32 = 6;
    const ROOT_OF_UNITY: Self =
        Self::from_hex("0c1dc060e7a91986df9879a3fbc483a898bdeab680756045992f4b5402b052f2");
    const ROOT_OF_UNITY_INV: Self =
        Self::from_hex("fd3ae181f12d7096efc7b0c75b8cbb7277a275910aa413c3b6fb30a0884f0d1c");
    const DELTA: Self =
        Self::from_hex("0000000000000000000cbc21fe4561c8d63b78e780e1341e199417c8c0bb7601");

    /// Attempts to parse the given byte array as an SEC1-encoded scalar.
    ///
    /// Returns None if the byte array does not contain a big-endian integer in the range
    /// [0, n).
    fn from_repr(bytes: FieldBytes) -> CtOption<Self> {
        let inner = U256::from_be_byte_array(bytes);
        CtOption::new(Self::from_uint_reduced(&inner), inner.ct_lt(&MODULUS))
    }

    fn to_repr(&self) -> FieldBytes {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        self.is_odd()
    }
}

impl DefaultIsZeroes for Scalar {}

impl Eq for Scalar {}

impl FromUintUnchecked for Scalar {
    type Uint = U256;

    fn from_uint_unchecked(uint: Self::Uint) -> Self {
        Self::from_uint_reduced(&uint)
    }
}

impl Invert for Scalar {
    type Output = CtOption<Self>;

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }
}

impl IsHigh for Scalar {
    fn is_high(&self) -> Choice {
        self.to_uint().ct_gt(&FRAC_MODULUS_2)
    }
}

impl Shr<usize> for Scalar {
    type Output = Self;

    fn shr(self, rhs: usize) -> Self::Output {
        self.shr_vartime(rhs)
    }
}

impl Shr<usize> for &Scalar {
    type Output = Scalar;

    fn shr(self, rhs: usize) -> Self::Output {
        self.shr_vartime(rhs)
    }
}

impl ShrAssign<usize> for Scalar {
    fn shr_assign(&mut self, rhs: usize) {
        *self = *self >> rhs;
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.to_uint().cmp(&other.to_uint())
    }
}

impl From<u32> for Scalar {
    fn from(k: u32) -> Self {
        Self::from_uint_reduced(&U256::from_u32(k))
    }
}

impl From<u64> for Scalar {
    fn from(k: u64) -> Self {
        Self::from_uint_reduced(&U256::from_u64(k))
    }
}

impl From<u128> for Scalar {
    fn from(k: u128) -> Self {
        Self::from_uint_reduced(&U256::from_u128(k))
    }
}

impl From<Scalar> for FieldBytes {
    fn from(scalar: Scalar) -> Self {
        scalar.to_bytes()
    }
}

impl From<&Scalar> for FieldBytes {
    fn from(scalar: &Scalar) -> Self {
        scalar.to_bytes()
    }
}

impl From<ScalarPrimitive<Secp256k1>> for Scalar {
    fn from(scalar: ScalarPrimitive<Secp256k1>) -> Scalar {
        Self::from_uint_reduced(scalar.as_uint())
    }
}

impl From<&ScalarPrimitive<Secp256k1>> for Scalar {
    fn from(scalar: &ScalarPrimitive<Secp256k1>) -> Scalar {
        Self::from_uint_reduced(scalar.as_uint())
    }
}

impl From<Scalar> for ScalarPrimitive<Secp256k1> {
    fn from(scalar: Scalar) -> ScalarPrimitive<Secp256k1> {
        ScalarPrimitive::from(&scalar)
    }
}

impl From<&Scalar> for ScalarPrimitive<Secp256k1> {
    fn from(scalar: &Scalar) -> ScalarPrimitive<Secp256k1> {
        ScalarPrimitive::from_uint_unchecked(scalar.to_uint())
    }
}

impl From<&SecretKey> for Scalar {
    fn from(secret_key: &SecretKey) -> Scalar {
        *secret_key.to_nonzero_scalar()
    }
}

impl From<Scalar> for U256 {
    fn from(scalar: Scalar) -> U256 {
        scalar.to_uint()
    }
}

impl From<&Scalar> for U256 {
    fn from(scalar: &Scalar) -> U256 {
        scalar.to_uint()
    }
}

impl Reduce<U256> for Scalar {
    type Bytes = FieldBytes;

    fn reduce(w: U256) -> Self {
        Self::from_uint_reduced(&w)
    }

    fn reduce_bytes(bytes: &FieldBytes) -> Self {
        Self::reduce(U256::from_be_byte_array(*bytes))
    }
}

impl ReduceNonZero<U256> for Scalar {
    fn reduce_nonzero(w: U256) -> Self {
        const ORDER_MINUS_ONE: U256 = MODULUS.wrapping_sub(&U256::ONE);
        let reduced = w.rem(&NonZero::<U256>::const_new(ORDER_MINUS_ONE).0);
        Self::from_uint_reduced(&reduced.wrapping_add(&U256::ONE))
    }

    fn reduce_nonzero_bytes(bytes: &FieldBytes) -> Self {
        Self::reduce_nonzero(U256::from_be_byte_array(*bytes))
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ScalarResidue::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{:X})", &self.to_uint())
    }
}
