use core::fmt::{self, Display, Formatter};

#[cfg(feature = "std")]
use std::error::Error as StdError;

/// Result type with the `secp256k1-curve` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by curve arithmetic and Schnorr signing/verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Integer is outside of its permitted range (e.g. a private key of zero
    /// or one not below the group order)
    InputRange,
    /// Field element is not a quadratic residue
    NoSquareRoot,
    /// GLV decomposition produced a half-scalar of 128 bits or more
    EndomorphismSplitFailure,
    /// Byte string has the wrong length or layout
    MalformedEncoding,
    /// x-only public key is zero or not below the field modulus
    BadPublicKeyX,
    /// Coordinates do not satisfy the curve equation
    PointNotOnCurve,
    /// Derived Schnorr nonce reduced to zero
    NonceIsZero,
    /// Freshly produced signature did not verify
    SignatureSelfCheckFailure,
    /// Signature verification failed
    InvalidSignature,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputRange => write!(f, "integer is out of range"),
            Error::NoSquareRoot => write!(f, "field element has no square root"),
            Error::EndomorphismSplitFailure => {
                write!(f, "endomorphism scalar decomposition out of bounds")
            }
            Error::MalformedEncoding => write!(f, "malformed encoding"),
            Error::BadPublicKeyX => write!(f, "public key x-coordinate is invalid"),
            Error::PointNotOnCurve => write!(f, "point is not on the curve"),
            Error::NonceIsZero => write!(f, "derived nonce is zero"),
            Error::SignatureSelfCheckFailure => {
                write!(f, "produced signature failed verification")
            }
            Error::InvalidSignature => write!(f, "signature verification failed"),
        }
    }
}

#[cfg(feature = "std")]
impl StdError for Error {}

#[cfg(feature = "signature")]
impl From<Error> for signature::Error {
    #[cfg(feature = "std")]
    fn from(err: Error) -> Self {
        signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_err: Error) -> Self {
        signature::Error::new()
    }
}

impl From<Error> for elliptic_curve::Error {
    fn from(_err: Error) -> Self {
        elliptic_curve::Error
    }
}
