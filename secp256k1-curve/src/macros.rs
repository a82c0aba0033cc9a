//! Internal macros.

/// Define the arithmetic operator impls required by [`ff::Field`] in terms of
/// a type's inherent `add`, `sub`, `multiply` and `neg` methods.
///
/// [`ff::Field`]: elliptic_curve::ff::Field
macro_rules! impl_field_ops {
    ($fe:ty) => {
        impl core::ops::Add<$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn add(self, rhs: $fe) -> $fe {
                <$fe>::add(&self, &rhs)
            }
        }

        impl core::ops::Add<&$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn add(self, rhs: &$fe) -> $fe {
                <$fe>::add(&self, rhs)
            }
        }

        impl core::ops::Add<&$fe> for &$fe {
            type Output = $fe;

            #[inline]
            fn add(self, rhs: &$fe) -> $fe {
                <$fe>::add(self, rhs)
            }
        }

        impl core::ops::AddAssign<$fe> for $fe {
            #[inline]
            fn add_assign(&mut self, rhs: $fe) {
                *self = <$fe>::add(self, &rhs);
            }
        }

        impl core::ops::AddAssign<&$fe> for $fe {
            #[inline]
            fn add_assign(&mut self, rhs: &$fe) {
                *self = <$fe>::add(self, rhs);
            }
        }

        impl core::ops::Sub<$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn sub(self, rhs: $fe) -> $fe {
                <$fe>::sub(&self, &rhs)
            }
        }

        impl core::ops::Sub<&$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn sub(self, rhs: &$fe) -> $fe {
                <$fe>::sub(&self, rhs)
            }
        }

        impl core::ops::Sub<&$fe> for &$fe {
            type Output = $fe;

            #[inline]
            fn sub(self, rhs: &$fe) -> $fe {
                <$fe>::sub(self, rhs)
            }
        }

        impl core::ops::SubAssign<$fe> for $fe {
            #[inline]
            fn sub_assign(&mut self, rhs: $fe) {
                *self = <$fe>::sub(self, &rhs);
            }
        }

        impl core::ops::SubAssign<&$fe> for $fe {
            #[inline]
            fn sub_assign(&mut self, rhs: &$fe) {
                *self = <$fe>::sub(self, rhs);
            }
        }

        impl core::ops::Mul<$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn mul(self, rhs: $fe) -> $fe {
                <$fe>::multiply(&self, &rhs)
            }
        }

        impl core::ops::Mul<&$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn mul(self, rhs: &$fe) -> $fe {
                <$fe>::multiply(&self, rhs)
            }
        }

        impl core::ops::Mul<&$fe> for &$fe {
            type Output = $fe;

            #[inline]
            fn mul(self, rhs: &$fe) -> $fe {
                <$fe>::multiply(self, rhs)
            }
        }

        impl core::ops::MulAssign<$fe> for $fe {
            #[inline]
            fn mul_assign(&mut self, rhs: $fe) {
                *self = <$fe>::multiply(self, &rhs);
            }
        }

        impl core::ops::MulAssign<&$fe> for $fe {
            #[inline]
            fn mul_assign(&mut self, rhs: &$fe) {
                *self = <$fe>::multiply(self, rhs);
            }
        }

        impl core::ops::Neg for $fe {
            type Output = $fe;

            #[inline]
            fn neg(self) -> $fe {
                <$fe>::neg(&self)
            }
        }

        impl core::ops::Neg for &$fe {
            type Output = $fe;

            #[inline]
            fn neg(self) -> $fe {
                <$fe>::neg(self)
            }
        }

        impl core::iter::Sum for $fe {
            fn sum<I: Iterator<Item = $fe>>(iter: I) -> $fe {
                iter.reduce(core::ops::Add::add).unwrap_or(<$fe>::ZERO)
            }
        }

        impl<'a> core::iter::Sum<&'a $fe> for $fe {
            fn sum<I: Iterator<Item = &'a $fe>>(iter: I) -> $fe {
                iter.copied().sum()
            }
        }

        impl core::iter::Product for $fe {
            fn product<I: Iterator<Item = $fe>>(iter: I) -> $fe {
                iter.reduce(core::ops::Mul::mul).unwrap_or(<$fe>::ONE)
            }
        }

        impl<'a> core::iter::Product<&'a $fe> for $fe {
            fn product<I: Iterator<Item = &'a $fe>>(iter: I) -> $fe {
                iter.copied().product()
            }
        }
    };
}
