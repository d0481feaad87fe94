//! Scalar types the decompositions are generic over.
//!
//! Every routine in this crate is written once against [`ComplexField`] and monomorphized for
//! each concrete scalar, so the inner elimination loops contain no dynamic dispatch.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};
use num_traits::{One, Zero};

/// 32-bit complex floating point number.
#[allow(non_camel_case_types)]
pub type c32 = num_complex::Complex<f32>;
/// 64-bit complex floating point number.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;

/// Operations that a number type needs to implement to be decomposed.
pub trait ComplexField:
    Copy
    + PartialEq
    + Debug
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Type of the real and imaginary parts, and of the absolute value.
    type Real: RealField;

    /// Returns a number whose real part is equal to `real`, and a zero imaginary part.
    fn from_real(real: Self::Real) -> Self;
    /// Returns the real part.
    fn real(self) -> Self::Real;
    /// Returns `conjugate(self)`.
    fn conj(self) -> Self;
    /// Returns the absolute value of `self`.
    fn abs(self) -> Self::Real;
    /// Returns true if neither component is infinite or NaN.
    fn is_finite(&self) -> bool;

    /// Returns the input, scaled by `rhs`.
    #[inline(always)]
    fn scale_real(self, rhs: Self::Real) -> Self {
        self * Self::from_real(rhs)
    }
}

/// Operations that a real number type needs to implement.
pub trait RealField: ComplexField<Real = Self> + PartialOrd {
    /// Machine epsilon.
    fn epsilon() -> Self;
    /// Smallest positive normal value.
    fn min_positive() -> Self;
    /// Converts `value` from `f64` to `Self`, possibly losing precision.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_real_field {
    ($ty: ty) => {
        impl ComplexField for $ty {
            type Real = $ty;

            #[inline(always)]
            fn from_real(real: Self::Real) -> Self {
                real
            }
            #[inline(always)]
            fn real(self) -> Self::Real {
                self
            }
            #[inline(always)]
            fn conj(self) -> Self {
                self
            }
            #[inline(always)]
            fn abs(self) -> Self::Real {
                <$ty>::abs(self)
            }
            #[inline(always)]
            fn is_finite(&self) -> bool {
                <$ty>::is_finite(*self)
            }
            #[inline(always)]
            fn scale_real(self, rhs: Self::Real) -> Self {
                self * rhs
            }
        }

        impl RealField for $ty {
            #[inline(always)]
            fn epsilon() -> Self {
                <$ty>::EPSILON
            }
            #[inline(always)]
            fn min_positive() -> Self {
                <$ty>::MIN_POSITIVE
            }
            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                value as $ty
            }
        }
    };
}

macro_rules! impl_complex_field {
    ($ty: ty, $real: ty) => {
        impl ComplexField for $ty {
            type Real = $real;

            #[inline(always)]
            fn from_real(real: Self::Real) -> Self {
                <$ty>::new(real, 0.0)
            }
            #[inline(always)]
            fn real(self) -> Self::Real {
                self.re
            }
            #[inline(always)]
            fn conj(self) -> Self {
                <$ty>::new(self.re, -self.im)
            }
            #[inline(always)]
            fn abs(self) -> Self::Real {
                self.re.hypot(self.im)
            }
            #[inline(always)]
            fn is_finite(&self) -> bool {
                self.re.is_finite() && self.im.is_finite()
            }
            #[inline(always)]
            fn scale_real(self, rhs: Self::Real) -> Self {
                <$ty>::new(self.re * rhs, self.im * rhs)
            }
        }
    };
}

impl_real_field!(f32);
impl_real_field!(f64);
impl_complex_field!(c32, f32);
impl_complex_field!(c64, f64);
