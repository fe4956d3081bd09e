//! Scalar trait for tensor element types.

use faer_traits::ComplexField;
use std::fmt::Debug;

pub use faer::c64;

/// Element types that can live in a block-sparse buffer.
///
/// Built on faer's `ComplexField` so the storage interoperates with the
/// rest of the faer-based numerics.
pub trait Scalar: ComplexField + Copy + Debug + Default + PartialEq + 'static {
    /// Returns the additive identity (zero).
    ///
    /// Freshly constructed buffers are filled with this value.
    fn zero() -> Self {
        Self::default()
    }

    /// Squared magnitude, used for norms.
    fn abs_sqr(self) -> f64;

    /// Multiply by a real factor.
    fn scale_real(self, factor: f64) -> Self;
}

impl Scalar for f64 {
    #[inline]
    fn abs_sqr(self) -> f64 {
        self * self
    }

    #[inline]
    fn scale_real(self, factor: f64) -> Self {
        self * factor
    }
}

impl Scalar for c64 {
    #[inline]
    fn abs_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn scale_real(self, factor: f64) -> Self {
        c64::new(self.re * factor, self.im * factor)
    }
}
