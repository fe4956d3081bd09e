//! Conserved charges and index orientation.
//!
//! A charge is any value that can be summed and negated. The block-sparse
//! engine only ever accumulates oriented charges and compares the total with
//! the tensor's flux, so nothing beyond [`Charge`] is required.

use std::fmt::Debug;
use std::ops::{Add, Neg};

/// Orientation of a composite index.
///
/// `Out` contributes charges with sign +1, `In` with sign -1, matching the
/// arrow convention of ITensor quantum-number indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Arrow {
    In,
    #[default]
    Out,
}

impl Arrow {
    /// Sign applied to charges flowing along this arrow.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Arrow::In => -1,
            Arrow::Out => 1,
        }
    }

    /// Reversed arrow.
    #[inline]
    pub fn rev(self) -> Self {
        match self {
            Arrow::In => Arrow::Out,
            Arrow::Out => Arrow::In,
        }
    }
}

impl Neg for Arrow {
    type Output = Arrow;

    fn neg(self) -> Arrow {
        self.rev()
    }
}

impl std::fmt::Display for Arrow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arrow::In => write!(f, "In"),
            Arrow::Out => write!(f, "Out"),
        }
    }
}

/// A conserved, group-valued label.
///
/// `Default` must be the group identity.
pub trait Charge:
    Clone + PartialEq + Debug + Default + Add<Output = Self> + Neg<Output = Self>
{
    /// The charge scaled by the sign of `arrow`.
    #[inline]
    fn oriented(self, arrow: Arrow) -> Self {
        match arrow {
            Arrow::Out => self,
            Arrow::In => -self,
        }
    }
}

macro_rules! impl_charge_for_int {
    ($($t:ty),*) => {
        $(impl Charge for $t {})*
    };
}

impl_charge_for_int!(i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_sign() {
        assert_eq!(Arrow::Out.sign(), 1);
        assert_eq!(Arrow::In.sign(), -1);
        assert_eq!(Arrow::default(), Arrow::Out);
    }

    #[test]
    fn test_arrow_rev() {
        assert_eq!(Arrow::In.rev(), Arrow::Out);
        assert_eq!(-Arrow::Out, Arrow::In);
        assert_eq!(format!("{}", Arrow::In), "In");
    }

    #[test]
    fn test_int_oriented() {
        assert_eq!(3i32.oriented(Arrow::Out), 3);
        assert_eq!(3i32.oriented(Arrow::In), -3);
        assert_eq!((-2i64).oriented(Arrow::In), 2);
    }
}
