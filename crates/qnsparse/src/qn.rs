//! Multi-sector quantum numbers.
//!
//! A [`QN`] carries up to [`MAX_SECTORS`] independent conserved quantities,
//! e.g. particle number and spin projection, or a Z_n parity. Each sector is
//! either unused, a U(1) integer (modulus 1) or a Z_n value (modulus n > 1).

use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg};

use crate::charge::Charge;

/// Maximum number of sectors a [`QN`] can hold.
pub const MAX_SECTORS: usize = 4;

/// One sector of a quantum number.
///
/// `modulus == 0` marks an unused sector, which behaves as a zero of any
/// group when combined with a used one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QNVal {
    val: i32,
    modulus: i32,
}

impl QNVal {
    /// Create a sector value. Z_n values are reduced into `0..n`.
    ///
    /// # Panics
    /// Panics if `modulus < 1`.
    pub fn new(val: i32, modulus: i32) -> Self {
        assert!(modulus >= 1, "QN sector modulus must be >= 1, got {modulus}");
        Self {
            val: reduce(val, modulus),
            modulus,
        }
    }

    #[inline]
    pub fn val(&self) -> i32 {
        self.val
    }

    #[inline]
    pub fn modulus(&self) -> i32 {
        self.modulus
    }

    /// Whether this sector carries a value.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.modulus != 0
    }

    fn combine(self, other: Self) -> Self {
        match (self.modulus, other.modulus) {
            (0, _) => other,
            (_, 0) => self,
            (a, b) => {
                assert_eq!(a, b, "cannot add QN sectors with moduli {a} and {b}");
                QNVal::new(self.val + other.val, a)
            }
        }
    }

    fn negate(self) -> Self {
        if self.is_active() {
            QNVal::new(-self.val, self.modulus)
        } else {
            self
        }
    }
}

#[inline]
fn reduce(val: i32, modulus: i32) -> i32 {
    if modulus > 1 { val.rem_euclid(modulus) } else { val }
}

/// A quantum number with up to [`MAX_SECTORS`] sectors.
///
/// # Example
/// ```
/// use qnsparse::QN;
///
/// // particle number 1, parity 1 (mod 2)
/// let a = QN::with_moduli(&[(1, 1), (1, 2)]);
/// let b = a + a;
/// assert_eq!(b, QN::with_moduli(&[(2, 1), (0, 2)]));
///
/// // unused sectors compare equal to zero
/// assert_eq!(QN::new(&[0]), QN::default());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct QN {
    sectors: [QNVal; MAX_SECTORS],
}

impl QN {
    /// Create a QN from U(1) sector values.
    ///
    /// # Panics
    /// Panics if more than [`MAX_SECTORS`] values are given.
    pub fn new(vals: &[i32]) -> Self {
        let pairs: Vec<(i32, i32)> = vals.iter().map(|&v| (v, 1)).collect();
        Self::with_moduli(&pairs)
    }

    /// Create a QN from `(value, modulus)` pairs.
    ///
    /// # Panics
    /// Panics if more than [`MAX_SECTORS`] pairs are given or a modulus is < 1.
    pub fn with_moduli(pairs: &[(i32, i32)]) -> Self {
        assert!(
            pairs.len() <= MAX_SECTORS,
            "QN supports at most {MAX_SECTORS} sectors, got {}",
            pairs.len()
        );
        let mut sectors = [QNVal::default(); MAX_SECTORS];
        for (sector, &(val, modulus)) in sectors.iter_mut().zip(pairs) {
            *sector = QNVal::new(val, modulus);
        }
        Self { sectors }
    }

    /// Value of sector `i` (zero when unused).
    #[inline]
    pub fn val(&self, i: usize) -> i32 {
        self.sectors[i].val
    }

    /// Modulus of sector `i` (zero when unused).
    #[inline]
    pub fn modulus(&self, i: usize) -> i32 {
        self.sectors[i].modulus
    }

    /// All sectors, used or not.
    #[inline]
    pub fn sectors(&self) -> &[QNVal] {
        &self.sectors
    }

    /// Number of used sectors.
    pub fn nactive(&self) -> usize {
        self.sectors.iter().filter(|s| s.is_active()).count()
    }
}

impl Add for QN {
    type Output = QN;

    fn add(self, other: QN) -> QN {
        let mut sectors = self.sectors;
        for (s, o) in sectors.iter_mut().zip(other.sectors) {
            *s = s.combine(o);
        }
        QN { sectors }
    }
}

impl Neg for QN {
    type Output = QN;

    fn neg(self) -> QN {
        QN {
            sectors: self.sectors.map(QNVal::negate),
        }
    }
}

impl PartialEq for QN {
    fn eq(&self, other: &Self) -> bool {
        self.sectors
            .iter()
            .zip(&other.sectors)
            .all(|(a, b)| a.val == b.val)
    }
}

impl Eq for QN {}

impl Hash for QN {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for s in &self.sectors {
            state.write_i32(s.val);
        }
    }
}

impl Charge for QN {}

impl std::fmt::Display for QN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self
            .sectors
            .iter()
            .rposition(|s| s.is_active())
            .map_or(0, |last| last + 1);
        write!(f, "QN(")?;
        for (i, s) in self.sectors[..shown].iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", s.val)?;
        }
        write!(f, ")")
    }
}
