//! Random tensor construction.
//!
//! Random tensors keep their block structure: only flux-conserving blocks are
//! filled, every other block stays structurally zero.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::charge::Charge;
use crate::index::QnIndexSet;
use crate::qn_tensor::QnTensor;
use crate::scalar::{Scalar, c64};

/// Types that can be sampled uniformly from [0, 1).
pub trait RandomUniform: Scalar {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

/// Types that can be sampled from the standard normal distribution.
pub trait RandomNormal: Scalar {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // independent N(0, 1/2) parts so that |z|^2 has mean 1
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<Q: Charge, ElT: RandomUniform> QnTensor<Q, ElT> {
    /// Create a tensor whose stored elements are uniform in [0, 1).
    ///
    /// # Example
    ///
    /// ```
    /// use qnsparse::{Arrow, QnIndex, QnIndexSet, QnTensor};
    ///
    /// let a = QnIndex::new([(0i32, 2), (1, 3)], Arrow::Out);
    /// let b = QnIndex::new([(0i32, 2), (-1, 2)], Arrow::Out);
    /// let t: QnTensor<i32, f64> = QnTensor::random(QnIndexSet::new(vec![a, b]), 0);
    ///
    /// assert_eq!(t.nnz(), 10);
    /// assert!(t.storage().as_slice().iter().all(|&x| (0.0..1.0).contains(&x)));
    /// assert_eq!(t.get(&[0, 2]).unwrap(), 0.0);
    /// ```
    pub fn random(inds: QnIndexSet<Q>, flux: Q) -> Self {
        Self::random_with_rng(inds, flux, &mut rand::rng())
    }

    /// Uniform random tensor drawn from a specific RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use qnsparse::{Arrow, QnIndex, QnIndexSet, QnTensor};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let i = QnIndex::new([(0i32, 2), (1, 2)], Arrow::Out);
    /// let is = QnIndexSet::new(vec![i.clone(), i.dag()]);
    ///
    /// let t1: QnTensor<i32, f64> =
    ///     QnTensor::random_with_rng(is.clone(), 0, &mut StdRng::seed_from_u64(42));
    /// let t2: QnTensor<i32, f64> =
    ///     QnTensor::random_with_rng(is, 0, &mut StdRng::seed_from_u64(42));
    /// assert_eq!(t1, t2);
    /// ```
    pub fn random_with_rng<R: Rng>(inds: QnIndexSet<Q>, flux: Q, rng: &mut R) -> Self {
        let mut tensor = Self::zeros(inds, flux);
        for x in tensor.storage_mut().as_mut_slice() {
            *x = ElT::sample_uniform(rng);
        }
        tensor
    }
}

impl<Q: Charge, ElT: RandomNormal> QnTensor<Q, ElT> {
    /// Create a tensor whose stored elements are standard normal.
    pub fn randn(inds: QnIndexSet<Q>, flux: Q) -> Self {
        Self::randn_with_rng(inds, flux, &mut rand::rng())
    }

    /// Standard normal random tensor drawn from a specific RNG.
    pub fn randn_with_rng<R: Rng>(inds: QnIndexSet<Q>, flux: Q, rng: &mut R) -> Self {
        let mut tensor = Self::zeros(inds, flux);
        for x in tensor.storage_mut().as_mut_slice() {
            *x = ElT::sample_normal(rng);
        }
        tensor
    }
}
