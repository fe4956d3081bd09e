//! qnsparse - quantum-number conserving block-sparse tensor storage
//!
//! Tensors whose axes carry conserved charges ("quantum numbers") are block
//! sparse: a block can only be non-zero if the charges of its sub-blocks,
//! oriented by the arrows of their axes, add up to the tensor's flux. This
//! crate stores exactly those blocks, back to back in one flat buffer, and
//! resolves block and element coordinates into that buffer.
//!
//! # Architecture
//!
//! ```text
//! QnIndexSet<Q>  ──►  BlockOffsets::from_flux   (enumerate with Counter,
//!      │                    │                    keep blocks with net charge == flux)
//!      │                    ▼
//!      │             QnBlockSparse<ElT>         (zeroed buffer + block table)
//!      │                    │
//!      └────────────►  block / element lookup   (mixed-radix addressing)
//!
//! QnTensor<Q, ElT> bundles the index set, the flux and the storage.
//! ```
//!
//! # Example
//!
//! ```
//! use qnsparse::{Arrow, QnIndex, QnIndexSet, QnTensor};
//!
//! // axis A: sub-blocks (charge 0, size 2), (charge 1, size 3)
//! // axis B: sub-blocks (charge 0, size 2), (charge -1, size 2)
//! let a = QnIndex::new([(0i32, 2), (1, 3)], Arrow::Out);
//! let b = QnIndex::new([(0i32, 2), (-1, 2)], Arrow::Out);
//! let mut t: QnTensor<i32, f64> = QnTensor::zeros(QnIndexSet::new(vec![a, b]), 0);
//!
//! // only (A0, B0) and (A1, B1) have net charge 0
//! assert_eq!(t.nnzblocks(), 2);
//! assert_eq!(t.nnz(), 2 * 2 + 3 * 2);
//!
//! t.set(&[4, 3], 1.0).unwrap();
//! assert_eq!(t.blockview(&[1, 1]).unwrap().unwrap()[5], 1.0);
//! assert!(t.blockview(&[1, 0]).unwrap().is_none());
//! ```

pub mod charge;
pub mod counter;
pub mod error;
pub mod index;
pub mod qn;
pub mod qn_tensor;
pub mod radix;
pub mod random;
pub mod scalar;
pub mod storage;

pub use charge::{Arrow, Charge};
pub use error::{Result, TensorError};
pub use index::{BlockDim, QnIndex, QnIndexSet};
pub use qn::QN;
pub use qn_tensor::QnTensor;
pub use scalar::{Scalar, c64};
pub use storage::blocksparse::{Block, BlockOffsets, QnBlockSparse};
