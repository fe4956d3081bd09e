//! Quantum-number block-sparse storage.
//!
//! Only blocks whose net charge equals the tensor's flux are stored; every
//! other block is structurally zero and takes no memory.
//!
//! ## Core Types
//!
//! - [`Block`] - One sub-block choice per axis
//! - [`BlockOffset`] / [`BlockOffsets`] - Table of retained blocks and the
//!   enumeration that builds it
//! - [`QnBlockSparse`] - Flat buffer plus table, with block and element lookup
//!
//! # Example
//!
//! ```
//! use qnsparse::{Arrow, QN, QnIndex, QnIndexSet};
//! use qnsparse::storage::blocksparse::QnBlockSparse;
//!
//! // spin-1/2 site: up (Sz=+1) and down (Sz=-1)
//! let s = QnIndex::new([(QN::new(&[1]), 1), (QN::new(&[-1]), 1)], Arrow::Out);
//! let is = QnIndexSet::new(vec![s.clone(), s.dag()]);
//!
//! // an operator conserving Sz only has diagonal blocks
//! let storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &QN::default());
//! assert_eq!(storage.nnzblocks(), 2);
//! assert!(storage.block(&is, &[0, 1]).unwrap().is_none());
//! ```

mod block;
mod block_offsets;
mod storage;

pub use block::Block;
pub use block_offsets::{BlockOffset, BlockOffsets};
pub use storage::{CpuQnBlockSparse, QnBlockSparse};
