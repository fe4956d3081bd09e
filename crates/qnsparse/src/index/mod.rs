//! Axis structure of quantum-number block-sparse tensors.
//!
//! - [`BlockDim`] - sub-block sizes of one axis
//! - [`QnIndex`] - one axis: sub-blocks with charges plus an orientation
//! - [`QnIndexSet`] - all axes of a tensor

mod block_dim;
mod qn_index;

pub use block_dim::BlockDim;
pub use qn_index::{QnIndex, QnIndexSet};
