//! Storage types for tensor data.
//!
//! ```text
//! DataBuffer<T> (trait)     flat element buffer
//! └── CpuBuffer<T>          Vec-backed
//! QnBlockSparse<T, D>       retained blocks of a flux-conserving tensor
//! ```

pub mod blocksparse;
mod buffer;

pub use blocksparse::QnBlockSparse;
pub use buffer::{CpuBuffer, DataBuffer};
