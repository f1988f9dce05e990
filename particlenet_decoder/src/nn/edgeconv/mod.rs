//! EdgeConv graph convolution, as used by ParticleNet.
//!
//! This module provides:
//! - k-nearest-neighbour graph construction in feature space
//! - The EdgeConv block itself
//! - A stack chaining several blocks

mod block;
pub mod knn;
mod stack;

pub use block::{EdgeConv, Shortcut};
pub use stack::EdgeConvStack;
