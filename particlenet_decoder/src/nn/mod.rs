//! Neural network modules for jet decoding.
//!
//! This module provides:
//! - The latent projector mapping encoded jets to the hidden width
//! - Particle- and feature-specialized upsampling
//! - EdgeConv graph convolution blocks and stacks
//! - The full ParticleNet decoder

pub mod decoder;
pub mod edgeconv;
pub mod projector;
pub mod upsample;

pub use decoder::ParticleNetDecoder;
pub use edgeconv::{EdgeConv, EdgeConvStack};
pub use projector::LatentProjector;
pub use upsample::{FeatureUpsampler, ParticleUpsampler, Upsampler};
