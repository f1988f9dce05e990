//! Configuration types for particlenet_decoder.
//!
//! This module provides Burn-style configuration structs for the latent
//! projector, the upsampling strategies, the EdgeConv blocks and the full
//! decoder.

mod decoder;
mod network;

pub use decoder::ParticleNetDecoderConfig;
pub use network::{
    EdgeConvConfig, EdgeConvStackConfig, InputNormalization, LatentProjectorConfig,
    UpsamplerConfig, UpsamplingStrategy,
};
