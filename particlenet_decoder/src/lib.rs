//! # particlenet_decoder
//!
//! ParticleNet-style jet decoder built on Burn.
//!
//! This crate maps a fixed-size latent embedding of a particle-physics jet to
//! a set of `n` particles with `d` features each, refining the upsampled
//! particles with EdgeConv graph convolutions.
//!
//! ## Features
//!
//! - **Latent projector**: normalize -> linear -> dropout -> linear
//! - **Upsampling**: particle-specialized or feature-specialized transposed
//!   convolutions, selected at construction
//! - **EdgeConv**: dynamic k-nearest-neighbour graph convolution in feature space
//! - **Decoder**: the three-block ParticleNet decoder, generic over any backend
//!
//! ## Quick Start
//!
//! ```ignore
//! use particlenet_decoder::config::{ParticleNetDecoderConfig, UpsamplingStrategy};
//! use burn::backend::NdArray;
//! use burn::prelude::*;
//!
//! let device = Default::default();
//! let decoder = ParticleNetDecoderConfig::new(32, 30)
//!     .with_strategy(UpsamplingStrategy::Feature)
//!     .init::<NdArray>(&device)?;
//!
//! let encoded = Tensor::zeros([8, 32], &device);
//! let particles = decoder.try_forward(encoded)?; // [8, 30, 16]
//! ```
//!
//! ## Architecture
//!
//! ```text
//! encoded [B, encoded_dim]
//!     │  LatentProjector
//!     ▼
//! [B, 256]
//!     │  Upsampler (Particle | Feature)
//!     ▼
//! [B, n, 256]
//!     │  EdgeConv 256 -> 128 -> 64 -> d   (k = 16)
//!     ▼
//! particles [B, n, d]
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `ndarray` (default): CPU backend using ndarray
//! - `wgpu`: GPU acceleration via WebGPU
//! - `autodiff`: Autodiff backend decorator for training

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod nn;

// Re-export key types for convenience
pub use config::{ParticleNetDecoderConfig, UpsamplingStrategy};
pub use error::{DecoderError, Result};
pub use nn::ParticleNetDecoder;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{
        EdgeConvConfig, EdgeConvStackConfig, InputNormalization, LatentProjectorConfig,
        ParticleNetDecoderConfig, UpsamplerConfig, UpsamplingStrategy,
    };
    pub use crate::error::{DecoderError, Result};
    pub use crate::nn::{
        EdgeConv, EdgeConvStack, FeatureUpsampler, LatentProjector, ParticleNetDecoder,
        ParticleUpsampler, Upsampler,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::prelude::*;

    type TestBackend = NdArray;

    #[test]
    fn test_reference_architecture() {
        let device = Default::default();
        let decoder = ParticleNetDecoderConfig::new(32, 30)
            .init::<TestBackend>(&device)
            .unwrap();

        let output = decoder.forward(Tensor::zeros([2, 32], &device));
        assert_eq!(output.dims(), [2, 30, 16]);
    }
}
