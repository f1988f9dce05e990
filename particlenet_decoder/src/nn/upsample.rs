//! Upsampling from one vector per jet to one vector per particle.
//!
//! Both strategies use a kernel-size-1 transposed convolution, which acts as a
//! learned linear expansion. The convolution is owned by the module, so its
//! weights are created once and stay fixed between forward calls.

use burn::module::Module;
use burn::nn::conv::{ConvTranspose1d, ConvTranspose1dConfig};
use burn::prelude::*;

use crate::config::{UpsamplerConfig, UpsamplingStrategy};

/// Particle-specialized upsampling.
///
/// The hidden vector is treated as a single input channel and expanded into
/// `num_particles` output channels, so every particle slot learns its own
/// combination of the projected jet vector.
#[derive(Module, Debug)]
pub struct ParticleUpsampler<B: Backend> {
    /// Transposed conv with 1 input channel and `num_particles` output channels.
    conv: ConvTranspose1d<B>,
}

impl<B: Backend> ParticleUpsampler<B> {
    /// Create a new particle upsampler.
    pub fn new(num_particles: usize, device: &B::Device) -> Self {
        Self {
            conv: ConvTranspose1dConfig::new([1, num_particles], 1).init(device),
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, hidden_dim]
    /// Output shape: [batch, num_particles, hidden_dim]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 3> {
        // [batch, 1, hidden_dim]: one channel, hidden_dim positions
        let x: Tensor<B, 3> = x.unsqueeze_dim(1);
        self.conv.forward(x)
    }
}

/// Feature-specialized upsampling.
///
/// The hidden vector is repeated once per particle and a shared
/// `hidden_dim -> hidden_dim` channel transform is applied to every copy.
#[derive(Module, Debug)]
pub struct FeatureUpsampler<B: Backend> {
    /// Transposed conv with `hidden_dim` input and output channels.
    conv: ConvTranspose1d<B>,
    /// Copies of the hidden vector fed to the convolution.
    num_particles: usize,
}

impl<B: Backend> FeatureUpsampler<B> {
    /// Create a new feature upsampler.
    pub fn new(hidden_dim: usize, num_particles: usize, device: &B::Device) -> Self {
        Self {
            conv: ConvTranspose1dConfig::new([hidden_dim, hidden_dim], 1).init(device),
            num_particles,
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, hidden_dim]
    /// Output shape: [batch, num_particles, hidden_dim]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 3> {
        // [batch, hidden_dim, num_particles]: features as channels
        let x: Tensor<B, 3> = x.unsqueeze_dim(2);
        let x = x.repeat_dim(2, self.num_particles);

        self.conv.forward(x).swap_dims(1, 2)
    }
}

/// Upsampling stage, selected once at construction.
#[derive(Module, Debug)]
pub enum Upsampler<B: Backend> {
    /// Particle-specialized upsampling.
    Particle(ParticleUpsampler<B>),
    /// Feature-specialized upsampling.
    Feature(FeatureUpsampler<B>),
}

impl UpsamplerConfig {
    /// Initialize the upsampler.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Upsampler<B> {
        Upsampler::new(self, device)
    }
}

impl<B: Backend> Upsampler<B> {
    /// Create the upsampler described by the configuration.
    pub fn new(config: &UpsamplerConfig, device: &B::Device) -> Self {
        match config.strategy {
            UpsamplingStrategy::Particle => {
                Self::Particle(ParticleUpsampler::new(config.num_particles, device))
            }
            UpsamplingStrategy::Feature => Self::Feature(FeatureUpsampler::new(
                config.hidden_dim,
                config.num_particles,
                device,
            )),
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, hidden_dim]
    /// Output shape: [batch, num_particles, hidden_dim]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 3> {
        match self {
            Self::Particle(upsampler) => upsampler.forward(x),
            Self::Feature(upsampler) => upsampler.forward(x),
        }
    }

    /// Transposed convolution holding the learned upsampling weights.
    pub fn conv(&self) -> &ConvTranspose1d<B> {
        match self {
            Self::Particle(upsampler) => &upsampler.conv,
            Self::Feature(upsampler) => &upsampler.conv,
        }
    }

    /// The strategy this upsampler implements.
    pub fn strategy(&self) -> UpsamplingStrategy {
        match self {
            Self::Particle(_) => UpsamplingStrategy::Particle,
            Self::Feature(_) => UpsamplingStrategy::Feature,
        }
    }
}
