//! ParticleNet jet decoder.

use burn::module::Module;
use burn::prelude::*;

use crate::config::{ParticleNetDecoderConfig, UpsamplingStrategy};
use crate::error::{DecoderError, Result};
use crate::nn::edgeconv::EdgeConvStack;
use crate::nn::projector::LatentProjector;
use crate::nn::upsample::Upsampler;

/// Decoder mapping a latent jet embedding to a set of particle features.
///
/// Architecture:
/// 1. Project the encoded jet to the hidden width
/// 2. Upsample to one hidden vector per particle
/// 3. Refine with three EdgeConv blocks down to `output_dim` features
#[derive(Module, Debug)]
pub struct ParticleNetDecoder<B: Backend> {
    /// Encoded jet to hidden vector.
    projector: LatentProjector<B>,
    /// Hidden vector to per-particle vectors.
    upsampler: Upsampler<B>,
    /// Per-particle refinement.
    edgeconvs: EdgeConvStack<B>,
    encoded_dim: usize,
    num_particles: usize,
    output_dim: usize,
}

impl ParticleNetDecoderConfig {
    /// Validate the configuration and initialize the decoder.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<ParticleNetDecoder<B>> {
        ParticleNetDecoder::new(self, device)
    }
}

impl<B: Backend> ParticleNetDecoder<B> {
    /// Create a new decoder from configuration.
    pub fn new(config: &ParticleNetDecoderConfig, device: &B::Device) -> Result<Self> {
        config.validate()?;

        let decoder = Self {
            projector: config.projector().init(device),
            upsampler: config.upsampler().init(device),
            edgeconvs: config.edgeconvs().init(device)?,
            encoded_dim: config.encoded_dim,
            num_particles: config.num_particles,
            output_dim: config.output_dim,
        };

        log::info!(
            "ParticleNet decoder: encoded_dim={} particles={} output_dim={} strategy={:?} params={}",
            config.encoded_dim,
            config.num_particles,
            config.output_dim,
            config.strategy,
            decoder.num_params(),
        );
        log::debug!(
            "normalization={:?} hidden_dim={} k={} dropout={}",
            config.normalization,
            config.hidden_dim,
            config.k,
            config.dropout,
        );

        Ok(decoder)
    }

    /// Forward pass.
    ///
    /// Input: encoded jets of shape [batch, encoded_dim]
    /// Output: particle features of shape [batch, num_particles, output_dim]
    ///
    /// A wrong input width panics inside the tensor runtime; use
    /// [`try_forward`](Self::try_forward) to get an error instead.
    pub fn forward(&self, encoded: Tensor<B, 2>) -> Tensor<B, 3> {
        let up = self.upsample(encoded);
        self.edgeconvs.forward(up)
    }

    /// Forward pass with the input shape checked first.
    pub fn try_forward(&self, encoded: Tensor<B, 2>) -> Result<Tensor<B, 3>> {
        self.check_input(&encoded)?;
        Ok(self.forward(encoded))
    }

    /// Check that `encoded` has shape [batch, encoded_dim] with batch > 0.
    pub fn check_input(&self, encoded: &Tensor<B, 2>) -> Result<()> {
        let [batch, width] = encoded.dims();

        if batch == 0 {
            return Err(DecoderError::EmptyBatch);
        }
        if width != self.encoded_dim {
            return Err(DecoderError::ShapeMismatch {
                expected: vec![batch, self.encoded_dim],
                got: vec![batch, width],
            });
        }

        Ok(())
    }

    /// Projection stage only.
    ///
    /// Input shape: [batch, encoded_dim]
    /// Output shape: [batch, hidden_dim]
    pub fn project(&self, encoded: Tensor<B, 2>) -> Tensor<B, 2> {
        self.projector.forward(encoded)
    }

    /// Projection and upsampling stages.
    ///
    /// Input shape: [batch, encoded_dim]
    /// Output shape: [batch, num_particles, hidden_dim]
    pub fn upsample(&self, encoded: Tensor<B, 2>) -> Tensor<B, 3> {
        self.upsampler.forward(self.project(encoded))
    }

    /// Width of the encoded jet vectors.
    pub fn encoded_dim(&self) -> usize {
        self.encoded_dim
    }

    /// Number of particles decoded per jet.
    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    /// Feature dimension of each decoded particle.
    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Upsampling stage.
    pub fn upsampler(&self) -> &Upsampler<B> {
        &self.upsampler
    }

    /// Upsampling strategy in use.
    pub fn strategy(&self) -> UpsamplingStrategy {
        self.upsampler.strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use burn::module::AutodiffModule;
    use burn::tensor::Distribution;

    type TestBackend = NdArray;

    fn small_config(strategy: UpsamplingStrategy) -> ParticleNetDecoderConfig {
        ParticleNetDecoderConfig::new(12, 8)
            .with_hidden_dim(32)
            .with_output_dim(3)
            .with_k(4)
            .with_strategy(strategy)
    }

    #[test]
    fn test_decoder_forward() {
        let device = Default::default();
        let decoder = small_config(UpsamplingStrategy::Particle)
            .init::<TestBackend>(&device)
            .unwrap();

        let encoded = Tensor::random([4, 12], Distribution::Default, &device);
        let output = decoder.forward(encoded);

        assert_eq!(output.dims(), [4, 8, 3]);
    }

    #[test]
    fn test_decoder_stages() {
        let device = Default::default();
        let decoder = small_config(UpsamplingStrategy::Feature)
            .init::<TestBackend>(&device)
            .unwrap();

        let encoded = Tensor::random([2, 12], Distribution::Default, &device);
        assert_eq!(decoder.project(encoded.clone()).dims(), [2, 32]);
        assert_eq!(decoder.upsample(encoded).dims(), [2, 8, 32]);
    }

    #[test]
    fn test_decoder_accessors() {
        let device = Default::default();
        let decoder = small_config(UpsamplingStrategy::Feature)
            .init::<TestBackend>(&device)
            .unwrap();

        assert_eq!(decoder.encoded_dim(), 12);
        assert_eq!(decoder.num_particles(), 8);
        assert_eq!(decoder.output_dim(), 3);
        assert_eq!(decoder.strategy(), UpsamplingStrategy::Feature);
    }

    #[test]
    fn test_try_forward_rejects_wrong_width() {
        let device = Default::default();
        let decoder = small_config(UpsamplingStrategy::Particle)
            .init::<TestBackend>(&device)
            .unwrap();

        let result = decoder.try_forward(Tensor::zeros([4, 10], &device));
        assert_eq!(
            result.err(),
            Some(DecoderError::ShapeMismatch {
                expected: vec![4, 12],
                got: vec![4, 10],
            })
        );
    }

    #[test]
    fn test_try_forward_rejects_empty_batch() {
        let device = Default::default();
        let decoder = small_config(UpsamplingStrategy::Particle)
            .init::<TestBackend>(&device)
            .unwrap();

        let result = decoder.try_forward(Tensor::zeros([0, 12], &device));
        assert_eq!(result.err(), Some(DecoderError::EmptyBatch));
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let device = Default::default();
        let result = ParticleNetDecoderConfig::new(12, 0).init::<TestBackend>(&device);
        assert!(matches!(result, Err(DecoderError::InvalidConfig { .. })));
    }

    #[test]
    fn test_training_backend_forward_and_valid() {
        let device = Default::default();
        let decoder = small_config(UpsamplingStrategy::Particle)
            .init::<Autodiff<TestBackend>>(&device)
            .unwrap();

        let encoded = Tensor::random([3, 12], Distribution::Default, &device);
        let output = decoder.forward(encoded);
        assert_eq!(output.dims(), [3, 8, 3]);

        let inference = decoder.valid();
        let output = inference.forward(Tensor::random([3, 12], Distribution::Default, &device));
        assert_eq!(output.dims(), [3, 8, 3]);
    }
}
