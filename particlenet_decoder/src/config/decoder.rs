//! Top-level decoder configuration.

use burn::config::Config;

use super::{
    EdgeConvStackConfig, InputNormalization, LatentProjectorConfig, UpsamplerConfig,
    UpsamplingStrategy,
};
use crate::error::DecoderError;

/// Configuration for the ParticleNet jet decoder.
///
/// `encoded_dim` and `num_particles` are required; everything else defaults
/// to the reference architecture (256 hidden width, k = 16, 16 output
/// features, dropout 0.1, particle-specialized upsampling).
#[derive(Config, Debug)]
pub struct ParticleNetDecoderConfig {
    /// Dimension of the encoded jet vector.
    pub encoded_dim: usize,

    /// Number of particles decoded per jet.
    pub num_particles: usize,

    /// Feature dimension of each decoded particle.
    #[config(default = 16)]
    pub output_dim: usize,

    /// Width of the projected jet vector and of the first EdgeConv block.
    #[config(default = 256)]
    pub hidden_dim: usize,

    /// Nearest neighbours used by every EdgeConv block.
    #[config(default = 16)]
    pub k: usize,

    /// Dropout probability in the latent projector.
    #[config(default = 0.1)]
    pub dropout: f64,

    /// Upsampling strategy.
    #[config(default = "UpsamplingStrategy::Particle")]
    pub strategy: UpsamplingStrategy,

    /// Normalization applied to the encoded input.
    #[config(default = "InputNormalization::BatchSoftmax")]
    pub normalization: InputNormalization,
}

impl ParticleNetDecoderConfig {
    /// Check that every dimension is usable.
    pub fn validate(&self) -> crate::error::Result<()> {
        let positive = [
            ("encoded_dim", self.encoded_dim),
            ("num_particles", self.num_particles),
            ("output_dim", self.output_dim),
            ("k", self.k),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(DecoderError::invalid_config(format!(
                    "{name} must be positive"
                )));
            }
        }

        if self.hidden_dim < 4 {
            return Err(DecoderError::invalid_config(format!(
                "hidden_dim must be at least 4, got {}",
                self.hidden_dim
            )));
        }

        if !(0.0..1.0).contains(&self.dropout) {
            return Err(DecoderError::invalid_config(format!(
                "dropout must be in [0, 1), got {}",
                self.dropout
            )));
        }

        self.edgeconvs().validate()
    }

    /// Projector configuration derived from this decoder configuration.
    pub fn projector(&self) -> LatentProjectorConfig {
        LatentProjectorConfig::new(self.encoded_dim)
            .with_hidden_dim(self.hidden_dim)
            .with_dropout(self.dropout)
            .with_normalization(self.normalization.clone())
    }

    /// Upsampler configuration derived from this decoder configuration.
    pub fn upsampler(&self) -> UpsamplerConfig {
        UpsamplerConfig::new(self.num_particles)
            .with_hidden_dim(self.hidden_dim)
            .with_strategy(self.strategy.clone())
    }

    /// EdgeConv stack configuration derived from this decoder configuration.
    pub fn edgeconvs(&self) -> EdgeConvStackConfig {
        EdgeConvStackConfig::particlenet(self.hidden_dim, self.output_dim, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_defaults() {
        let config = ParticleNetDecoderConfig::new(64, 30);
        assert_eq!(config.output_dim, 16);
        assert_eq!(config.hidden_dim, 256);
        assert_eq!(config.k, 16);
        assert_eq!(config.strategy, UpsamplingStrategy::Particle);
        assert_eq!(config.normalization, InputNormalization::BatchSoftmax);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_configs() {
        let config = ParticleNetDecoderConfig::new(64, 30)
            .with_output_dim(4)
            .with_strategy(UpsamplingStrategy::Feature);

        let projector = config.projector();
        assert_eq!(projector.input_dim, 64);
        assert_eq!(projector.hidden_dim, 256);

        let upsampler = config.upsampler();
        assert_eq!(upsampler.num_particles, 30);
        assert_eq!(upsampler.strategy, UpsamplingStrategy::Feature);

        assert_eq!(config.edgeconvs().out_channels(), 4);
    }

    #[test]
    fn test_validate_rejects_zero_dims() {
        for config in [
            ParticleNetDecoderConfig::new(0, 30),
            ParticleNetDecoderConfig::new(64, 0),
            ParticleNetDecoderConfig::new(64, 30).with_output_dim(0),
            ParticleNetDecoderConfig::new(64, 30).with_k(0),
            ParticleNetDecoderConfig::new(64, 30).with_hidden_dim(3),
        ] {
            assert!(
                matches!(config.validate(), Err(DecoderError::InvalidConfig { .. })),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_dropout() {
        let config = ParticleNetDecoderConfig::new(64, 30).with_dropout(1.0);
        assert!(config.validate().is_err());

        let config = ParticleNetDecoderConfig::new(64, 30).with_dropout(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = ParticleNetDecoderConfig::new(64, 30)
            .with_strategy(UpsamplingStrategy::Feature)
            .with_normalization(InputNormalization::FeatureSoftmax);

        let json = config.to_string();
        let restored = ParticleNetDecoderConfig::load_binary(json.as_bytes()).unwrap();

        assert_eq!(restored.encoded_dim, 64);
        assert_eq!(restored.num_particles, 30);
        assert_eq!(restored.strategy, UpsamplingStrategy::Feature);
        assert_eq!(restored.normalization, InputNormalization::FeatureSoftmax);
    }
}
