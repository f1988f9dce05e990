//! Neural network configuration types.

use burn::config::Config;

use crate::error::DecoderError;

/// Normalization applied to the encoded jet vectors before projection.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum InputNormalization {
    /// Softmax across the batch axis (dimension 0).
    ///
    /// Each feature column is normalized over the jets in the batch, so a
    /// batch holding a single jet always normalizes to ones.
    BatchSoftmax,
    /// Softmax across the feature axis (dimension 1).
    FeatureSoftmax,
    /// No normalization.
    Identity,
}

impl InputNormalization {
    /// Softmax axis this normalization applies, or `None` for identity.
    pub fn softmax_dim(&self) -> Option<usize> {
        match self {
            Self::BatchSoftmax => Some(0),
            Self::FeatureSoftmax => Some(1),
            Self::Identity => None,
        }
    }
}

/// How the projected jet vector is expanded into per-particle vectors.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum UpsamplingStrategy {
    /// One learned filter per particle slot (1 -> n channel transposed conv).
    Particle,
    /// One learned feature transform shared by every particle slot
    /// (hidden -> hidden channel transposed conv over repeated copies).
    Feature,
}

/// Configuration for the latent projector.
#[derive(Config, Debug)]
pub struct LatentProjectorConfig {
    /// Dimension of the encoded jet vector.
    pub input_dim: usize,

    /// Output dimension of the projection.
    #[config(default = 256)]
    pub hidden_dim: usize,

    /// Dropout probability between the two linear layers.
    #[config(default = 0.1)]
    pub dropout: f64,

    /// Normalization applied to the input.
    #[config(default = "InputNormalization::BatchSoftmax")]
    pub normalization: InputNormalization,
}

/// Configuration for the upsampling stage.
#[derive(Config, Debug)]
pub struct UpsamplerConfig {
    /// Number of particles produced per jet.
    pub num_particles: usize,

    /// Width of the projected jet vector (and of each particle vector).
    #[config(default = 256)]
    pub hidden_dim: usize,

    /// Upsampling strategy.
    #[config(default = "UpsamplingStrategy::Particle")]
    pub strategy: UpsamplingStrategy,
}

/// Configuration for a single EdgeConv block.
#[derive(Config, Debug)]
pub struct EdgeConvConfig {
    /// Number of input channels per particle.
    pub in_channels: usize,

    /// Number of nearest neighbours in feature space.
    #[config(default = 16)]
    pub k: usize,

    /// Output widths of the successive 1x1 convolutions.
    pub widths: Vec<usize>,

    /// Whether each convolution is followed by batch normalization.
    #[config(default = true)]
    pub batch_norm: bool,

    /// Whether ReLU activations are applied.
    #[config(default = true)]
    pub activation: bool,
}

impl EdgeConvConfig {
    /// Number of output channels per particle.
    pub fn out_channels(&self) -> usize {
        self.widths.last().copied().unwrap_or(self.in_channels)
    }

    /// Check that the block can be built.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.in_channels == 0 {
            return Err(DecoderError::invalid_config(
                "edgeconv in_channels must be positive",
            ));
        }
        if self.k == 0 {
            return Err(DecoderError::invalid_config("edgeconv k must be positive"));
        }
        if self.widths.is_empty() {
            return Err(DecoderError::invalid_config(
                "edgeconv needs at least one width",
            ));
        }
        if self.widths.contains(&0) {
            return Err(DecoderError::invalid_config(format!(
                "edgeconv widths must be positive, got {:?}",
                self.widths
            )));
        }
        Ok(())
    }
}

/// Configuration for a chain of EdgeConv blocks.
#[derive(Config, Debug)]
pub struct EdgeConvStackConfig {
    /// Blocks, applied in order.
    pub blocks: Vec<EdgeConvConfig>,
}

impl EdgeConvStackConfig {
    /// The three-block ParticleNet decoder stack.
    ///
    /// With `hidden_dim = 256`:
    /// `256 -(256, 256, 128)-> 128 -(128, 128, 64)-> 64 -(64, 64, d)-> d`.
    pub fn particlenet(hidden_dim: usize, output_dim: usize, k: usize) -> Self {
        let half = hidden_dim / 2;
        let quarter = hidden_dim / 4;

        Self::new(vec![
            EdgeConvConfig::new(hidden_dim, vec![hidden_dim, hidden_dim, half]).with_k(k),
            EdgeConvConfig::new(half, vec![half, half, quarter]).with_k(k),
            EdgeConvConfig::new(quarter, vec![quarter, quarter, output_dim]).with_k(k),
        ])
    }

    /// Input channels of the first block.
    pub fn in_channels(&self) -> usize {
        self.blocks.first().map_or(0, |block| block.in_channels)
    }

    /// Output channels of the last block.
    pub fn out_channels(&self) -> usize {
        self.blocks.last().map_or(0, EdgeConvConfig::out_channels)
    }

    /// Check every block and that consecutive blocks agree on widths.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.blocks.is_empty() {
            return Err(DecoderError::invalid_config(
                "edgeconv stack needs at least one block",
            ));
        }

        for block in &self.blocks {
            block.validate()?;
        }

        for (i, pair) in self.blocks.windows(2).enumerate() {
            let produced = pair[0].out_channels();
            let expected = pair[1].in_channels;
            if produced != expected {
                return Err(DecoderError::invalid_config(format!(
                    "edgeconv block {} outputs {} channels but block {} expects {}",
                    i,
                    produced,
                    i + 1,
                    expected
                )));
            }
        }

        Ok(())
    }
}
