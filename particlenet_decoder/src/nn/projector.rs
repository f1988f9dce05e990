//! Latent projector: encoded jet vector to hidden representation.

use burn::module::Module;
use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::softmax;

use crate::config::{InputNormalization, LatentProjectorConfig};

/// Feed-forward block mapping an encoded jet to the decoder's hidden width.
///
/// Architecture: normalize -> linear -> dropout -> linear. There is no
/// activation between the two linear layers.
#[derive(Module, Debug)]
pub struct LatentProjector<B: Backend> {
    /// Encoded dimension to hidden dimension.
    input: Linear<B>,
    /// Dropout between the two linear layers.
    dropout: Dropout,
    /// Hidden dimension to hidden dimension.
    output: Linear<B>,
    /// Softmax axis applied before the first linear layer, if any.
    softmax_dim: Option<usize>,
}

impl LatentProjectorConfig {
    /// Initialize the projector.
    pub fn init<B: Backend>(&self, device: &B::Device) -> LatentProjector<B> {
        LatentProjector::new(self, device)
    }
}

impl<B: Backend> LatentProjector<B> {
    /// Create a new projector from configuration.
    pub fn new(config: &LatentProjectorConfig, device: &B::Device) -> Self {
        Self {
            input: LinearConfig::new(config.input_dim, config.hidden_dim).init(device),
            dropout: DropoutConfig::new(config.dropout).init(),
            output: LinearConfig::new(config.hidden_dim, config.hidden_dim).init(device),
            softmax_dim: config.normalization.softmax_dim(),
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, input_dim]
    /// Output shape: [batch, hidden_dim]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.normalize(x);
        let x = self.input.forward(x);
        let x = self.dropout.forward(x);
        self.output.forward(x)
    }

    fn normalize(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        match self.softmax_dim {
            Some(dim) => softmax(x, dim),
            None => x,
        }
    }

    /// Expected width of the encoded input.
    pub fn input_dim(&self) -> usize {
        // Burn stores linear weights as [d_input, d_output].
        self.input.weight.dims()[0]
    }

    /// Width of the projected output.
    pub fn output_dim(&self) -> usize {
        self.output.weight.dims()[1]
    }

    /// Input normalization in use.
    pub fn normalization(&self) -> InputNormalization {
        match self.softmax_dim {
            Some(0) => InputNormalization::BatchSoftmax,
            Some(_) => InputNormalization::FeatureSoftmax,
            None => InputNormalization::Identity,
        }
    }
}
