//! EdgeConv block.

use burn::module::Module;
use burn::nn::conv::{Conv1d, Conv1dConfig, Conv2d, Conv2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, Relu};
use burn::prelude::*;

use super::knn::{gather_neighbours, knn};
use crate::config::EdgeConvConfig;
use crate::error::Result;

/// Projection applied to the block input when its width differs from the output.
#[derive(Module, Debug)]
pub struct Shortcut<B: Backend> {
    /// 1x1 convolution over the point axis.
    conv: Conv1d<B>,
    /// Optional batch normalization.
    norm: Option<BatchNorm<B, 1>>,
}

impl<B: Backend> Shortcut<B> {
    fn new(in_channels: usize, out_channels: usize, batch_norm: bool, device: &B::Device) -> Self {
        Self {
            conv: Conv1dConfig::new(in_channels, out_channels, 1)
                .with_bias(!batch_norm)
                .init(device),
            norm: batch_norm.then(|| BatchNormConfig::new(out_channels).init(device)),
        }
    }

    /// Input and output shape: [batch, channels, num_points]
    fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let x = self.conv.forward(x);
        match &self.norm {
            Some(norm) => norm.forward(x),
            None => x,
        }
    }
}

/// Graph convolution over a dynamic k-nearest-neighbour graph.
///
/// For every particle the k closest particles in feature space are found,
/// edge features `(x_i, x_j - x_i)` are passed through a stack of 1x1
/// convolutions and averaged over the neighbours. A shortcut adds the
/// (projected) input back before the final activation.
#[derive(Module, Debug)]
pub struct EdgeConv<B: Backend> {
    /// 1x1 convolutions over edge features.
    convs: Vec<Conv2d<B>>,
    /// Batch norms matching `convs`; empty when disabled.
    norms: Vec<BatchNorm<B, 2>>,
    /// Input projection; `None` when input and output widths match.
    shortcut: Option<Shortcut<B>>,
    /// Activation function.
    activation: Relu,
    /// Number of neighbours.
    k: usize,
    /// Whether activations are applied.
    activate: bool,
    /// Output channels per particle.
    out_channels: usize,
}

impl EdgeConvConfig {
    /// Validate the configuration and initialize the block.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<EdgeConv<B>> {
        EdgeConv::new(self, device)
    }
}

impl<B: Backend> EdgeConv<B> {
    /// Create a new EdgeConv block from configuration.
    pub fn new(config: &EdgeConvConfig, device: &B::Device) -> Result<Self> {
        config.validate()?;

        let mut convs = Vec::with_capacity(config.widths.len());
        let mut norms = Vec::new();
        let mut in_dim = 2 * config.in_channels;

        for &out_dim in &config.widths {
            convs.push(
                Conv2dConfig::new([in_dim, out_dim], [1, 1])
                    .with_bias(!config.batch_norm)
                    .init(device),
            );
            if config.batch_norm {
                norms.push(BatchNormConfig::new(out_dim).init(device));
            }
            in_dim = out_dim;
        }

        let out_channels = config.out_channels();
        let shortcut = (config.in_channels != out_channels).then(|| {
            Shortcut::new(config.in_channels, out_channels, config.batch_norm, device)
        });

        Ok(Self {
            convs,
            norms,
            shortcut,
            activation: Relu::new(),
            k: config.k,
            activate: config.activation,
            out_channels,
        })
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, num_points, in_channels]
    /// Output shape: [batch, num_points, out_channels]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let indices = knn(x.clone(), self.k);
        let k = indices.dims()[2];

        // Edge features: [batch, num_points, k, 2 * in_channels]
        let neighbours = gather_neighbours(x.clone(), indices);
        let centres: Tensor<B, 4> = x.clone().unsqueeze_dim(2);
        let centres = centres.repeat_dim(2, k);
        let edges = Tensor::cat(vec![centres.clone(), neighbours - centres], 3);

        // Channels first for the 1x1 convs: [batch, 2 * in_channels, num_points, k]
        let mut h = edges.permute([0, 3, 1, 2]);
        for (i, conv) in self.convs.iter().enumerate() {
            h = conv.forward(h);
            if let Some(norm) = self.norms.get(i) {
                h = norm.forward(h);
            }
            if self.activate {
                h = self.activation.forward(h);
            }
        }

        // Aggregate over neighbours: [batch, out_channels, num_points]
        let h: Tensor<B, 3> = h.mean_dim(3).squeeze(3);

        let x = x.swap_dims(1, 2);
        let shortcut = match &self.shortcut {
            Some(shortcut) => shortcut.forward(x),
            None => x,
        };

        let mut out = h + shortcut;
        if self.activate {
            out = self.activation.forward(out);
        }

        out.swap_dims(1, 2)
    }

    /// Number of neighbours requested per particle.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Output channels per particle.
    pub fn out_channels(&self) -> usize {
        self.out_channels
    }
}
