//! Chain of EdgeConv blocks.

use burn::module::Module;
use burn::prelude::*;

use super::EdgeConv;
use crate::config::EdgeConvStackConfig;
use crate::error::Result;

/// EdgeConv blocks applied in sequence, each rebuilding its own neighbour
/// graph from the features it receives.
#[derive(Module, Debug)]
pub struct EdgeConvStack<B: Backend> {
    blocks: Vec<EdgeConv<B>>,
}

impl EdgeConvStackConfig {
    /// Validate the configuration and initialize the stack.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<EdgeConvStack<B>> {
        EdgeConvStack::new(self, device)
    }
}

impl<B: Backend> EdgeConvStack<B> {
    /// Create a new stack from configuration.
    pub fn new(config: &EdgeConvStackConfig, device: &B::Device) -> Result<Self> {
        config.validate()?;

        let blocks = config
            .blocks
            .iter()
            .map(|block| EdgeConv::new(block, device))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { blocks })
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, num_points, in_channels]
    /// Output shape: [batch, num_points, out_channels]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        self.blocks.iter().fold(x, |x, block| block.forward(x))
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Output channels of the last block.
    pub fn out_channels(&self) -> usize {
        self.blocks.last().map_or(0, EdgeConv::out_channels)
    }
}
