//! Example: Decoding latent jet embeddings into particle sets.
//!
//! This example demonstrates the decoder workflow:
//! 1. Load (or create) a decoder configuration
//! 2. Build both upsampling variants from the same configuration
//! 3. Decode a batch of synthetic latent jets
//! 4. Save the configuration next to the outputs
//!
//! # Usage
//!
//! ```bash
//! cargo run -p particlenet_decoder --example decode_jets [config.json]
//! ```
//!
//! Output files are saved to `output/`.

use std::fs;
use std::path::Path;

use burn::backend::NdArray;
use burn::config::Config;
use burn::prelude::*;
use burn::tensor::Distribution;

use particlenet_decoder::{
    config::{ParticleNetDecoderConfig, UpsamplingStrategy},
    ParticleNetDecoder,
};

type MyBackend = NdArray;

/// Output directory for generated files.
const OUTPUT_DIR: &str = "output";

/// Number of jets decoded in the demo batch.
const NUM_JETS: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let device = burn::backend::ndarray::NdArrayDevice::Cpu;

    println!("═══════════════════════════════════════════════════════════════");
    println!("          ParticleNet Jet Decoder");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    // =========================================================================
    // Step 1: Configuration
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Loading Configuration                              │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("  Source:          {}", path);
            ParticleNetDecoderConfig::load(&path)
                .map_err(|e| format!("failed to load {}: {:?}", path, e))?
        }
        None => {
            println!("  Source:          built-in defaults");
            ParticleNetDecoderConfig::new(32, 30)
        }
    };

    println!("  Encoded dim:     {}", config.encoded_dim);
    println!("  Particles:       {}", config.num_particles);
    println!("  Output dim:      {}", config.output_dim);
    println!("  Hidden dim:      {}", config.hidden_dim);
    println!("  Neighbours (k):  {}", config.k);
    println!("  Normalization:   {:?}", config.normalization);
    println!();

    // =========================================================================
    // Step 2: Build both variants
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Building Decoders                                  │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let decoders: Vec<ParticleNetDecoder<MyBackend>> =
        [UpsamplingStrategy::Particle, UpsamplingStrategy::Feature]
            .into_iter()
            .map(|strategy| config.clone().with_strategy(strategy).init(&device))
            .collect::<Result<_, _>>()?;

    for decoder in &decoders {
        println!(
            "  {:<9} params: {}",
            format!("{:?}", decoder.strategy()),
            decoder.num_params()
        );
    }
    println!();

    // =========================================================================
    // Step 3: Decode synthetic jets
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Decoding {} Jets                                    │", NUM_JETS);
    println!("└─────────────────────────────────────────────────────────────┘");

    let encoded: Tensor<MyBackend, 2> =
        Tensor::random([NUM_JETS, config.encoded_dim], Distribution::Normal(0.0, 1.0), &device);

    for decoder in &decoders {
        let particles = decoder.try_forward(encoded.clone())?;
        let [batch, n, d] = particles.dims();

        let values: Vec<f32> = particles.clone().to_data().to_vec().unwrap_or_default();
        let mean = values.iter().sum::<f32>() / values.len().max(1) as f32;
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        println!("  {:?}:", decoder.strategy());
        println!("    Output shape:  [{}, {}, {}]", batch, n, d);
        println!("    Mean feature:  {:.5}", mean);
        println!("    Max feature:   {:.5}", max);
    }
    println!();

    // =========================================================================
    // Step 4: Save configuration
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 4: Saving Configuration                               │");
    println!("└─────────────────────────────────────────────────────────────┘");

    if let Err(e) = fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("Warning: Could not create output directory: {}", e);
    }
    let config_path = Path::new(OUTPUT_DIR).join("decoder_config.json");
    config.save(&config_path)?;
    println!("  Saved:           {}", config_path.display());

    Ok(())
}
