//! Decoder modules mapping latent jet embeddings to particle sets.

mod particlenet;

pub use particlenet::ParticleNetDecoder;
