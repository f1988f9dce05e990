//! Criterion benchmarks for the decoder forward pass.

use burn::backend::NdArray;
use burn::prelude::*;
use burn::tensor::Distribution;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use particlenet_decoder::{
    config::{EdgeConvConfig, ParticleNetDecoderConfig, UpsamplingStrategy},
    nn::edgeconv::{knn::knn, EdgeConv},
    ParticleNetDecoder,
};

type BenchBackend = NdArray;

const ENCODED_DIM: usize = 32;

/// Reference-size decoder (hidden 256, k = 16, 16 output features).
fn make_decoder(
    num_particles: usize,
    strategy: UpsamplingStrategy,
) -> ParticleNetDecoder<BenchBackend> {
    let device = Default::default();
    ParticleNetDecoderConfig::new(ENCODED_DIM, num_particles)
        .with_strategy(strategy)
        .init(&device)
        .unwrap()
}

fn bench_decoder_forward(c: &mut Criterion) {
    let device = Default::default();
    let mut group = c.benchmark_group("decoder_forward");
    group.sample_size(20);

    for num_particles in [10, 30, 100] {
        let particle = make_decoder(num_particles, UpsamplingStrategy::Particle);
        let feature = make_decoder(num_particles, UpsamplingStrategy::Feature);
        let encoded: Tensor<BenchBackend, 2> =
            Tensor::random([8, ENCODED_DIM], Distribution::Default, &device);

        group.throughput(Throughput::Elements((8 * num_particles) as u64));

        group.bench_with_input(
            BenchmarkId::new("particle", num_particles),
            &encoded,
            |b, encoded| b.iter(|| black_box(particle.forward(black_box(encoded.clone())))),
        );

        group.bench_with_input(
            BenchmarkId::new("feature", num_particles),
            &encoded,
            |b, encoded| b.iter(|| black_box(feature.forward(black_box(encoded.clone())))),
        );
    }

    group.finish();
}

fn bench_edgeconv(c: &mut Criterion) {
    let device = Default::default();
    let block =
        EdgeConv::<BenchBackend>::new(&EdgeConvConfig::new(64, vec![64, 64, 16]), &device)
            .unwrap();
    let points: Tensor<BenchBackend, 3> =
        Tensor::random([8, 30, 64], Distribution::Default, &device);

    c.bench_function("knn_30_points_64_channels", |b| {
        b.iter(|| black_box(knn(black_box(points.clone()), 16)))
    });

    c.bench_function("edgeconv_30_points_64_channels", |b| {
        b.iter(|| black_box(block.forward(black_box(points.clone()))))
    });
}

criterion_group!(benches, bench_decoder_forward, bench_edgeconv);
criterion_main!(benches);
