//! k-nearest-neighbour graph construction in feature space.

use burn::prelude::*;

/// Number of neighbours actually used for a set of `num_points` points.
///
/// A point is never its own neighbour unless it is alone, in which case it
/// gets a single self loop.
pub fn neighbour_count(num_points: usize, k: usize) -> usize {
    if num_points <= 1 {
        1
    } else {
        k.min(num_points - 1)
    }
}

/// Squared euclidean distances between every pair of points.
///
/// Input shape: [batch, num_points, channels]
/// Output shape: [batch, num_points, num_points]
pub fn pairwise_distances<B: Backend>(x: Tensor<B, 3>) -> Tensor<B, 3> {
    let [_, num_points, _] = x.dims();

    // |xi|^2 + |xj|^2 - 2 xi.xj
    let inner = x.clone().matmul(x.clone().swap_dims(1, 2));
    let sq: Tensor<B, 3> = x.powf_scalar(2.0).sum_dim(2);
    let rows = sq.clone().repeat_dim(2, num_points);
    let cols = sq.swap_dims(1, 2).repeat_dim(1, num_points);

    rows + cols - inner.mul_scalar(2.0)
}

/// Indices of the nearest neighbours of every point, excluding the point itself.
///
/// Input shape: [batch, num_points, channels]
/// Output shape: [batch, num_points, neighbour_count(num_points, k)]
pub fn knn<B: Backend>(x: Tensor<B, 3>, k: usize) -> Tensor<B, 3, Int> {
    let [batch, num_points, _] = x.dims();
    let device = x.device();

    if num_points == 1 {
        return Tensor::zeros([batch, 1, 1], &device);
    }

    let k = neighbour_count(num_points, k);
    let dist = pairwise_distances(x);

    // Push the diagonal past every real distance so self is ranked last.
    let ids = Tensor::<B, 1, Int>::arange(0..num_points as i64, &device);
    let rows = ids.clone().reshape([num_points, 1]).repeat_dim(1, num_points);
    let cols = ids.reshape([1, num_points]).repeat_dim(0, num_points);
    let diagonal: Tensor<B, 3, Bool> = rows.equal(cols).unsqueeze::<3>().repeat_dim(0, batch);
    let dist = dist.mask_fill(diagonal, f32::MAX);

    dist.argsort(2).slice([0..batch, 0..num_points, 0..k])
}

/// Collect the features of each point's neighbours.
///
/// Inputs:
/// - x: [batch, num_points, channels]
/// - indices: [batch, num_points, k], indices into the point axis of `x`
///
/// Output: [batch, num_points, k, channels]
pub fn gather_neighbours<B: Backend>(x: Tensor<B, 3>, indices: Tensor<B, 3, Int>) -> Tensor<B, 4> {
    let [batch, num_points, channels] = x.dims();
    let [_, _, k] = indices.dims();
    let device = x.device();

    // Offset each jet's indices into the flattened [batch * num_points] axis.
    let offsets = Tensor::<B, 1, Int>::arange(0..batch as i64, &device)
        .mul_scalar(num_points as i64)
        .reshape([batch, 1, 1])
        .repeat_dim(1, num_points)
        .repeat_dim(2, k);
    let flat = (indices + offsets).reshape([batch * num_points * k]);

    x.reshape([batch * num_points, channels])
        .select(0, flat)
        .reshape([batch, num_points, k, channels])
}
