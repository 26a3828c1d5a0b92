use rayon::prelude::*;

use cspace_image::Image;

/// Controls how per-pixel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,
}

/// Apply a function to each pixel in the image, processing rows in parallel.
///
/// `f` receives the source pixel and the destination pixel at the same position, each as a
/// slice of the respective image's channel count. Both images must have the same size.
pub fn par_iter_rows<T1, T2>(
    src: &Image<T1>,
    dst: &mut Image<T2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    iter_rows_with(ExecutionStrategy::ParallelRows, src, dst, f);
}

/// Apply a function to each pixel in the image with the given strategy.
pub fn iter_rows_with<T1, T2>(
    strategy: ExecutionStrategy,
    src: &Image<T1>,
    dst: &mut Image<T2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    // chunking by a zero stride panics
    if src.is_empty() {
        return;
    }

    let (c1, c2) = (src.num_channels(), dst.num_channels());
    let cols = src.cols();

    let process_row = |(src_chunk, dst_chunk): (&[T1], &mut [T2])| {
        src_chunk
            .chunks_exact(c1)
            .zip(dst_chunk.chunks_exact_mut(c2))
            .for_each(|(src_pixel, dst_pixel)| {
                f(src_pixel, dst_pixel);
            });
    };

    match strategy {
        ExecutionStrategy::ParallelRows => {
            src.as_slice()
                .par_chunks_exact(c1 * cols)
                .zip(dst.as_slice_mut().par_chunks_exact_mut(c2 * cols))
                .for_each(process_row);
        }
        ExecutionStrategy::Serial => {
            src.as_slice()
                .chunks_exact(c1 * cols)
                .zip(dst.as_slice_mut().chunks_exact_mut(c2 * cols))
                .for_each(process_row);
        }
    }
}
