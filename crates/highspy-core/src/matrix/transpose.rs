//! Orientation conversion for compressed sparse matrices.
//!
//! Source vectors are split into chunks, each chunk scatters its entries into
//! per-target buckets, and the buckets are merged in chunk order:
//!
//! ```text
//! Source vectors [0, 1, 2, 3, 4, 5]
//!    │
//!    ├─ Chunk 0: [0, 1] ──┐
//!    ├─ Chunk 1: [2, 3] ──┼─> Scatter (sequential or rayon)
//!    └─ Chunk 2: [4, 5] ──┘
//!         │
//!         ▼
//! {target 0: [(src 0, v), (src 3, v)], target 1: [...], ...}
//!         │
//!         ▼
//! Compressed start/index/value, ordered by target then source
//! ```
//!
//! Because chunks cover ascending source ranges and are merged in order,
//! the indices within every output vector are sorted.

use std::collections::BTreeMap;
use std::ops::Range;
use std::time::Instant;

use tracing::{debug, trace};

/// Entries gathered for each target vector: (source indices, values).
type TargetEntries = BTreeMap<usize, (Vec<usize>, Vec<f64>)>;

/// Compressed arrays in the opposite orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transposed {
    pub start: Vec<usize>,
    pub index: Vec<usize>,
    pub value: Vec<f64>,
}

/// Borrowed compressed layout to be transposed.
#[derive(Clone, Copy, Debug)]
pub struct CompressedView<'a> {
    /// Number of source vectors
    pub num_vectors: usize,
    /// Dimension of each source vector (number of target vectors)
    pub num_targets: usize,
    pub start: &'a [usize],
    pub index: &'a [usize],
    pub value: &'a [f64],
}

/// Chunked transposer
pub struct MatrixTranspose {
    /// Number of work chunks to create
    chunk_count: usize,
    /// Whether to use rayon when the `parallel` feature is enabled
    use_parallel: bool,
}

impl MatrixTranspose {
    pub fn new() -> Self {
        Self {
            chunk_count: num_cpus::get(),
            use_parallel: true,
        }
    }

    pub fn with_chunk_count(mut self, count: usize) -> Self {
        self.chunk_count = count.max(1);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.use_parallel = parallel;
        self
    }

    /// Transpose `view`. The start array must already be validated.
    pub fn transpose(&self, view: CompressedView<'_>) -> Transposed {
        let started = Instant::now();

        debug!(
            component = "matrix",
            operation = "transpose",
            status = "start",
            num_vectors = view.num_vectors,
            num_targets = view.num_targets,
            chunk_count = self.chunk_count,
            use_parallel = self.use_parallel,
            "Starting matrix transpose"
        );

        let chunks = self.partition(view.num_vectors);

        let chunk_results = if self.use_parallel && cfg!(feature = "parallel") {
            #[cfg(feature = "parallel")]
            {
                self.scatter_parallel(&chunks, view)
            }
            #[cfg(not(feature = "parallel"))]
            {
                self.scatter_sequential(&chunks, view)
            }
        } else {
            self.scatter_sequential(&chunks, view)
        };

        let transposed = merge(chunk_results, view.num_targets);

        debug!(
            component = "matrix",
            operation = "transpose",
            status = "complete",
            num_nz = transposed.index.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Completed matrix transpose"
        );

        transposed
    }

    fn partition(&self, num_vectors: usize) -> Vec<Range<usize>> {
        let chunk_size = (num_vectors / self.chunk_count).max(1);
        (0..num_vectors)
            .step_by(chunk_size)
            .map(|first| first..(first + chunk_size).min(num_vectors))
            .collect()
    }

    fn scatter_sequential(
        &self,
        chunks: &[Range<usize>],
        view: CompressedView<'_>,
    ) -> Vec<TargetEntries> {
        chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| {
                trace!(
                    component = "matrix",
                    operation = "scatter_chunk",
                    chunk_id = idx,
                    chunk_size = chunk.len(),
                    "Scattering chunk sequentially"
                );
                scatter(chunk.clone(), view)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn scatter_parallel(
        &self,
        chunks: &[Range<usize>],
        view: CompressedView<'_>,
    ) -> Vec<TargetEntries> {
        use rayon::prelude::*;

        chunks
            .par_iter()
            .enumerate()
            .map(|(idx, chunk)| {
                trace!(
                    component = "matrix",
                    operation = "scatter_chunk",
                    chunk_id = idx,
                    chunk_size = chunk.len(),
                    "Scattering chunk in parallel"
                );
                scatter(chunk.clone(), view)
            })
            .collect()
    }
}

impl Default for MatrixTranspose {
    fn default() -> Self {
        Self::new()
    }
}

fn scatter(sources: Range<usize>, view: CompressedView<'_>) -> TargetEntries {
    let mut result: TargetEntries = BTreeMap::new();
    for source in sources {
        for el in view.start[source]..view.start[source + 1] {
            let entry = result
                .entry(view.index[el])
                .or_insert_with(|| (Vec::new(), Vec::new()));
            entry.0.push(source);
            entry.1.push(view.value[el]);
        }
    }
    result
}

fn merge(chunk_results: Vec<TargetEntries>, num_targets: usize) -> Transposed {
    let mut merged: TargetEntries = BTreeMap::new();
    for chunk_result in chunk_results {
        for (target, (mut sources, mut values)) in chunk_result {
            let entry = merged
                .entry(target)
                .or_insert_with(|| (Vec::new(), Vec::new()));
            entry.0.append(&mut sources);
            entry.1.append(&mut values);
        }
    }

    let mut start = Vec::with_capacity(num_targets + 1);
    let mut index = Vec::new();
    let mut value = Vec::new();
    start.push(0);
    for target in 0..num_targets {
        if let Some((sources, values)) = merged.remove(&target) {
            index.extend(sources);
            value.extend(values);
        }
        start.push(index.len());
    }
    Transposed {
        start,
        index,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // [1 0 2]
    // [0 3 0]
    // stored column-wise
    fn view() -> (Vec<usize>, Vec<usize>, Vec<f64>) {
        (vec![0, 1, 2, 3], vec![0, 1, 0], vec![1.0, 3.0, 2.0])
    }

    #[test]
    fn test_builder_with_config() {
        let builder = MatrixTranspose::new()
            .with_chunk_count(0)
            .with_parallel(false);
        assert_eq!(builder.chunk_count, 1);
        assert!(!builder.use_parallel);
    }

    #[test]
    fn test_partition_covers_all_vectors() {
        let builder = MatrixTranspose::new().with_chunk_count(3);
        let chunks = builder.partition(7);
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, 7);
        assert_eq!(chunks.first().map(|c| c.start), Some(0));
        assert_eq!(chunks.last().map(|c| c.end), Some(7));
    }

    #[test]
    fn test_transpose_small_matrix() {
        let (start, index, value) = view();
        for chunks in [1, 2, 5] {
            let result = MatrixTranspose::new()
                .with_chunk_count(chunks)
                .transpose(CompressedView {
                    num_vectors: 3,
                    num_targets: 2,
                    start: &start,
                    index: &index,
                    value: &value,
                });
            assert_eq!(result.start, vec![0, 2, 3]);
            assert_eq!(result.index, vec![0, 2, 1]);
            assert_eq!(result.value, vec![1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn test_transpose_empty_targets() {
        let result = MatrixTranspose::new().transpose(CompressedView {
            num_vectors: 0,
            num_targets: 3,
            start: &[0],
            index: &[],
            value: &[],
        });
        assert_eq!(result.start, vec![0, 0, 0, 0]);
        assert!(result.index.is_empty());
    }
}
