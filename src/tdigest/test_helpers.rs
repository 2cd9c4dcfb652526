//! Assertion helpers shared by unit tests, integration tests and benches.

use crate::tdigest::centroids::is_sorted_by_mean;
use crate::tdigest::precision::FloatLike;
use crate::tdigest::TDigest;

pub fn assert_exact<F: FloatLike>(label: &str, expected: F, got: F) {
    assert!(
        expected == got,
        "{}: expected exactly {:.9}, got {:.9}",
        label,
        expected,
        got
    );
}

pub fn assert_monotone_chain<F: FloatLike>(label: &str, values: &[F]) {
    for i in 1..values.len() {
        assert!(
            values[i] >= values[i - 1],
            "{}: non-monotone at i={}: {} < {}",
            label,
            i,
            values[i],
            values[i - 1]
        );
    }
}

pub fn assert_sorted_centroids<F: FloatLike>(label: &str, td: &TDigest<F>) {
    let cs = td.centroids();
    if let Some(i) = (1..cs.len()).find(|&i| cs[i].mean() < cs[i - 1].mean()) {
        panic!(
            "{}: centroids out of order at i={}: {} < {}",
            label,
            i,
            cs[i].mean(),
            cs[i - 1].mean()
        );
    }
    debug_assert!(is_sorted_by_mean(cs));
}

/// Bit-level equality of every field, centroid by centroid.
pub fn assert_bit_identical(label: &str, a: &TDigest<f32>, b: &TDigest<f32>) {
    assert_eq!(a.count(), b.count(), "{label}: count");
    assert_eq!(a.sum().to_bits(), b.sum().to_bits(), "{label}: sum");
    assert_eq!(a.min().to_bits(), b.min().to_bits(), "{label}: min");
    assert_eq!(a.max().to_bits(), b.max().to_bits(), "{label}: max");
    assert_eq!(
        a.centroids().len(),
        b.centroids().len(),
        "{label}: centroid count"
    );
    for (i, (x, y)) in a.centroids().iter().zip(b.centroids()).enumerate() {
        assert_eq!(
            (x.mean().to_bits(), x.weight().to_bits()),
            (y.mean().to_bits(), y.weight().to_bits()),
            "{label}: centroid {i}"
        );
    }
}

/// Fraction of `sorted` strictly below `value` (lower-bound rank).
pub fn rank_of(sorted: &[f64], value: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let idx = sorted.partition_point(|&x| x < value);
    idx as f64 / sorted.len() as f64
}
