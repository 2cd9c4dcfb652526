use crate::tdigest::centroids::Centroid;
use crate::tdigest::precision::FloatLike;
use crate::tdigest::scale::k_to_q;
use crate::tdigest::TDigest;

impl<F: FloatLike> TDigest<F> {
    /// Shrink the centroid list to at most `max_size` centroids.
    ///
    /// Adjacent centroids are clustered left to right; cluster `k` closes once
    /// the running weight passes `k_to_q(k, max_size) · total_weight`, so clusters
    /// near the tails stay small and clusters near the median grow large. The
    /// scale function decides the final size, which is usually well below
    /// `max_size`.
    ///
    /// No-op when the digest already holds `max_size` centroids or fewer.
    /// `max_size == 0` behaves like `1`. `count`, `sum`, `min` and `max` are
    /// never changed.
    pub fn compress(&mut self, max_size: usize) {
        let max_size = max_size.max(1);
        if self.centroids.len() <= max_size {
            return;
        }
        let n_in = self.centroids.len();
        let compressed = cluster_by_scale(&self.centroids, max_size, self.total_weight());
        crate::ttrace!(
            "compress: max_size={}, centroids_in={}, centroids_out={}",
            max_size,
            n_in,
            compressed.len()
        );
        self.centroids = compressed;
    }
}

/// One left-to-right clustering pass over sorted centroids.
///
/// Incoming mass is collected in `(pending_sum, pending_weight)` and folded
/// into the open cluster only when it closes, so each output mean is computed
/// from one division rather than a chain of running updates.
fn cluster_by_scale<F: FloatLike>(
    centroids: &[Centroid<F>],
    max_size: usize,
    total: F,
) -> Vec<Centroid<F>> {
    let d = F::from_usize(max_size);

    let mut out: Vec<Centroid<F>> = Vec::with_capacity(max_size);
    let mut iter = centroids.iter().copied();
    let Some(mut cur) = iter.next() else {
        return out;
    };

    let mut k = F::one();
    let mut ceiling = k_to_q(k, d) * total;
    let mut so_far = cur.weight();
    let (mut pending_sum, mut pending_weight) = (F::zero(), F::zero());

    for next in iter {
        so_far = so_far + next.weight();
        if so_far <= ceiling {
            pending_sum = pending_sum + next.mean() * next.weight();
            pending_weight = pending_weight + next.weight();
        } else {
            if pending_weight > F::zero() {
                cur.add(pending_sum, pending_weight);
            }
            out.push(cur);
            k = k + F::one();
            ceiling = k_to_q(k, d) * total;
            pending_sum = F::zero();
            pending_weight = F::zero();
            cur = next;
        }
    }
    if pending_weight > F::zero() {
        cur.add(pending_sum, pending_weight);
    }
    out.push(cur);

    // Rounding in the folds can leave neighbours out of order.
    out.sort();
    out
}
