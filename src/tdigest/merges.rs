use crate::tdigest::precision::FloatLike;
use crate::tdigest::TDigest;

impl<F: FloatLike> TDigest<F> {
    /// Merge one digest into `self` without compressing.
    #[inline]
    pub fn merge(&mut self, other: &TDigest<F>) {
        self.merge_many(std::iter::once(other));
    }

    /// Merge any number of digests into `self` without compressing.
    ///
    /// Centroids are copied verbatim (no folding), `count` and `sum` add up,
    /// and `min`/`max` widen to cover every non-empty source. Empty sources
    /// are skipped. The combined centroid list is re-sorted once at the end,
    /// so merging nothing still leaves `self` sorted.
    ///
    /// Fan-in pattern: each worker fills a private digest, then one combiner
    /// calls `merge_many` followed by a single [`TDigest::compress`].
    pub fn merge_many<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a TDigest<F>>,
    {
        let mut sources = 0usize;
        for d in others {
            if d.count == 0 {
                continue;
            }
            self.absorb_stats(d);
            self.centroids.extend_from_slice(&d.centroids);
            sources += 1;
        }
        self.centroids.sort();
        crate::ttrace!(
            "merge: sources={}, centroids={}, count={}",
            sources,
            self.centroids.len(),
            self.count
        );
    }

    /// Consume a batch of digests and return their merge (uncompressed).
    /// An empty batch yields an empty digest.
    pub fn merge_digests(digests: Vec<TDigest<F>>) -> TDigest<F> {
        let total: usize = digests.iter().map(|d| d.centroids.len()).sum();
        let mut acc = TDigest::<F>::builder().capacity(total).build();
        for mut d in digests {
            if d.count == 0 {
                continue;
            }
            acc.absorb_stats(&d);
            acc.centroids.append(&mut d.centroids);
        }
        acc.centroids.sort();
        acc
    }

    /// Fold `other`'s count/sum/min/max into `self`. When `self` has not seen
    /// any sample yet its bounds come straight from `other`.
    fn absorb_stats(&mut self, other: &TDigest<F>) {
        if self.count == 0 {
            self.min = other.min;
            self.max = other.max;
        } else {
            self.min = std::cmp::min(self.min, other.min);
            self.max = std::cmp::max(self.max, other.max);
        }
        self.count += other.count;
        self.sum = self.sum + other.sum;
    }
}
