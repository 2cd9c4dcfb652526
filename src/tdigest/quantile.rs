//! Quantile evaluation for `TDigest`.
//!
//! - **Rank mapping**: `q ∈ (0,1)` maps to a target position `rank = q·W`,
//!   where `W` is the total centroid weight (`count` under unit weights).
//! - **Locate**: walk cumulative centroid weight from the nearer end (from the
//!   right for `q > 0.5`, from the left otherwise) to find the centroid that
//!   holds `rank`, remembering the cumulative weight `t` at its left edge.
//! - **Interpolate**: move away from that centroid's mean by
//!   `((rank − t)/w − 0.5)·delta`, where `delta` is the local spacing of
//!   neighbouring means, then clamp into the centroid's own band: from the
//!   midpoint with its left neighbour to the midpoint with its right
//!   neighbour (digest `min`/`max` at the two ends). Adjacent bands only
//!   touch, which keeps the result monotone in `q`.
//!
//! # Edge cases
//! - **Empty digest** → `0`. Check [`TDigest::is_empty`] before trusting it.
//! - `q ≤ 0` → `min()`, `q ≥ 1` → `max()`.
//! - **NaN `q`** → NaN.
//! - Single centroid → its mean clamped into `[min, max]`.

use crate::tdigest::precision::FloatLike;
use crate::tdigest::scale::clamp;
use crate::tdigest::TDigest;

impl<F: FloatLike> TDigest<F> {
    /// Estimate the value below which a fraction `q` of the samples falls.
    pub fn quantile(&self, q: F) -> F {
        if q.is_nan() {
            return q;
        }
        if self.centroids.is_empty() {
            return F::zero();
        }
        if q <= F::zero() {
            return self.min();
        }
        if q >= F::one() {
            return self.max();
        }

        let half = F::from_f64(0.5);
        let total = self.total_weight();
        let rank = q * total;

        let (pos, t) = if q > half {
            self.locate_from_right(rank, total)
        } else {
            self.locate_from_left(rank)
        };

        let (delta, lo, hi) = self.interpolation_bracket(pos);
        let c = self.centroids[pos];
        let value = c.mean() + ((rank - t) / c.weight() - half) * delta;
        clamp(value, lo, hi)
    }

    /// Median estimate, `quantile(0.5)`.
    #[inline]
    pub fn median(&self) -> F {
        self.quantile(F::from_f64(0.5))
    }

    /// Evaluate several quantiles at once.
    pub fn quantiles(&self, qs: &[F]) -> Vec<F> {
        qs.iter().map(|&q| self.quantile(q)).collect()
    }

    /// Right-to-left walk: first centroid (from the right) whose left edge
    /// `t` is at or below `rank`. Returns `(index, t)`.
    fn locate_from_right(&self, rank: F, total: F) -> (usize, F) {
        let mut t = total;
        for (i, c) in self.centroids.iter().enumerate().rev() {
            t = t - c.weight();
            if rank >= t {
                return (i, t);
            }
        }
        (0, t)
    }

    /// Left-to-right walk: first centroid whose right edge lies past `rank`.
    /// Returns `(index, t)` with `t` the weight left of that centroid.
    fn locate_from_left(&self, rank: F) -> (usize, F) {
        let mut t = F::zero();
        for (i, c) in self.centroids.iter().enumerate() {
            if rank < t + c.weight() {
                return (i, t);
            }
            t = t + c.weight();
        }
        (self.centroids.len() - 1, t)
    }

    /// `(delta, lo, hi)` for interpolating around centroid `pos`.
    fn interpolation_bracket(&self, pos: usize) -> (F, F, F) {
        let cs = &self.centroids;
        let n = cs.len();
        if n == 1 {
            return (F::zero(), self.min(), self.max());
        }
        let two = F::from_f64(2.0);
        let midpoint = |a: F, b: F| a + (b - a) / two;
        let here = cs[pos].mean();
        if pos == 0 {
            let next = cs[1].mean();
            (next - here, self.min(), midpoint(here, next))
        } else if pos == n - 1 {
            let prev = cs[pos - 1].mean();
            (here - prev, midpoint(prev, here), self.max())
        } else {
            let prev = cs[pos - 1].mean();
            let next = cs[pos + 1].mean();
            ((next - prev) / two, midpoint(prev, here), midpoint(here, next))
        }
    }
}
