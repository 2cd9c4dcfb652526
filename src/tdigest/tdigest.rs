// src/tdigest/tdigest.rs
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::tdigest::centroids::Centroid;
use crate::tdigest::precision::{FloatLike, Precision};
use crate::{TdError, TdResult};

/// Streaming quantile digest, generic over float storage `F` (`f32` or `f64`).
///
/// - `centroids` stay sorted ascending by mean at every public boundary.
/// - `count` is the number of inserted items (one per `insert`, whatever its
///   weight); `sum`, `min` and `max` track the raw inserted values and are never
///   touched by compression.
/// - No internal locking: mutation needs `&mut self`. Parallel producers each
///   own a digest and a single combiner merges them afterwards.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TDigest<F: FloatLike> {
    pub(super) centroids: Vec<Centroid<F>>,
    pub(super) count: u64,
    pub(super) sum: F,
    pub(super) min: OrderedFloat<F>,
    pub(super) max: OrderedFloat<F>,
}

pub type TDigestF64 = TDigest<f64>;
pub type TDigestF32 = TDigest<f32>;

impl<F: FloatLike> Default for TDigest<F> {
    fn default() -> Self {
        Self {
            centroids: Vec::new(),
            count: 0,
            sum: F::zero(),
            min: OrderedFloat(F::zero()),
            max: OrderedFloat(F::zero()),
        }
    }
}

/* =============================================================================
 * Builder
 * ============================================================================= */

/// Data-level stats for seeding a digest (count/∑x/min/max of the **raw data**,
/// not of the centroids).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigestStats<F: FloatLike> {
    /// Number of inserted items.
    pub count: u64,
    /// Sum of raw data values (∑x), not sum of centroid means.
    pub sum: F,
    /// Minimum observed raw value.
    pub min: F,
    /// Maximum observed raw value.
    pub max: F,
}

/// Builder for [`TDigest<F>`].
///
/// Use the builder when you want to:
/// - pre-size an empty digest for a known number of inserts, or
/// - seed a digest with *existing centroids* and *data-level stats* (e.g. when
///   a digest was persisted in some other container).
#[derive(Debug, Clone)]
pub struct TDigestBuilder<F: FloatLike> {
    capacity: usize,
    seed: Option<(Vec<Centroid<F>>, DigestStats<F>)>,
}

impl<F: FloatLike> Default for TDigestBuilder<F> {
    fn default() -> Self {
        Self {
            capacity: 0,
            seed: None,
        }
    }
}

impl<F: FloatLike> TDigestBuilder<F> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `n` centroids up front.
    #[inline]
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    /// Seed with centroids + data-level stats. Centroids may arrive in any
    /// order; `build` sorts them by mean.
    pub fn with_centroids_and_stats(
        mut self,
        centroids: Vec<Centroid<F>>,
        stats: DigestStats<F>,
    ) -> Self {
        self.seed = Some((centroids, stats));
        self
    }

    pub fn build(self) -> TDigest<F> {
        match self.seed {
            Some((mut centroids, stats)) => {
                centroids.sort();
                centroids.reserve(self.capacity.saturating_sub(centroids.len()));
                TDigest {
                    centroids,
                    count: stats.count,
                    sum: stats.sum,
                    min: OrderedFloat(stats.min),
                    max: OrderedFloat(stats.max),
                }
            }
            None => TDigest {
                centroids: Vec::with_capacity(self.capacity),
                ..TDigest::default()
            },
        }
    }
}

/* =============================================================================
 * Digest
 * ============================================================================= */

#[inline]
fn ensure_finite_value<F: FloatLike>(value: F, context: &'static str) -> TdResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TdError::NonFiniteInput { context })
    }
}

#[inline]
fn ensure_positive_weight<F: FloatLike>(weight: F) -> TdResult<()> {
    if weight.is_finite() && weight > F::zero() {
        Ok(())
    } else {
        Err(TdError::InvalidWeight {
            context: "sample weight",
        })
    }
}

impl<F: FloatLike> TDigest<F> {
    /// An empty digest.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry point for fluent construction.
    #[inline]
    pub fn builder() -> TDigestBuilder<F> {
        TDigestBuilder::default()
    }

    /// Report the precision implied by the type parameter.
    #[inline]
    pub fn precision(&self) -> Precision {
        F::PRECISION
    }

    #[inline]
    pub fn centroids(&self) -> &[Centroid<F>] {
        &self.centroids
    }

    /// Number of inserted items (merged digests contribute their own counts).
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of raw inserted values (∑x).
    #[inline]
    pub fn sum(&self) -> F {
        self.sum
    }

    #[inline]
    pub fn min(&self) -> F {
        self.min.into_inner()
    }

    #[inline]
    pub fn max(&self) -> F {
        self.max.into_inner()
    }

    /// Sum of centroid weights, accumulated left to right. Equal to `count`
    /// when every sample was inserted with weight 1.
    #[inline]
    pub fn total_weight(&self) -> F {
        self.centroids
            .iter()
            .fold(F::zero(), |acc, c| acc + c.weight())
    }

    /// Arithmetic mean of the inserted values (`∑x / count`); `0` when empty.
    #[inline]
    pub fn mean(&self) -> F {
        if self.count == 0 {
            F::zero()
        } else {
            self.sum / F::from_u64(self.count)
        }
    }

    /// True until the first sample is inserted or merged in.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.centroids.is_empty()
    }

    /// Data-level stats snapshot (count/sum/min/max).
    #[inline]
    pub fn stats(&self) -> DigestStats<F> {
        DigestStats {
            count: self.count,
            sum: self.sum,
            min: self.min(),
            max: self.max(),
        }
    }

    /// Reset to the empty state, keeping the centroid allocation.
    pub fn clear(&mut self) {
        self.centroids.clear();
        self.count = 0;
        self.sum = F::zero();
        self.min = OrderedFloat(F::zero());
        self.max = OrderedFloat(F::zero());
    }

    /// Insert one weighted sample without compressing.
    ///
    /// The sample becomes its own centroid at the sorted position for its
    /// value (after any centroids with an equal mean). Nothing is folded, so
    /// insertion never loses precision; call [`TDigest::compress`] to shrink.
    ///
    /// Errors (digest unchanged):
    /// - [`TdError::NonFiniteInput`] for NaN/±inf `value`,
    /// - [`TdError::InvalidWeight`] for non-finite or non-positive `weight`.
    pub fn insert(&mut self, value: F, weight: F) -> TdResult<()> {
        ensure_finite_value(value, "sample value")?;
        ensure_positive_weight(weight)?;
        self.insert_unchecked(value, weight);
        Ok(())
    }

    /// Insert a batch of unit-weight samples. The whole batch is validated
    /// first; on error nothing is inserted.
    pub fn insert_many(&mut self, values: &[F]) -> TdResult<()> {
        for &v in values {
            ensure_finite_value(v, "sample value")?;
        }
        self.centroids.reserve(values.len());
        for &v in values {
            self.insert_unchecked(v, F::one());
        }
        Ok(())
    }

    fn insert_unchecked(&mut self, value: F, weight: F) {
        let v = OrderedFloat(value);
        if self.count == 0 {
            self.min = v;
            self.max = v;
        }
        self.sum = self.sum + value;
        self.count += 1;
        self.max = std::cmp::max(self.max, v);
        self.min = std::cmp::min(self.min, v);

        let idx = self.centroids.partition_point(|c| c.mean() <= value);
        self.centroids.insert(idx, Centroid::new(value, weight));
    }

    /// Multiply every value the digest represents by `factor`: centroid means,
    /// `sum`, `min` and `max`. Weights and `count` are unchanged, so each
    /// quantile scales by the same factor.
    ///
    /// `factor` must be finite and > 0 so the ordering of centroids survives.
    pub fn scale_values(&mut self, factor: F) -> TdResult<()> {
        if !factor.is_finite() || factor <= F::zero() {
            return Err(TdError::InvalidScaleFactor {
                context: "scale_values",
            });
        }
        for c in &mut self.centroids {
            c.scale_mean(factor);
        }
        self.sum = self.sum * factor;
        self.min = OrderedFloat(self.min() * factor);
        self.max = OrderedFloat(self.max() * factor);
        Ok(())
    }
}
