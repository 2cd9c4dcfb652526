use std::cmp::Ordering;

use byteorder::ByteOrder;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::tdigest::precision::FloatLike;
use crate::tdigest::wire::{Endianness, WireError, WireResult, CENTROID_LEN};

/// A centroid summarizes a cluster of samples as `(mean, weight)`.
///
/// Ordering is by mean only; two centroids with equal means compare equal
/// under `Ord` even when their weights differ.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Centroid<F: FloatLike> {
    mean: OrderedFloat<F>,
    weight: OrderedFloat<F>,
}

// Manual impls: a derived `Eq` would require `F: Eq`.
impl<F: FloatLike> PartialEq for Centroid<F> {
    fn eq(&self, other: &Centroid<F>) -> bool {
        self.mean == other.mean && self.weight == other.weight
    }
}
impl<F: FloatLike> Eq for Centroid<F> {}

impl<F: FloatLike> PartialOrd for Centroid<F> {
    fn partial_cmp(&self, other: &Centroid<F>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: FloatLike> Ord for Centroid<F> {
    fn cmp(&self, other: &Centroid<F>) -> Ordering {
        self.mean.cmp(&other.mean)
    }
}

impl<F: FloatLike> Centroid<F> {
    #[inline]
    pub fn new(mean: F, weight: F) -> Self {
        Centroid {
            mean: OrderedFloat(mean),
            weight: OrderedFloat(weight),
        }
    }

    #[inline]
    pub fn mean(&self) -> F {
        self.mean.into_inner()
    }
    #[inline]
    pub fn weight(&self) -> F {
        self.weight.into_inner()
    }

    /// Fold a batch `(sum, weight)` into this centroid, where `sum` is the
    /// weighted sum `Σ mean·weight` of the incoming mass.
    ///
    /// `self.weight() + weight` must be positive.
    #[inline]
    pub fn add(&mut self, sum: F, weight: F) {
        let w0 = self.weight();
        let new_sum = sum + self.mean() * w0;
        let new_w = w0 + weight;
        self.weight = OrderedFloat(new_w);
        self.mean = OrderedFloat(new_sum / new_w);
    }

    /// Multiply the mean by `factor`, keeping the weight.
    #[inline]
    pub(crate) fn scale_mean(&mut self, factor: F) {
        self.mean = OrderedFloat(self.mean() * factor);
    }

    /// Append the 8-byte record (mean bits, weight bits) to `buf`.
    pub fn append_to(&self, buf: &mut Vec<u8>) {
        let start = buf.len();
        buf.resize(start + CENTROID_LEN, 0);
        self.write_record(&mut buf[start..]);
    }

    #[inline]
    pub(crate) fn write_record(&self, out: &mut [u8]) {
        Endianness::write_f32(&mut out[..4], self.mean().into_wire());
        Endianness::write_f32(&mut out[4..CENTROID_LEN], self.weight().into_wire());
    }

    #[inline]
    pub(crate) fn read_record(record: &[u8]) -> Self {
        let mean = Endianness::read_f32(&record[..4]);
        let weight = Endianness::read_f32(&record[4..CENTROID_LEN]);
        Centroid::new(F::from_wire(mean), F::from_wire(weight))
    }

    /// Decode one record; `bytes` must be exactly 8 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> WireResult<Self> {
        if bytes.len() != CENTROID_LEN {
            return Err(WireError::InvalidLength {
                expected: CENTROID_LEN,
                found: bytes.len(),
            });
        }
        Ok(Self::read_record(bytes))
    }
}

/// Non-strictly increasing by mean (allows equal means).
#[inline]
pub fn is_sorted_by_mean<F: FloatLike>(cs: &[Centroid<F>]) -> bool {
    cs.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_folds_weighted_sum() {
        let mut c = Centroid::new(2.0_f64, 2.0);
        // incoming: 4.0 with weight 2 → sum 8
        c.add(8.0, 2.0);
        assert_eq!(c.mean(), 3.0);
        assert_eq!(c.weight(), 4.0);
    }

    #[test]
    fn add_with_zero_mass_keeps_unit_centroid() {
        let mut c = Centroid::new(1.4_f32, 1.0);
        c.add(0.0, 0.0);
        assert_eq!(c.mean(), 1.4);
        assert_eq!(c.weight(), 1.0);
    }

    #[test]
    fn ordering_uses_mean_only() {
        let a = Centroid::new(1.0_f32, 5.0);
        let b = Centroid::new(1.0_f32, 1.0);
        let c = Centroid::new(2.0_f32, 1.0);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert!(a < c);
        assert!(is_sorted_by_mean(&[a, b, c]));
        assert!(!is_sorted_by_mean(&[c, a]));
    }

    #[test]
    fn record_appends_after_existing_bytes() {
        let c = Centroid::new(4.0_f32, 5.0);
        let mut buf = vec![1u8, 2, 3];
        c.append_to(&mut buf);
        assert_eq!(&buf[..3], &[1, 2, 3]);
        assert_eq!(buf.len(), 3 + CENTROID_LEN);
        assert_eq!(&buf[3..7], &4.0_f32.to_le_bytes());
        assert_eq!(&buf[7..11], &5.0_f32.to_le_bytes());

        let back = Centroid::<f32>::from_bytes(&buf[3..]).expect("decode");
        assert_eq!(back, c);
    }

    #[test]
    fn record_requires_exact_length() {
        assert_eq!(
            Centroid::<f32>::from_bytes(&[0u8; 7]),
            Err(WireError::InvalidLength {
                expected: 8,
                found: 7
            })
        );
        assert!(Centroid::<f32>::from_bytes(&[0u8; 9]).is_err());
    }
}
