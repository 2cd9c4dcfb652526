// src/tdigest/wire.rs
//
// Binary wire codec for a single digest.
//
// Layout (little-endian, 32-bit fields):
//
//   header (20 bytes):
//      0..4  : count          (u32)
//      4..8  : sum            (f32 bits)
//      8..12 : min            (f32 bits)
//     12..16 : max            (f32 bits)
//     16..20 : centroid_count (u32)
//
//   payload: centroid_count records of 8 bytes each
//      mean (f32 bits) + weight (f32 bits)
//
// f64 digests are narrowed to f32 on encode and widened back on decode.

use std::fmt;

use byteorder::ByteOrder;
use ordered_float::OrderedFloat;

use crate::tdigest::centroids::Centroid;
use crate::tdigest::precision::FloatLike;
use crate::tdigest::TDigest;

pub(crate) use byteorder::LittleEndian as Endianness;

pub const HEADER_LEN: usize = 20;
pub const CENTROID_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// A count does not fit the 32-bit wire field.
    TooLarge { field: &'static str, value: u64 },
    /// Input ends before the header or the declared centroid records.
    Truncated { needed: usize, available: usize },
    /// A fixed-size record was handed a slice of the wrong length.
    InvalidLength { expected: usize, found: usize },
    /// Centroid record `index` has a non-finite mean or a weight that is not
    /// finite and > 0.
    InvalidCentroid { index: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use WireError::*;
        match self {
            TooLarge { field, value } => {
                write!(f, "tdigest wire: {field}={value} does not fit in u32")
            }
            Truncated { needed, available } => write!(
                f,
                "tdigest wire: truncated input (need {needed} bytes, have {available})"
            ),
            InvalidLength { expected, found } => write!(
                f,
                "tdigest wire: invalid record length (expected {expected}, found {found})"
            ),
            InvalidCentroid { index } => write!(
                f,
                "tdigest wire: centroid {index} has a non-finite mean or a non-positive weight"
            ),
        }
    }
}

impl std::error::Error for WireError {}

pub type WireResult<T> = Result<T, WireError>;

/* ============================
 * Encode
 * ============================ */

impl<F: FloatLike> TDigest<F> {
    /// Exact number of bytes [`TDigest::append_to`] will write.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + CENTROID_LEN * self.centroids.len()
    }

    /// Append the encoded digest to `buf`. Existing bytes are left untouched;
    /// on error nothing is written.
    pub fn append_to(&self, buf: &mut Vec<u8>) -> WireResult<()> {
        let count = u32::try_from(self.count).map_err(|_| WireError::TooLarge {
            field: "count",
            value: self.count,
        })?;
        let n = u32::try_from(self.centroids.len()).map_err(|_| WireError::TooLarge {
            field: "centroid_count",
            value: self.centroids.len() as u64,
        })?;

        let start = buf.len();
        buf.resize(start + self.encoded_len(), 0);
        let out = &mut buf[start..];

        Endianness::write_u32(&mut out[0..4], count);
        Endianness::write_f32(&mut out[4..8], self.sum.into_wire());
        Endianness::write_f32(&mut out[8..12], self.min().into_wire());
        Endianness::write_f32(&mut out[12..16], self.max().into_wire());
        Endianness::write_u32(&mut out[16..HEADER_LEN], n);

        for (c, record) in self
            .centroids
            .iter()
            .zip(out[HEADER_LEN..].chunks_exact_mut(CENTROID_LEN))
        {
            c.write_record(record);
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> WireResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.append_to(&mut buf)?;
        Ok(buf)
    }

    /* ============================
     * Decode
     * ============================ */

    /// Decode a digest from the front of `bytes`; trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> WireResult<Self> {
        Self::read_from(bytes).map(|(td, _rest)| td)
    }

    /// Decode a digest from the front of `bytes` and return the unread rest,
    /// so digests appended back to back can be read one after another.
    ///
    /// Every centroid must have a finite mean and a finite weight > 0. Records
    /// are re-sorted by mean, which leaves anything `append_to` wrote as is.
    pub fn read_from(bytes: &[u8]) -> WireResult<(Self, &[u8])> {
        if bytes.len() < HEADER_LEN {
            return Err(WireError::Truncated {
                needed: HEADER_LEN,
                available: bytes.len(),
            });
        }

        let count = Endianness::read_u32(&bytes[0..4]) as u64;
        let sum = F::from_wire(Endianness::read_f32(&bytes[4..8]));
        let min = F::from_wire(Endianness::read_f32(&bytes[8..12]));
        let max = F::from_wire(Endianness::read_f32(&bytes[12..16]));
        let centroid_count = Endianness::read_u32(&bytes[16..HEADER_LEN]) as usize;

        let payload_len = centroid_count
            .checked_mul(CENTROID_LEN)
            .and_then(|p| p.checked_add(HEADER_LEN));
        let end = match payload_len {
            Some(end) if end <= bytes.len() => end,
            _ => {
                return Err(WireError::Truncated {
                    needed: payload_len.unwrap_or(usize::MAX),
                    available: bytes.len(),
                })
            }
        };

        let mut centroids = Vec::with_capacity(centroid_count);
        for (index, record) in bytes[HEADER_LEN..end].chunks_exact(CENTROID_LEN).enumerate() {
            let c = Centroid::<F>::read_record(record);
            let (mean, weight) = (c.mean(), c.weight());
            if !mean.is_finite() || !weight.is_finite() || weight <= F::zero() {
                return Err(WireError::InvalidCentroid { index });
            }
            centroids.push(c);
        }
        centroids.sort();

        let td = TDigest {
            centroids,
            count,
            sum,
            min: OrderedFloat(min),
            max: OrderedFloat(max),
        };
        Ok((td, &bytes[end..]))
    }
}
