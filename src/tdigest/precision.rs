use std::fmt::{Debug, Display};

use ordered_float::FloatCore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")] // "f32" | "f64" when serialized
pub enum Precision {
    F32,
    F64,
}

impl Precision {
    #[inline]
    pub fn is_f32(self) -> bool {
        matches!(self, Precision::F32)
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::F32 => "f32",
            Precision::F64 => "f64",
        }
    }
}

/// Float storage for centroids and digest aggregates.
///
/// All digest math runs in `Self`, so an `f32` digest rounds exactly like a
/// 32-bit reference implementation while an `f64` digest keeps the extra bits.
pub trait FloatLike: FloatCore + Default + Debug + Display + Send + Sync + 'static {
    const PRECISION: Precision;

    fn from_f64(x: f64) -> Self;

    /// Widen (or pass through) to `f64`.
    fn into_f64(self) -> f64;

    /// Narrow (or pass through) to the 32-bit wire width.
    fn into_wire(self) -> f32;

    fn from_wire(x: f32) -> Self;

    #[inline]
    fn from_usize(n: usize) -> Self {
        Self::from_f64(n as f64)
    }

    #[inline]
    fn from_u64(n: u64) -> Self {
        Self::from_f64(n as f64)
    }
}

impl FloatLike for f32 {
    const PRECISION: Precision = Precision::F32;

    #[inline]
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    #[inline]
    fn into_f64(self) -> f64 {
        self as f64
    }
    #[inline]
    fn into_wire(self) -> f32 {
        self
    }
    #[inline]
    fn from_wire(x: f32) -> Self {
        x
    }
}

impl FloatLike for f64 {
    const PRECISION: Precision = Precision::F64;

    #[inline]
    fn from_f64(x: f64) -> Self {
        x
    }
    #[inline]
    fn into_f64(self) -> f64 {
        self
    }
    #[inline]
    fn into_wire(self) -> f32 {
        self as f32
    }
    #[inline]
    fn from_wire(x: f32) -> Self {
        x as f64
    }
}
