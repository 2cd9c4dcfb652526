pub mod centroids;
pub mod precision;
pub mod scale;
pub mod test_helpers;
pub mod wire;

// Internal building blocks
mod tdigest;
mod compressor;
mod merges;
mod quantile;

// Public surface
pub use centroids::Centroid;
pub use precision::{FloatLike, Precision};
pub use tdigest::{DigestStats, TDigest, TDigestBuilder, TDigestF32, TDigestF64};
pub use wire::{WireError, WireResult};
