//! Mergeable streaming quantile digest.
//!
//! A [`TDigest`](tdigest::TDigest) ingests weighted samples, keeps them as a
//! sorted list of centroids, and answers quantile queries with bounded error
//! after [`compress`](tdigest::TDigest::compress) shrinks the list to a target
//! size. Digests built independently (one per worker) are combined with
//! [`merge_many`](tdigest::TDigest::merge_many) and compressed once on the
//! combining side.
//!
//! ```
//! use tdigest_core::tdigest::TDigestF32;
//!
//! let mut d = TDigestF32::new();
//! for i in 1..=100 {
//!     d.insert(i as f32, 1.0).unwrap();
//! }
//! d.compress(100);
//! assert_eq!(d.quantile(0.5), 50.5);
//!
//! let bytes = d.to_bytes().unwrap();
//! let back = TDigestF32::from_bytes(&bytes).unwrap();
//! assert_eq!(back, d);
//! ```

mod error;
pub mod tdigest;

pub use error::{TdError, TdResult};

// Opt-in tracing (cheap unless env var set)
#[macro_export]
macro_rules! ttrace {
    ($($arg:tt)*) => {
        if std::env::var_os("TDIGEST_TRACE").is_some() {
            eprintln!($($arg)*);
        }
    }
}
