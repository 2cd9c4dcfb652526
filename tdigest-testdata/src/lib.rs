//! tdigest-testdata
//! Synthetic sample streams shared by benches and tests. The digest itself
//! never samples distributions; everything random lives here.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Available synthetic distributions.
#[derive(Clone, Copy, Debug)]
pub enum DistKind {
    /// Uniform in \[0, scale)
    Uniform { scale: f64 },
    /// `ln(u·e + 1) + 100·mode` for `u` uniform in \[0,1) and `mode` uniform in
    /// `0..modes`: narrow, left-skewed humps spaced 100 apart.
    LogModes { modes: u32 },
    /// `N(100·(mode+1), 25²)` for `mode` uniform in `0..modes`.
    NormalModes { modes: u32 },
}

/// Generate `n` samples for the chosen distribution.
pub fn gen_dataset(kind: DistKind, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);

    match kind {
        DistKind::Uniform { scale } => {
            for _ in 0..n {
                out.push(rng.random::<f64>() * scale);
            }
        }
        DistKind::LogModes { modes } => {
            let modes = modes.max(1);
            for _ in 0..n {
                let mode = rng.random_range(0..modes) as f64;
                let u: f64 = rng.random();
                out.push((u * std::f64::consts::E + 1.0).ln() + 100.0 * mode);
            }
        }
        DistKind::NormalModes { modes } => {
            let modes = modes.max(1);
            let normal = Normal::new(0.0, 1.0).unwrap();
            for _ in 0..n {
                let mode = rng.random_range(0..modes) as f64;
                let z: f64 = normal.sample(&mut rng);
                out.push(z * 25.0 + 100.0 * (mode + 1.0));
            }
        }
    }
    out
}

/// Same stream narrowed to `f32`, for 32-bit digests.
pub fn gen_dataset_f32(kind: DistKind, n: usize, seed: u64) -> Vec<f32> {
    gen_dataset(kind, n, seed)
        .into_iter()
        .map(|x| x as f32)
        .collect()
}

/// The integers `1..=n` in a seeded random order.
pub fn shuffled_range(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out: Vec<f32> = (1..=n).map(|i| i as f32).collect();
    out.shuffle(&mut rng);
    out
}
