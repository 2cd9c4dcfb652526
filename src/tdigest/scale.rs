use crate::tdigest::precision::FloatLike;

#[inline]
pub(crate) fn clamp<F: FloatLike>(v: F, lo: F, hi: F) -> F {
    if v > hi {
        hi
    } else if v < lo {
        lo
    } else {
        v
    }
}

/// Piecewise-quadratic `k → q` mapping. `d` is the scale denominator (the
/// compression target).
///
/// With `r = k/d`: `q = 2r²` for `r < 0.5`, else `q = 1 − 2(1−r)²`. The curve is
/// flat near both ends, so clusters at the tails get small weight budgets and
/// clusters near the median get large ones.
///
/// `r` is clamped into `[0, 1]`: a `k` past `d` saturates at `q = 1` instead of
/// folding back down.
#[inline]
pub fn k_to_q<F: FloatLike>(k: F, d: F) -> F {
    let two = F::from_f64(2.0);
    let half = F::from_f64(0.5);
    let r = clamp(k / d, F::zero(), F::one());
    if r >= half {
        let base = F::one() - r;
        F::one() - two * base * base
    } else {
        two * r * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(k_to_q(0.0_f64, 100.0), 0.0);
        assert_eq!(k_to_q(50.0_f64, 100.0), 0.5);
        assert_eq!(k_to_q(100.0_f64, 100.0), 1.0);
        assert_eq!(k_to_q(1.0_f32, 100.0), 0.0002);
    }

    #[test]
    fn symmetric_around_half() {
        for k in 0..=50 {
            let lo = k_to_q(k as f64, 100.0);
            let hi = k_to_q((100 - k) as f64, 100.0);
            assert!((lo + hi - 1.0).abs() < 1e-12, "k={k}: {lo} + {hi}");
        }
    }

    #[test]
    fn monotone_in_k() {
        let qs: Vec<f64> = (0..=200).map(|k| k_to_q(k as f64 / 2.0, 100.0)).collect();
        assert!(qs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn out_of_range_k_saturates() {
        assert_eq!(k_to_q(150.0_f64, 100.0), 1.0);
        assert_eq!(k_to_q(-3.0_f64, 100.0), 0.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0_f32, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0_f32, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25_f32, 0.0, 1.0), 0.25);
    }
}
