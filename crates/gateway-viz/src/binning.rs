//! Histogram binning strategies

use statrs::statistics::{Data, OrderStatistics};

/// Upper bound on the automatic bin count
pub const MAX_AUTO_BINS: usize = 50;

/// One histogram bin, left edge inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub left: f64,
    /// Right edge, exclusive except for the last bin
    pub right: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Split `values` into `num_bins` equal-width bins between min and max
///
/// Non-finite values are ignored. A constant sample produces a single bin.
pub fn fixed_width_bins(values: &[f64], num_bins: usize) -> Vec<Bin> {
    let num_bins = num_bins.max(1);
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by(f64::total_cmp);

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    if (max - min).abs() < 1e-10 {
        return vec![Bin {
            left: min,
            right: max,
            count: sorted.len(),
        }];
    }

    let width = (max - min) / num_bins as f64;
    let mut bins: Vec<Bin> = (0..num_bins)
        .map(|i| Bin {
            left: min + i as f64 * width,
            // Last bin includes max
            right: if i == num_bins - 1 {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    // Single pass through the sorted data
    let mut current = 0;
    for value in sorted {
        while current < num_bins - 1 && value >= bins[current].right {
            current += 1;
        }
        bins[current].count += 1;
    }
    bins
}

/// Bin count from the Freedman-Diaconis rule, capped at [`MAX_AUTO_BINS`]
///
/// The bin width is `2 * IQR / n^(1/3)`. When the interquartile range is
/// zero the count falls back to `√n`.
pub fn freedman_diaconis_bins(values: &[f64]) -> usize {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len();
    if n < 2 {
        return 1;
    }

    let (min, max) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let iqr = Data::new(finite).interquartile_range();
    let width = 2.0 * iqr / (n as f64).cbrt();

    let bins = if width > 0.0 && width.is_finite() {
        ((max - min) / width).ceil() as usize
    } else {
        (n as f64).sqrt().ceil() as usize
    };
    bins.clamp(1, MAX_AUTO_BINS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_width_counts_every_value() {
        let ages = [12.0, 13.0, 15.0, 15.0, 16.0, 18.0, 21.0, 30.0];
        let bins = fixed_width_bins(&ages, 3);

        assert_eq!(bins.len(), 3);
        assert_relative_eq!(bins[0].left, 12.0);
        assert_relative_eq!(bins[2].right, 30.0);
        assert_relative_eq!(bins[0].width(), 6.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), ages.len());
        // [12, 18) [18, 24) [24, 30]
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![5, 2, 1]
        );
    }

    #[test]
    fn test_fixed_width_edge_cases() {
        assert!(fixed_width_bins(&[], 10).is_empty());

        let constant = fixed_width_bins(&[4.0, 4.0, 4.0], 10);
        assert_eq!(constant.len(), 1);
        assert_eq!(constant[0].count, 3);

        let zero_requested = fixed_width_bins(&[1.0, 2.0], 0);
        assert_eq!(zero_requested.len(), 1);
        assert_eq!(zero_requested[0].count, 2);
    }

    #[test]
    fn test_freedman_diaconis_is_capped() {
        // Narrow bulk plus one far outlier: small IQR, huge range
        let mut values: Vec<f64> = (0..100).map(|i| f64::from(i) / 100.0).collect();
        values.push(10_000.0);
        assert_eq!(freedman_diaconis_bins(&values), MAX_AUTO_BINS);

        let spread: Vec<f64> = (0..100).map(f64::from).collect();
        let bins = freedman_diaconis_bins(&spread);
        assert!(bins > 1 && bins <= MAX_AUTO_BINS, "got {bins}");
    }

    #[test]
    fn test_freedman_diaconis_small_samples() {
        assert_eq!(freedman_diaconis_bins(&[]), 1);
        assert_eq!(freedman_diaconis_bins(&[3.0]), 1);
        // Zero IQR falls back to sqrt(n)
        assert_eq!(freedman_diaconis_bins(&[2.0; 16]), 4);
    }
}
