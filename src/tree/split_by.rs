use rayon::prelude::*;

use std::fmt;
use std::str::FromStr;
use std::cmp::Ordering;

use crate::{Feature, Sample};

/// Score for a splitting.
/// This is just a wrapper for `f64`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug)]
struct Score(f64);

impl From<f64> for Score {
    #[inline(always)]
    fn from(score: f64) -> Self {
        Self(score)
    }
}

impl PartialEq for Score {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl PartialOrd for Score {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Splitting criteria for growing decision tree.
/// Both criteria are impurities, so that smaller is better.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SplitBy {
    /// Gini index.
    #[default]
    Gini,
    /// Entropy (in bits).
    Entropy,
}

impl fmt::Display for SplitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gini => "Gini index",
            Self::Entropy => "Entropy",
        };

        write!(f, "{name}")
    }
}

impl FromStr for SplitBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gini" => Ok(Self::Gini),
            "entropy" => Ok(Self::Entropy),
            _ => Err(format!(
                "unknown split criterion `{s}`. expected `gini` or `entropy`"
            )),
        }
    }
}

impl SplitBy {
    /// Impurity of a node whose class counts are `counts`
    /// and whose total count is `total`.
    pub fn impurity(&self, counts: &[f64], total: f64) -> f64 {
        if total <= 0f64 { return 0f64; }
        match self {
            Self::Gini => {
                1f64 - counts.iter()
                    .map(|&c| (c / total).powi(2))
                    .sum::<f64>()
            },
            Self::Entropy => {
                counts.iter()
                    .filter(|&&c| c > 0f64)
                    .map(|&c| {
                        let p = c / total;
                        -p * p.log2()
                    })
                    .sum::<f64>()
            },
        }
    }

    /// Returns the best pair of feature index and threshold
    /// over the examples `idx`,
    /// or `None` if no feature separates them.
    /// Features are scored in parallel.
    /// Ties go to the lowest feature index, then to the lowest threshold.
    pub(super) fn best_split(
        &self,
        sample:    &Sample,
        idx:       &[usize],
        n_classes: usize,
    ) -> Option<(usize, f64)>
    {
        let target = sample.target();
        let candidates = sample.features()
            .par_iter()
            .enumerate()
            .map(|(k, feature)| {
                self.best_threshold(feature, target, idx, n_classes)
                    .map(|(threshold, score)| (score, k, threshold))
            })
            .collect::<Vec<_>>();

        candidates.into_iter()
            .flatten()
            .fold(None::<(Score, usize, f64)>, |best, cand| match best {
                Some(b) if b.0 <= cand.0 => Some(b),
                _ => Some(cand),
            })
            .map(|(_, k, threshold)| (k, threshold))
    }

    /// Sweep the sorted values of `feature`
    /// and returns the threshold that minimizes
    /// the weighted impurity of the two children.
    /// Thresholds are midpoints of consecutive distinct values.
    fn best_threshold(
        &self,
        feature:   &Feature,
        target:    &[f64],
        idx:       &[usize],
        n_classes: usize,
    ) -> Option<(f64, Score)>
    {
        let mut pairs = idx.iter()
            .map(|&i| (feature[i], target[i] as usize))
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total = pairs.len() as f64;
        let mut left = vec![0f64; n_classes];
        let mut right = vec![0f64; n_classes];
        pairs.iter().for_each(|&(_, y)| { right[y] += 1f64; });

        let mut best: Option<(f64, Score)> = None;
        for (w, window) in pairs.windows(2).enumerate() {
            let (x, y) = window[0];
            let next = window[1].0;
            left[y] += 1f64;
            right[y] -= 1f64;

            // No threshold separates equal values.
            if next <= x { continue; }

            let n_left = (w + 1) as f64;
            let n_right = total - n_left;
            let score = Score::from(
                (n_left * self.impurity(&left, n_left)
                    + n_right * self.impurity(&right, n_right))
                / total
            );

            if best.map_or(true, |(_, s)| score < s) {
                let mut threshold = (x + next) / 2f64;
                // `x <= threshold < next` must hold.
                if threshold >= next { threshold = x; }
                best = Some((threshold, score));
            }
        }
        best
    }
}
