//! Provides the [`Classifier`] trait.
use crate::Sample;


/// A trait that defines the behavior of a multiclass classifier.
/// You only need to implement `predict` method.
pub trait Classifier {
    /// Predicts the class id of the `row`-th example of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> usize;


    /// Predicts the class ids of all the examples in `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<usize> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }


    /// Returns the fraction of the examples
    /// whose prediction equals the target.
    /// Returns `0.0` for an empty sample.
    fn accuracy(&self, sample: &Sample) -> f64 {
        let n_sample = sample.shape().0;
        if n_sample == 0 { return 0f64; }

        let correct = self.predict_all(sample)
            .into_iter()
            .enumerate()
            .filter(|&(row, p)| p == sample.class_at(row))
            .count();
        correct as f64 / n_sample as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;

    struct Constant(usize);

    impl Classifier for Constant {
        fn predict(&self, _sample: &Sample, _row: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn test_accuracy_01() {
        let sample = Sample::from_columns(
            vec![Feature::from_vals("x", vec![0.0, 1.0, 2.0, 3.0])],
            vec![1.0, 1.0, 0.0, 1.0],
        ).unwrap();
        let res = Constant(1).accuracy(&sample);
        let exp = 0.75;
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_accuracy_empty() {
        let sample = Sample::from_columns(
            vec![Feature::from_vals("x", vec![])],
            vec![],
        ).unwrap();
        let res = Constant(0).accuracy(&sample);
        assert_eq!(0.0, res, "expected 0.0, got {res:?}.");
    }
}
