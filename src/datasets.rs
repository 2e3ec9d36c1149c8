//! Bundled datasets.
use std::io::BufReader;

use crate::{Sample, error::Result};

const IRIS_CSV: &str = include_str!("../data/iris.csv");

/// Names of the three iris classes, indexed by class id.
pub const IRIS_CLASSES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// The iris flower dataset: 150 examples, 4 features and 3 classes.
///
/// Feature names are
/// `sepal length (cm)`, `sepal width (cm)`,
/// `petal length (cm)` and `petal width (cm)`.
/// The target holds class ids `0, 1, 2`, see [`IRIS_CLASSES`].
pub fn iris() -> Result<Sample> {
    let reader = BufReader::new(IRIS_CSV.as_bytes());
    Sample::from_reader(reader, true)?
        .set_target("class")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iris_shape() {
        let sample = iris().unwrap();
        let res = sample.shape();
        let exp = (150, 4);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
        assert_eq!(IRIS_CLASSES.len(), sample.n_classes());
    }

    #[test]
    fn test_iris_names() {
        let sample = iris().unwrap();
        let res = sample.feature_names();
        let exp = vec![
            "sepal length (cm)",
            "sepal width (cm)",
            "petal length (cm)",
            "petal width (cm)",
        ];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_iris_class_balance() {
        let sample = iris().unwrap();
        let mut counts = [0_usize; 3];
        sample.target().iter().for_each(|&y| counts[y as usize] += 1);
        assert_eq!([50, 50, 50], counts);
    }
}
