use crate::{
    Sample,
    constants::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_SPLIT},
};
use super::{
    dtree::DecisionTree,
    split_by::SplitBy,
};

/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
/// 
/// # Example
/// 
/// ```no_run
/// use treerules::{
///     DecisionTreeBuilder,
///     SampleReader,
///     SplitBy,
/// };
/// let file = "/path/to/data/file.csv";
/// let sample = SampleReader::new()
///     .file(file)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// let tree = DecisionTreeBuilder::new(&sample)
///     .max_depth(3)
///     .split_by(SplitBy::Gini)
///     .build()
///     .fit(&sample);
/// ```
#[derive(Clone)]
pub struct DecisionTreeBuilder {
    n_classes: usize,
    max_depth: usize,
    min_samples_split: usize,
    split_by: SplitBy,
}

impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// max_depth: DEFAULT_MAX_DEPTH == 3,
    /// min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT == 2,
    /// split_by: SplitBy::Gini,
    /// ```
    /// The number of classes is read from the target of `sample`.
    pub fn new(sample: &Sample) -> Self {
        Self {
            n_classes: sample.n_classes(),
            max_depth: DEFAULT_MAX_DEPTH,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            split_by: SplitBy::default(),
        }
    }

    /// Specify the maximal depth of the tree.
    /// Default maximal depth is `3`.
    pub fn max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "Tree must have positive depth");
        self.max_depth = depth;

        self
    }

    /// A node with fewer examples than `n` is not split.
    /// Default value is `2`.
    pub fn min_samples_split(mut self, n: usize) -> Self {
        assert!(n >= 2, "A split needs at least 2 examples. got {n}.");
        self.min_samples_split = n;

        self
    }

    /// Set the node splitting rule.
    /// Default value is `SplitBy::Gini`.
    /// See [`SplitBy`] for other rules.
    #[inline]
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.split_by = split_by;
        self
    }

    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        DecisionTree::new(
            self.n_classes,
            self.max_depth,
            self.min_samples_split,
            self.split_by,
        )
    }
}
