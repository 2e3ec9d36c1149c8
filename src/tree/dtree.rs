use crate::Sample;
use super::{
    node::{Tree, TreeNode},
    split_by::SplitBy,
};

use std::fmt;

/// The Decision Tree algorithm.  
/// Given a set of training examples for multiclass classification,
/// [`DecisionTree`] grows a binary [`Tree`] greedily from the root
/// under the specified parameters.
///
/// The code is based on the book:  
/// [Classification and Regression Trees](https://www.amazon.com/Classification-Regression-Wadsworth-Statistics-Probability/dp/0412048418)
/// by Leo Breiman, Jerome H. Friedman, Richard A. Olshen, and Charles J. Stone.
///
/// [`DecisionTree`] is constructed 
/// by [`DecisionTreeBuilder`](crate::DecisionTreeBuilder).
/// 
/// # Example
/// ```no_run
/// use treerules::{
///     Classifier,
///     DecisionTreeBuilder,
///     datasets,
/// };
/// 
/// let sample = datasets::iris().unwrap();
/// let (train, test) = sample.train_test_split(0.25, 42);
/// 
/// let tree = DecisionTreeBuilder::new(&train)
///     .max_depth(3)
///     .build()
///     .fit(&train);
/// 
/// let accuracy = tree.accuracy(&test);
/// println!("accuracy (test) is: {accuracy}");
/// ```
pub struct DecisionTree {
    n_classes:         usize,
    max_depth:         usize,
    min_samples_split: usize,
    split_by:          SplitBy,
}

impl DecisionTree {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn new(
        n_classes:         usize,
        max_depth:         usize,
        min_samples_split: usize,
        split_by:          SplitBy,
    ) -> Self
    {
        Self { n_classes, max_depth, min_samples_split, split_by, }
    }

    /// Returns the name of this learner.
    pub fn name(&self) -> &str {
        "Decision Tree"
    }

    /// Returns the parameters of this learner.
    pub fn info(&self) -> Vec<(&str, String)> {
        Vec::from([
            ("Max depth", format!("{}", self.max_depth)),
            ("Min samples split", format!("{}", self.min_samples_split)),
            ("Split by", format!("{}", self.split_by)),
        ])
    }

    /// Fit a tree on all the examples of `sample`.
    /// Panics if `sample` has no example.
    pub fn fit(&self, sample: &Sample) -> Tree {
        let n_sample = sample.shape().0;
        assert_ne!(n_sample, 0, "Cannot fit a tree on an empty sample");

        let n_classes = self.n_classes.max(sample.n_classes());
        let indices = (0..n_sample).collect::<Vec<usize>>();

        let mut nodes = Vec::new();
        self.grow(sample, indices, self.max_depth, n_classes, &mut nodes);

        Tree::from(nodes)
    }

    /// Grow the subtree for the examples `indices`
    /// and returns the index of its root in `nodes`.
    /// Nodes are pushed in pre-order.
    fn grow(
        &self,
        sample:    &Sample,
        indices:   Vec<usize>,
        depth:     usize,
        n_classes: usize,
        nodes:     &mut Vec<TreeNode>,
    ) -> usize
    {
        let id = nodes.len();
        let value = class_counts(sample, &indices[..], n_classes);
        nodes.push(TreeNode::leaf(value.clone()));

        let is_pure = value.iter().filter(|&&c| c > 0f64).count() <= 1;
        if is_pure || depth == 0 || indices.len() < self.min_samples_split {
            return id;
        }

        // Find the best pair of feature and threshold
        // based on the `split_by`.
        let Some((feature, threshold)) = self.split_by.best_split(
            sample, &indices[..], n_classes
        ) else {
            return id;
        };

        // Split the train data for left/right childrens
        let column = &sample.features()[feature];
        let (lindices, rindices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| column[i] <= threshold);

        // If the split has no meaning, keep the leaf.
        if lindices.is_empty() || rindices.is_empty() {
            return id;
        }

        let left  = self.grow(sample, lindices, depth - 1, n_classes, nodes);
        let right = self.grow(sample, rindices, depth - 1, n_classes, nodes);

        nodes[id] = TreeNode::branch(feature, threshold, left, right, value);
        id
    }
}

/// Count the examples `indices` per class.
fn class_counts(sample: &Sample, indices: &[usize], n_classes: usize)
    -> Vec<f64>
{
    let mut counts = vec![0f64; n_classes];
    for &i in indices {
        counts[sample.class_at(i)] += 1f64;
    }
    counts
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Decision Tree\n\n\
            - Max depth: {}\n\
            - Min samples split: {}\n\
            - Split by: {}\n\
            ----------\
            ",
            self.max_depth,
            self.min_samples_split,
            self.split_by,
        )
    }
}
