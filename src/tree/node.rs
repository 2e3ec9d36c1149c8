//! The node-array representation of a fitted decision tree.
use serde::{Serialize, Deserialize};
use fixedbitset::FixedBitSet;

use crate::{
    Classifier,
    Sample,
    export::resolve_name,
};

use std::fmt;

/// A node of a [`Tree`].
/// Children are referenced by their index in the node array.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// A node that has two children.
    /// Examples with `x[feature] <= threshold` go to `left`.
    /// `feature == None` marks a feature reference that cannot be resolved.
    Branch {
        feature:   Option<usize>,
        threshold: f64,
        left:      usize,
        right:     usize,
        value:     Vec<f64>,
    },
    /// A node that has no child.
    Leaf {
        value: Vec<f64>,
    },
}

impl TreeNode {
    pub fn branch(
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
        value:     Vec<f64>,
    ) -> Self
    {
        Self::Branch {
            feature: Some(feature),
            threshold,
            left,
            right,
            value,
        }
    }

    pub fn leaf(value: Vec<f64>) -> Self {
        Self::Leaf { value, }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Per-class sample counts of the examples that reached this node.
    pub fn value(&self) -> &[f64] {
        match self {
            Self::Branch { value, .. } => value,
            Self::Leaf { value } => value,
        }
    }

    /// Returns the majority class of this node.
    /// See [`majority_class`].
    pub fn predicted_class(&self) -> Option<usize> {
        majority_class(self.value())
    }
}

/// Returns the index of the maximal entry of `counts`.
/// On a tie, the lowest index wins.
/// `NaN` entries never win. Returns `None` for an empty slice.
pub fn majority_class(counts: &[f64]) -> Option<usize> {
    let mut iter = counts.iter().enumerate();
    let (mut best, mut best_count) = iter.next()
        .map(|(k, &c)| (k, c))?;
    for (k, &c) in iter {
        if c > best_count || (best_count.is_nan() && !c.is_nan()) {
            best = k;
            best_count = c;
        }
    }
    Some(best)
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch { feature, threshold, left, right, value } => {
                f.debug_struct("Branch")
                    .field("feature", &feature)
                    .field("threshold", &threshold)
                    .field("left", &left)
                    .field("right", &right)
                    .field("value", &value)
                    .finish()
            },
            Self::Leaf { value } => {
                f.debug_struct("Leaf")
                    .field("value", &value)
                    .finish()
            },
        }
    }
}

/// A fitted binary decision tree.
/// The root is the node `0`.
/// Trees grown by [`DecisionTree`](crate::DecisionTree)
/// store their nodes in pre-order,
/// so that every child index exceeds the one of its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl From<Vec<TreeNode>> for Tree {
    #[inline]
    fn from(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }
}

impl Tree {
    /// Returns the node array.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes[..]
    }

    /// Returns the `id`-th node, if any.
    pub fn node(&self, id: usize) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter()
            .filter(|node| node.is_leaf())
            .count()
    }

    /// Returns the length of the longest root-to-leaf path.
    /// A single leaf has depth `0`.
    /// Dangling or revisited children are ignored.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() { return 0; }

        let mut visited = FixedBitSet::with_capacity(self.nodes.len());
        let mut stack = vec![(0_usize, 0_usize)];
        let mut depth = 0;
        while let Some((id, d)) = stack.pop() {
            if id >= self.nodes.len() || visited.put(id) { continue; }
            depth = depth.max(d);
            if let TreeNode::Branch { left, right, .. } = self.nodes[id] {
                stack.push((right, d + 1));
                stack.push((left, d + 1));
            }
        }
        depth
    }

    /// Render this tree in the Graphviz `dot` format.
    pub fn to_dot<S>(&self, feature_names: &[S]) -> String
        where S: AsRef<str>
    {
        let mut dot = String::from("graph DecisionTree {\n");
        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Branch { feature, threshold, left, right, .. } => {
                    let name = resolve_name(feature_names, *feature);
                    dot.push_str(&format!(
                        "\tnode_{id} [ label = \"{name} <= {threshold:.2} ?\" ];\n"
                    ));
                    dot.push_str(&format!(
                        "\tnode_{id} -- node_{left} [ label = \"Yes\" ];\n"
                    ));
                    dot.push_str(&format!(
                        "\tnode_{id} -- node_{right} [ label = \"No\" ];\n"
                    ));
                },
                TreeNode::Leaf { .. } => {
                    let class = node.predicted_class()
                        .map(|k| k.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    dot.push_str(&format!(
                        "\tnode_{id} [ label = \"Class={class}\", shape = box ];\n"
                    ));
                },
            }
        }
        dot.push('}');
        dot
    }
}

impl Classifier for Tree {
    /// Descends from the root.
    /// A feature the sample does not have sends the example right.
    /// Malformed trees predict class `0`.
    fn predict(&self, sample: &Sample, row: usize) -> usize {
        let mut id = 0;
        // A root-to-leaf path visits each node at most once.
        for _ in 0..self.nodes.len() {
            let Some(node) = self.nodes.get(id) else { break; };
            match node {
                TreeNode::Branch { feature, threshold, left, right, .. } => {
                    let x = feature
                        .and_then(|k| sample.features().get(k))
                        .map(|feat| feat[row]);
                    id = match x {
                        Some(x) if x <= *threshold => *left,
                        _ => *right,
                    };
                },
                TreeNode::Leaf { .. } => {
                    return node.predicted_class().unwrap_or(0);
                },
            }
        }
        0
    }
}
