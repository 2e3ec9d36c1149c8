//! The parallel-array tree layout used by scikit-learn's `tree_` object.
//! It lets trees fitted elsewhere be loaded from JSON and exported.
use serde::{Serialize, Deserialize};

use crate::{
    constants::{TREE_LEAF, TREE_UNDEFINED},
    export::ExportError,
};
use super::node::{Tree, TreeNode};

/// A tree stored as parallel arrays, one slot per node.
/// A node is a branch iff `feature[node] != TREE_UNDEFINED`.
/// Leaves have `TREE_LEAF` children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTree {
    pub children_left:  Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature:        Vec<i64>,
    pub threshold:      Vec<f64>,
    pub value:          Vec<Vec<f64>>,
}

impl RawTree {
    fn n_nodes(&self) -> Result<usize, ExportError> {
        let n = self.feature.len();
        let lengths = [
            self.children_left.len(),
            self.children_right.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(ExportError::RaggedArrays);
        }
        Ok(n)
    }
}

/// Converts a child slot to an index.
/// `TREE_LEAF` and other negative values are rejected here;
/// indices past the end are left to the exporter.
fn child_index(node: usize, child: i64) -> Result<usize, ExportError> {
    usize::try_from(child)
        .map_err(|_| ExportError::MissingChild { node })
}

impl TryFrom<RawTree> for Tree {
    type Error = ExportError;

    fn try_from(raw: RawTree) -> Result<Self, Self::Error> {
        raw.n_nodes()?;
        let RawTree {
            children_left, children_right, feature, threshold, value,
        } = raw;

        let nodes = value.into_iter()
            .enumerate()
            .map(|(id, value)| {
                if feature[id] == TREE_UNDEFINED {
                    return Ok(TreeNode::leaf(value));
                }
                let left  = child_index(id, children_left[id])?;
                let right = child_index(id, children_right[id])?;
                Ok(TreeNode::Branch {
                    feature: usize::try_from(feature[id]).ok(),
                    threshold: threshold[id],
                    left,
                    right,
                    value,
                })
            })
            .collect::<Result<Vec<_>, ExportError>>()?;

        Ok(Tree::from(nodes))
    }
}

impl From<&Tree> for RawTree {
    fn from(tree: &Tree) -> Self {
        let n_nodes = tree.n_nodes();
        let mut raw = RawTree {
            children_left:  Vec::with_capacity(n_nodes),
            children_right: Vec::with_capacity(n_nodes),
            feature:        Vec::with_capacity(n_nodes),
            threshold:      Vec::with_capacity(n_nodes),
            value:          Vec::with_capacity(n_nodes),
        };

        for node in tree.nodes() {
            match node {
                TreeNode::Branch { feature, threshold, left, right, value } => {
                    raw.children_left.push(*left as i64);
                    raw.children_right.push(*right as i64);
                    // An unresolvable feature must stay a branch.
                    raw.feature.push(feature.map_or(i64::MIN, |k| k as i64));
                    raw.threshold.push(*threshold);
                    raw.value.push(value.clone());
                },
                TreeNode::Leaf { value } => {
                    raw.children_left.push(TREE_LEAF);
                    raw.children_right.push(TREE_LEAF);
                    raw.feature.push(TREE_UNDEFINED);
                    raw.threshold.push(TREE_UNDEFINED as f64);
                    raw.value.push(value.clone());
                },
            }
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> RawTree {
        RawTree {
            children_left:  vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature:        vec![2, -2, -2],
            threshold:      vec![2.45, -2.0, -2.0],
            value:          vec![
                vec![37.0, 34.0, 41.0],
                vec![37.0, 0.0, 0.0],
                vec![0.0, 34.0, 41.0],
            ],
        }
    }

    #[test]
    fn test_try_from_01() {
        let tree = Tree::try_from(stump()).unwrap();
        let exp = Tree::from(vec![
            TreeNode::branch(2, 2.45, 1, 2, vec![37.0, 34.0, 41.0]),
            TreeNode::leaf(vec![37.0, 0.0, 0.0]),
            TreeNode::leaf(vec![0.0, 34.0, 41.0]),
        ]);
        assert_eq!(exp, tree, "expected {exp:?}, got {tree:?}.");
    }

    #[test]
    fn test_try_from_missing_child() {
        let mut raw = stump();
        raw.children_right[0] = TREE_LEAF;
        let res = Tree::try_from(raw);
        let exp = Err(ExportError::MissingChild { node: 0 });
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_try_from_ragged() {
        let mut raw = stump();
        raw.threshold.pop();
        let res = Tree::try_from(raw);
        assert_eq!(Err(ExportError::RaggedArrays), res);
    }

    #[test]
    fn test_try_from_negative_feature() {
        let mut raw = stump();
        raw.feature[0] = -7;
        let tree = Tree::try_from(raw).unwrap();
        match tree.node(0) {
            Some(TreeNode::Branch { feature, .. }) => {
                assert_eq!(None, *feature, "got {feature:?}.");
            },
            other => panic!("expected a branch, got {other:?}."),
        }
    }

    #[test]
    fn test_from_tree_round_trip() {
        let tree = Tree::try_from(stump()).unwrap();
        let raw = RawTree::from(&tree);
        assert_eq!(stump(), raw);
    }
}
