//! Exports a fitted [`Tree`] as IF/THEN logic rules, one per leaf.
//!
//! ```no_run
//! use treerules::{export_rules, DecisionTreeBuilder, datasets};
//!
//! let sample = datasets::iris().unwrap();
//! let tree = DecisionTreeBuilder::new(&sample)
//!     .build()
//!     .fit(&sample);
//! for rule in export_rules(&tree, &sample.feature_names()).unwrap() {
//!     println!("{rule}");
//! }
//! ```

mod rule;

pub use rule::{Comparison, Predicate, Rule};

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::{
    constants::UNDEFINED_FEATURE,
    tree::{Tree, TreeNode, majority_class},
};

/// Structural faults that make a tree impossible to walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("The tree has no node")]
    EmptyTree,

    #[error("Node {node} points to node {child}, which does not exist")]
    DanglingChild { node: usize, child: usize },

    #[error("Branch node {node} has no child")]
    MissingChild { node: usize },

    #[error("Node {node} is reached twice")]
    Revisited { node: usize },

    #[error("Leaf node {node} has no class count")]
    EmptyLeaf { node: usize },

    #[error("The node arrays have different lengths")]
    RaggedArrays,
}

/// Returns the name of the `feature`-th column,
/// or `undefined!` if `feature` is `None` or out of range.
pub fn resolve_name<S>(feature_names: &[S], feature: Option<usize>) -> &str
    where S: AsRef<str>
{
    feature.and_then(|k| feature_names.get(k))
        .map_or(UNDEFINED_FEATURE, |name| name.as_ref())
}

/// Walks `tree` depth first, left child first,
/// and returns one [`Rule`] per leaf in that order.
///
/// Each branch receives its own copy of the predicates accumulated so far.
/// The class of a leaf is the index of its maximal count,
/// the lowest index on a tie.
/// A feature index that `feature_names` cannot resolve
/// is rendered as `undefined!`.
pub fn export_rules<S>(tree: &Tree, feature_names: &[S])
    -> Result<Vec<Rule>, ExportError>
    where S: AsRef<str>
{
    let nodes = tree.nodes();
    let n_nodes = nodes.len();
    if n_nodes == 0 {
        return Err(ExportError::EmptyTree);
    }

    let mut visited = FixedBitSet::with_capacity(n_nodes);
    let mut rules = Vec::with_capacity(tree.n_leaves());

    // Right children are pushed first so that left subtrees pop first.
    let mut stack = vec![(0_usize, Vec::new())];
    while let Some((id, path)) = stack.pop() {
        if visited.put(id) {
            return Err(ExportError::Revisited { node: id });
        }

        match &nodes[id] {
            TreeNode::Branch { feature, threshold, left, right, .. } => {
                if let Some(&child) = [left, right].into_iter()
                    .find(|&&child| child >= n_nodes)
                {
                    return Err(ExportError::DanglingChild { node: id, child });
                }

                let name = resolve_name(feature_names, *feature);

                let mut right_path = path.clone();
                right_path.push(
                    Predicate::new(name, Comparison::Greater, *threshold)
                );
                let mut left_path = path;
                left_path.push(
                    Predicate::new(name, Comparison::LessEq, *threshold)
                );

                stack.push((*right, right_path));
                stack.push((*left, left_path));
            },
            TreeNode::Leaf { value } => {
                let class = majority_class(value)
                    .ok_or(ExportError::EmptyLeaf { node: id })?;
                rules.push(Rule::new(path, class));
            },
        }
    }

    Ok(rules)
}

/// Same as [`export_rules`], but returns the text of each rule.
pub fn export_text_rules<S>(tree: &Tree, feature_names: &[S])
    -> Result<Vec<String>, ExportError>
    where S: AsRef<str>
{
    let rules = export_rules(tree, feature_names)?;
    Ok(rules.iter().map(|rule| rule.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_name_01() {
        let names = ["a", "b"];
        assert_eq!("b", resolve_name(&names, Some(1)));
        assert_eq!(UNDEFINED_FEATURE, resolve_name(&names, Some(2)));
        assert_eq!(UNDEFINED_FEATURE, resolve_name(&names, None));
    }

    #[test]
    fn test_export_empty_tree() {
        let tree = Tree::from(Vec::new());
        let res = export_rules(&tree, &["x"]);
        assert_eq!(Err(ExportError::EmptyTree), res);
    }

    #[test]
    fn test_export_dangling_child() {
        let tree = Tree::from(vec![
            TreeNode::branch(0, 1.0, 1, 5, vec![1.0, 1.0]),
            TreeNode::leaf(vec![1.0, 0.0]),
        ]);
        let res = export_rules(&tree, &["x"]);
        let exp = Err(ExportError::DanglingChild { node: 0, child: 5 });
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_export_cycle() {
        let tree = Tree::from(vec![
            TreeNode::branch(0, 1.0, 1, 0, vec![1.0, 1.0]),
            TreeNode::leaf(vec![1.0, 0.0]),
        ]);
        let res = export_rules(&tree, &["x"]);
        let exp = Err(ExportError::Revisited { node: 0 });
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_export_empty_leaf() {
        let tree = Tree::from(vec![TreeNode::leaf(Vec::new())]);
        let res = export_rules(&tree, &["x"]);
        let exp = Err(ExportError::EmptyLeaf { node: 0 });
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }
}
