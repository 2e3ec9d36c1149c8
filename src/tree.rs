//! A CART-style decision tree learner and
//! the node-array tree it produces.

pub(crate) mod builder;
pub(crate) mod dtree;
pub mod node;
pub mod raw;
pub mod split_by;

pub use builder::DecisionTreeBuilder;
pub use dtree::DecisionTree;
pub use node::{Tree, TreeNode, majority_class};
pub use raw::RawTree;
pub use split_by::SplitBy;
