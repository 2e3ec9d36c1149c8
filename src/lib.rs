//! Fits a decision tree classifier and
//! exports it as human-readable `IF ... THEN Class=k` logic rules.
//!
//! Each root-to-leaf path of the tree becomes one rule.
//! A left edge contributes `(feature <= threshold)`,
//! a right edge contributes `(feature > threshold)`,
//! and the consequent is the majority class of the leaf.
//!
//! ```no_run
//! use treerules::prelude::*;
//!
//! let sample = datasets::iris().unwrap();
//! let (train, test) = sample.train_test_split(0.25, 42);
//!
//! let tree = DecisionTreeBuilder::new(&train)
//!     .max_depth(3)
//!     .build()
//!     .fit(&train);
//! println!("Model Accuracy: {:.2}", tree.accuracy(&test));
//!
//! for rule in export_text_rules(&tree, &train.feature_names()).unwrap() {
//!     println!("{rule}");
//! }
//! ```

pub mod constants;
pub mod error;
pub mod sample;
pub mod datasets;
pub mod classifier;
pub mod tree;
pub mod export;
pub mod engine;
pub mod report;

/// Exports the most frequently used items.
pub mod prelude;


pub use error::{Error, Result};

pub use sample::{Feature, Sample, SampleReader};

pub use classifier::Classifier;

pub use tree::{
    DecisionTree,
    DecisionTreeBuilder,
    RawTree,
    SplitBy,
    Tree,
    TreeNode,
};

pub use export::{
    Comparison,
    ExportError,
    Predicate,
    Rule,
    export_rules,
    export_text_rules,
};

pub use engine::{RuleSet, Value};

pub use report::RuleWriter;
