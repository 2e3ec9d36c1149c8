//! Default values shared by the learner, the exporter and the binary.

/// The maximal depth of a tree, if not specified otherwise.
pub const DEFAULT_MAX_DEPTH:         usize = 3;
/// A node with fewer samples than this becomes a leaf.
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;
/// Fraction of the sample held out as test set.
pub const DEFAULT_TEST_RATIO:          f64 = 0.25;
/// Seed used for shuffling before the train/test split.
pub const DEFAULT_SEED:                u64 = 42;
/// Path the rules are written to.
pub const DEFAULT_OUTPUT:             &str = "rules.txt";

/// The largest class id a target column may hold.
pub const MAX_CLASS_ID:                f64 = 65_535.0;

/// Name rendered for a feature index the name table cannot resolve.
pub const UNDEFINED_FEATURE:          &str = "undefined!";
/// Separator between the predicates of one rule.
pub const PREDICATE_SEPARATOR:        &str = " & ";

/// Marks a missing child in the parallel-array tree layout.
pub const TREE_LEAF:                   i64 = -1;
/// Marks the feature slot of a leaf in the parallel-array tree layout.
pub const TREE_UNDEFINED:              i64 = -2;

/// Tolerance for `==` and `!=` between numbers in the rule engine.
pub const EQUALITY_TOLERANCE:          f64 = 1e-9;

/// Initial capacity of a feature column.
pub const BUFFER_SIZE:               usize = 256;
