pub use crate::{
    Classifier,
    Sample,
    SampleReader,

    DecisionTree,
    DecisionTreeBuilder,
    RawTree,
    SplitBy,
    Tree,

    Rule,
    RuleSet,
    RuleWriter,
    export_rules,
    export_text_rules,

    datasets,
};
