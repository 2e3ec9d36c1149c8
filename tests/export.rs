use treerules::prelude::*;
use treerules::{
    Comparison,
    ExportError,
    TreeNode,
    constants::UNDEFINED_FEATURE,
};


const IRIS_NAMES: [&str; 4] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];


/// A stump on `petal length (cm) <= 2.45`, in the parallel-array layout.
fn iris_stump() -> RawTree {
    RawTree {
        children_left:  vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature:        vec![2, -2, -2],
        threshold:      vec![2.45, -2.0, -2.0],
        value:          vec![
            vec![50.0, 50.0, 0.0],
            vec![50.0, 0.0, 0.0],
            vec![0.0, 50.0, 0.0],
        ],
    }
}


/// Tests for the rule export.
#[cfg(test)]
pub mod export_tests {
    use super::*;

    #[test]
    fn single_leaf() {
        let tree = Tree::from(vec![TreeNode::leaf(vec![1.0, 4.0, 2.0])]);
        let res = export_text_rules(&tree, &IRIS_NAMES).unwrap();
        let exp = vec!["IF  THEN Class=1".to_string()];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");

        let rules = export_rules(&tree, &IRIS_NAMES).unwrap();
        assert!(rules[0].predicates().is_empty());
    }


    #[test]
    fn iris_stump_end_to_end() {
        let json = serde_json::to_string(&iris_stump()).unwrap();
        let raw: RawTree = serde_json::from_str(&json).unwrap();
        let tree = Tree::try_from(raw).unwrap();

        let res = export_text_rules(&tree, &IRIS_NAMES).unwrap();
        let exp = vec![
            "IF (petal length (cm) <= 2.45) THEN Class=0".to_string(),
            "IF (petal length (cm) > 2.45) THEN Class=1".to_string(),
        ];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }


    #[test]
    fn rule_count_equals_leaf_count() {
        // node 0 splits into 1 and 4, node 1 splits into 2 and 3.
        let tree = Tree::from(vec![
            TreeNode::branch(0, 1.0, 1, 4, vec![3.0, 2.0]),
            TreeNode::branch(1, 2.0, 2, 3, vec![2.0, 1.0]),
            TreeNode::leaf(vec![2.0, 0.0]),
            TreeNode::leaf(vec![0.0, 1.0]),
            TreeNode::leaf(vec![1.0, 1.0]),
        ]);
        let rules = export_rules(&tree, &["a", "b"]).unwrap();
        assert_eq!(tree.n_leaves(), rules.len());
        assert_eq!(3, rules.len());

        let res = rules.iter()
            .map(|rule| rule.to_string())
            .collect::<Vec<_>>();
        let exp = vec![
            "IF (a <= 1.00) & (b <= 2.00) THEN Class=0",
            "IF (a <= 1.00) & (b > 2.00) THEN Class=1",
            "IF (a > 1.00) THEN Class=0",
        ];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }


    #[test]
    fn left_is_less_eq_and_right_is_greater() {
        let sample = datasets::iris().unwrap();
        let tree = DecisionTreeBuilder::new(&sample)
            .max_depth(4)
            .build()
            .fit(&sample);
        let rules = export_rules(&tree, &sample.feature_names()).unwrap();

        // Walk each rule down the tree and check the direction of every edge.
        for rule in &rules {
            let mut id = 0;
            for pred in rule.predicates() {
                match &tree.nodes()[id] {
                    TreeNode::Branch { left, right, .. } => {
                        id = match pred.comparison() {
                            Comparison::LessEq => *left,
                            Comparison::Greater => *right,
                        };
                    },
                    TreeNode::Leaf { .. } => panic!("rule {rule} is too long"),
                }
            }
            assert!(tree.nodes()[id].is_leaf(), "rule {rule} stops early");
        }
    }


    #[test]
    fn two_decimal_thresholds() {
        let tree = Tree::from(vec![
            TreeNode::branch(0, 2.5, 1, 2, vec![1.0, 1.0]),
            TreeNode::leaf(vec![1.0, 0.0]),
            TreeNode::branch(0, 10.0 / 3.0, 3, 4, vec![0.0, 1.0]),
            TreeNode::leaf(vec![0.0, 1.0]),
            TreeNode::leaf(vec![0.0, 1.0]),
        ]);
        let res = export_text_rules(&tree, &["x"]).unwrap();
        let exp = vec![
            "IF (x <= 2.50) THEN Class=0",
            "IF (x > 2.50) & (x <= 3.33) THEN Class=1",
            "IF (x > 2.50) & (x > 3.33) THEN Class=1",
        ];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }


    #[test]
    fn tie_goes_to_lowest_class() {
        let tree = Tree::from(vec![
            TreeNode::branch(0, 0.5, 1, 2, vec![3.0, 3.0, 3.0]),
            TreeNode::leaf(vec![1.0, 2.0, 2.0]),
            TreeNode::leaf(vec![2.0, 1.0, 2.0]),
        ]);
        let res = export_rules(&tree, &["x"]).unwrap()
            .into_iter()
            .map(|rule| rule.class())
            .collect::<Vec<_>>();
        let exp = vec![1, 0];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }


    #[test]
    fn undefined_feature_name() {
        let mut raw = iris_stump();
        raw.feature[0] = 7;
        let tree = Tree::try_from(raw).unwrap();
        let res = export_text_rules(&tree, &IRIS_NAMES).unwrap();
        let exp = vec![
            format!("IF ({UNDEFINED_FEATURE} <= 2.45) THEN Class=0"),
            format!("IF ({UNDEFINED_FEATURE} > 2.45) THEN Class=1"),
        ];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
        assert_eq!("IF (undefined! <= 2.45) THEN Class=0", res[0]);
    }


    #[test]
    fn dangling_child_is_rejected() {
        let mut raw = iris_stump();
        raw.children_right[0] = 9;
        let tree = Tree::try_from(raw).unwrap();
        let res = export_rules(&tree, &IRIS_NAMES);
        let exp = Err(ExportError::DanglingChild { node: 0, child: 9 });
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }
}
