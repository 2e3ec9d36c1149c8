use treerules::prelude::*;
use treerules::{TreeNode, Value, report};

use std::collections::HashMap;
use std::fs;



/// Rounded thresholds may disagree with the tree
/// for values closer than this to a split.
const ROUNDING_MARGIN: f64 = 0.005;


fn near_a_threshold(tree: &Tree, sample: &Sample, row: usize) -> bool {
    tree.nodes()
        .iter()
        .any(|node| match node {
            TreeNode::Branch { feature: Some(k), threshold, .. } => {
                (sample.features()[*k][row] - threshold).abs() < ROUNDING_MARGIN
            },
            _ => false,
        })
}


/// Tests for loading exported rules back into the rule engine.
#[cfg(test)]
pub mod engine_tests {
    use super::*;

    #[test]
    fn rules_agree_with_tree() {
        let sample = datasets::iris().unwrap();
        let tree = DecisionTreeBuilder::new(&sample)
            .max_depth(4)
            .split_by(SplitBy::Entropy)
            .build()
            .fit(&sample);

        let text = export_text_rules(&tree, &sample.feature_names())
            .unwrap()
            .join("\n");
        let rules = RuleSet::parse(&text);
        assert_eq!(tree.n_leaves(), rules.len());

        let n_sample = sample.shape().0;
        for row in 0..n_sample {
            if near_a_threshold(&tree, &sample, row) { continue; }

            let exp = tree.predict(&sample, row).to_string();
            let res = rules.evaluate_row(&sample, row)
                .map(|outcome| outcome.value.clone());
            assert_eq!(Some(exp.clone()), res, "row {row}: expected {exp:?}, got {res:?}.");
        }
    }


    #[test]
    fn rule_accuracy_matches_tree() {
        let sample = datasets::iris().unwrap();
        let tree = DecisionTreeBuilder::new(&sample)
            .max_depth(3)
            .build()
            .fit(&sample);

        let text = export_text_rules(&tree, &sample.feature_names())
            .unwrap()
            .join("\n");
        let rules = RuleSet::parse(&text);

        let exp = tree.accuracy(&sample);
        let res = rules.accuracy(&sample);
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }


    #[test]
    fn full_agreement_with_tree() {
        let sample = datasets::iris().unwrap();
        let tree = DecisionTreeBuilder::new(&sample)
            .max_depth(3)
            .build()
            .fit(&sample);

        let text = export_text_rules(&tree, &sample.feature_names())
            .unwrap()
            .join("\n");
        let rules = RuleSet::parse(&text);
        let res = rules.agreement(&tree, &sample);
        assert_eq!(1.0, res, "expected 1.0, got {res:?}.");

        // Relabeling the first `Class=1` rule breaks agreement.
        let swapped = RuleSet::parse(
            &text.replacen("THEN Class=1", "THEN Class=0", 1)
        );
        let res = swapped.agreement(&tree, &sample);
        assert!(res < 1.0, "expected disagreement, got {res:?}.");
    }


    #[test]
    fn evaluate_named_inputs() {
        let rules = RuleSet::parse("\
            IF (petal length (cm) <= 2.45) THEN Class=0\n\
            IF (petal length (cm) > 2.45) THEN Class=1\n");

        let inputs = [("petal length (cm)".to_string(), Value::from(1.4))]
            .into_iter()
            .collect::<HashMap<_, _>>();
        let res = rules.evaluate(&inputs).map(|o| o.to_string());
        let exp = Some("Class=0".to_string());
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }


    #[test]
    fn saved_rules_load_back() {
        let sample = datasets::iris().unwrap();
        let tree = DecisionTreeBuilder::new(&sample)
            .max_depth(2)
            .build()
            .fit(&sample);
        let rules = export_rules(&tree, &sample.feature_names()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        report::save_rules(&path, &rules).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let exp = rules.iter()
            .map(|rule| format!("{rule}\n"))
            .collect::<String>();
        assert_eq!(exp, text, "expected {exp:?}, got {text:?}.");

        let loaded = RuleSet::parse(&text);
        assert_eq!(rules.len(), loaded.len());
    }
}
