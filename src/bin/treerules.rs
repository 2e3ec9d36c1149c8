//! Trains a decision tree and writes it out as logic rules.
//!
//! # Usage
//!
//! ```bash
//! # Train on the bundled iris data, write `rules.txt`
//! treerules
//!
//! # Train on a CSV file with a `label` column
//! treerules --data train.csv --target label --max-depth 4
//!
//! # Export a tree saved earlier with `--save-tree`
//! treerules --tree tree.json --output tree_rules.txt
//! ```

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use treerules::{
    Classifier,
    DecisionTreeBuilder,
    RawTree,
    RuleSet,
    Sample,
    SampleReader,
    SplitBy,
    Tree,
    constants::*,
    datasets,
    export_rules,
    report,
};

/// Train a decision tree and export it as IF/THEN rules.
#[derive(Parser, Debug)]
#[command(name = "treerules", version, about)]
struct Args {
    /// File the rules are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// CSV file with a header row. Defaults to the bundled iris data
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Column of `--data` that holds the class ids
    #[arg(short, long, default_value = "class")]
    target: String,

    /// Maximal depth of the tree
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
    )]
    max_depth: usize,

    /// Splitting criterion, `gini` or `entropy`
    #[arg(long, default_value = "gini")]
    split_by: SplitBy,

    /// Seed of the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Fraction of the examples held out for testing
    #[arg(long, default_value_t = DEFAULT_TEST_RATIO, value_parser = parse_ratio)]
    test_ratio: f64,

    /// Export this tree (JSON) instead of training one
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Save the trained tree as JSON
    #[arg(long)]
    save_tree: Option<PathBuf>,

    /// Write the tree in Graphviz DOT format
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Print the tree statistics and the fraction of examples
    /// on which the exported rules predict the same class as the tree
    #[arg(short, long)]
    verbose: bool,
}

fn parse_ratio(s: &str) -> Result<f64, String> {
    let ratio = s.parse::<f64>().map_err(|e| e.to_string())?;
    if 0f64 < ratio && ratio < 1f64 {
        Ok(ratio)
    } else {
        Err(format!("expected a ratio in (0, 1), got {ratio}"))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> treerules::Result<()> {
    let sample = load_sample(&args)?;
    let names = sample.feature_names();

    let tree = match &args.tree {
        Some(path) => {
            report::status(format!("Loading tree from {}...", path.display()));
            let file = BufReader::new(File::open(path)?);
            let raw: RawTree = serde_json::from_reader(file)?;
            let tree = Tree::try_from(raw)?;
            report::accuracy("Model", tree.accuracy(&sample));
            tree
        },
        None => train(&args, &sample)?,
    };

    if let Some(path) = &args.save_tree {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, &RawTree::from(&tree))?;
    }
    if let Some(path) = &args.dot {
        std::fs::write(path, tree.to_dot(&names))?;
    }

    report::status("Converting to Logic Rules...");
    let rules = export_rules(&tree, &names)?;
    report::save_rules(&args.output, &rules)?;
    report::status(format!("Rules saved to {}", args.output.display()));

    if args.verbose {
        let text = rules.iter()
            .map(|rule| rule.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let ruleset = RuleSet::parse(&text);
        report::agreement(ruleset.agreement(&tree, &sample));
    }
    Ok(())
}

fn load_sample(args: &Args) -> treerules::Result<Sample> {
    match &args.data {
        Some(path) => {
            SampleReader::new()
                .file(path)
                .has_header(true)
                .target_feature(&args.target)
                .read()
        },
        None => datasets::iris(),
    }
}

fn train(args: &Args, sample: &Sample) -> treerules::Result<Tree> {
    let dataset = args.data.as_ref()
        .map_or("Iris".to_string(), |path| path.display().to_string());
    report::status(
        format!("Training Decision Tree on {dataset} dataset...")
    );

    let (train, test) = sample.train_test_split(args.test_ratio, args.seed);
    if train.shape().0 == 0 {
        return Err(treerules::Error::EmptySample);
    }
    let learner = DecisionTreeBuilder::new(&train)
        .max_depth(args.max_depth)
        .split_by(args.split_by)
        .build();
    let tree = learner.fit(&train);

    report::accuracy("Model", tree.accuracy(&test));
    if args.verbose {
        report::stats(&learner, &tree);
    }
    Ok(tree)
}
