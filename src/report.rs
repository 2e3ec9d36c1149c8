//! Console status lines and the rule file sink.
use colored::Colorize;

use crate::{
    DecisionTree,
    Rule,
    Tree,
    error::Result,
};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;

/// Writes rules to a sink, one per line,
/// and optionally echoes each one to stdout.
pub struct RuleWriter<W: Write> {
    sink: W,
    echo: bool,
}

impl RuleWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RuleWriter<W> {
    /// Construct a writer over `sink`.
    /// Echoing is enabled by default.
    pub fn new(sink: W) -> Self {
        Self { sink, echo: true }
    }

    /// Set whether each rule is also printed to stdout.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Write each rule followed by a newline.
    /// Returns the number of rules written.
    pub fn write_rules(&mut self, rules: &[Rule]) -> io::Result<usize> {
        for rule in rules {
            writeln!(self.sink, "{rule}")?;
            if self.echo {
                println!("{rule}");
            }
        }
        Ok(rules.len())
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Write `rules` to the file at `path`, echoing them to stdout.
pub fn save_rules<P: AsRef<Path>>(path: P, rules: &[Rule]) -> Result<()> {
    let mut writer = RuleWriter::create(path)?;
    writer.write_rules(rules)?;
    writer.finish()?;
    Ok(())
}

/// Print a progress line.
pub fn status<S: AsRef<str>>(message: S) {
    println!("{}", message.as_ref().bold());
}

/// Print the one-line accuracy summary.
pub fn accuracy(name: &str, value: f64) {
    println!(
        "{} {}",
        format!("{name} Accuracy:").bold(),
        format!("{value:.2}").bold().green(),
    );
}

/// Print the fraction of examples on which the rules
/// and the tree predict the same class.
pub fn agreement(value: f64) {
    println!(
        "{} {}",
        "Rule/Tree Agreement:".bold(),
        format!("{value:.2}").bold().green(),
    );
}

/// Print the parameters of `learner` and the shape of `tree`.
pub fn stats(learner: &DecisionTree, tree: &Tree) {
    let header = format!(
        "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
        "", "STATS".bold(), "",
    );
    println!(
        "\n{header}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
        "Learner".bold(),
        learner.name().bold().green(),
    );

    let line = learner.info()
        .into_iter()
        .map(|(key, val)| {
            format!(
                "    + {:<STAT_WIDTH$}\t{:>width$}",
                key,
                val.bold().yellow(),
                width = STAT_WIDTH - 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    println!("{line}");

    println!(
        "\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
        {:=^FULL_WIDTH$}\n\
        ",
        "Nodes".bold(),
        tree.n_nodes().to_string().bold().green(),
        "Leaves".bold(),
        tree.n_leaves().to_string().bold().green(),
        "Depth".bold(),
        tree.depth().to_string().bold().green(),
        "".bold(),
    );
}
