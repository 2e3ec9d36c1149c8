//! A small engine that loads IF/THEN rules from text
//! and evaluates them against named inputs.
//!
//! The accepted format is the one [`export_rules`](crate::export_rules)
//! writes, extended with `<`, `>=`, `==`, `!=` and quoted string values:
//!
//! ```text
//! IF (petal length (cm) <= 2.45) THEN Class=0
//! IF (user_role == 'admin') & (action == 'delete') THEN allow=true
//! ```
use std::collections::HashMap;
use std::fmt;

use crate::{
    Classifier,
    Sample,
    constants::EQUALITY_TOLERANCE,
};

/// A numeric or string value, on either side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Comparison operators, matched longest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Equal,
    NotEqual,
}

const OPERATORS: [(&str, Operator); 6] = [
    ("<=", Operator::LessEq),
    (">=", Operator::GreaterEq),
    ("==", Operator::Equal),
    ("!=", Operator::NotEqual),
    ("<",  Operator::Less),
    (">",  Operator::Greater),
];

/// One `(variable <op> value)` term of a premise.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub variable: String,
    pub operator: Operator,
    pub value:    Value,
}

impl Condition {
    /// Parse a single term such as `(petal width (cm) <= 0.80)`.
    /// Returns `None` if no operator is found
    /// or the value is neither a number nor a quoted string.
    fn parse(segment: &str) -> Option<Self> {
        let segment = segment.trim();
        let segment = segment.strip_prefix('(').unwrap_or(segment);
        let segment = segment.strip_suffix(')').unwrap_or(segment);

        let (pos, op, operator) = OPERATORS.iter()
            .find_map(|&(op, operator)| {
                segment.find(op).map(|pos| (pos, op, operator))
            })?;

        let variable = segment[..pos].trim().to_string();
        let value = parse_value(segment[pos + op.len()..].trim())?;

        Some(Self { variable, operator, value })
    }

    /// Returns `true` if `input` satisfies this condition.
    /// A type mismatch never satisfies it.
    pub fn holds(&self, input: &Value) -> bool {
        match (&self.value, input) {
            (Value::Number(c), Value::Number(x)) => {
                let (c, x) = (*c, *x);
                match self.operator {
                    Operator::Less      => x < c,
                    Operator::LessEq    => x <= c,
                    Operator::Greater   => x > c,
                    Operator::GreaterEq => x >= c,
                    Operator::Equal     => (x - c).abs() < EQUALITY_TOLERANCE,
                    Operator::NotEqual  => (x - c).abs() >= EQUALITY_TOLERANCE,
                }
            },
            (Value::Text(c), Value::Text(x)) => {
                match self.operator {
                    Operator::Equal    => x == c,
                    Operator::NotEqual => x != c,
                    _ => false,
                }
            },
            _ => false,
        }
    }
}

fn parse_value(text: &str) -> Option<Value> {
    let quoted = ['\'', '"'].into_iter()
        .find_map(|q| text.strip_prefix(q)?.strip_suffix(q));
    match quoted {
        Some(s) => Some(Value::from(s)),
        None => text.parse::<f64>().ok().map(Value::Number),
    }
}

/// The `key=value` consequent of a rule, e.g. `Class=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub key:   String,
    pub value: String,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A parsed rule: all `conditions` must hold to produce `outcome`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRule {
    pub conditions: Vec<Condition>,
    pub outcome:    Outcome,
}

impl ParsedRule {
    /// Parse one line. Returns `None` if the line has no `THEN`
    /// or its consequent has no `=`.
    /// Terms that cannot be parsed are dropped from the premise.
    fn parse(line: &str) -> Option<Self> {
        let (premise, consequent) = line.split_once("THEN")?;
        let premise = premise.find("IF")
            .map_or(premise, |pos| &premise[pos + 2..]);

        let conditions = premise.split('&')
            .filter(|segment| !segment.trim().is_empty())
            .filter_map(Condition::parse)
            .collect::<Vec<_>>();

        let (key, value) = consequent.trim().split_once('=')?;
        let outcome = Outcome {
            key:   key.trim().to_string(),
            value: value.trim().to_string(),
        };
        Some(Self { conditions, outcome })
    }

    /// A rule without condition always matches.
    /// A missing input fails its condition.
    pub fn matches(&self, inputs: &HashMap<String, Value>) -> bool {
        self.conditions.iter()
            .all(|cond| {
                inputs.get(&cond.variable)
                    .is_some_and(|input| cond.holds(input))
            })
    }
}

/// An ordered list of rules. The first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<ParsedRule>,
}

impl RuleSet {
    /// Parse one rule per non-empty line of `text`.
    /// Lines that are not rules are skipped.
    pub fn parse(text: &str) -> Self {
        let rules = text.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(ParsedRule::parse)
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[ParsedRule] {
        &self.rules[..]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the outcome of the first rule whose conditions all hold.
    pub fn evaluate(&self, inputs: &HashMap<String, Value>)
        -> Option<&Outcome>
    {
        self.rules.iter()
            .find(|rule| rule.matches(inputs))
            .map(|rule| &rule.outcome)
    }

    /// Evaluate the `row`-th example of `sample`,
    /// using its feature names as variables.
    pub fn evaluate_row(&self, sample: &Sample, row: usize)
        -> Option<&Outcome>
    {
        let inputs = sample.features()
            .iter()
            .map(|feat| (feat.name().to_string(), Value::from(feat[row])))
            .collect::<HashMap<_, _>>();
        self.evaluate(&inputs)
    }

    /// Fraction of the examples of `sample` for which
    /// the first matching rule yields the target class.
    /// Rows no rule matches count as errors.
    pub fn accuracy(&self, sample: &Sample) -> f64 {
        let n_sample = sample.shape().0;
        if n_sample == 0 { return 0f64; }

        let correct = (0..n_sample)
            .filter(|&row| {
                self.evaluate_row(sample, row)
                    .and_then(|outcome| outcome.value.parse::<usize>().ok())
                    .is_some_and(|class| class == sample.class_at(row))
            })
            .count();
        correct as f64 / n_sample as f64
    }

    /// Fraction of the examples of `sample` for which
    /// the first matching rule yields the class `classifier` predicts.
    pub fn agreement<C>(&self, classifier: &C, sample: &Sample) -> f64
        where C: Classifier
    {
        let n_sample = sample.shape().0;
        if n_sample == 0 { return 0f64; }

        let agreed = (0..n_sample)
            .filter(|&row| {
                self.evaluate_row(sample, row)
                    .and_then(|outcome| outcome.value.parse::<usize>().ok())
                    .is_some_and(|class| {
                        class == classifier.predict(sample, row)
                    })
            })
            .count();
        agreed as f64 / n_sample as f64
    }
}
