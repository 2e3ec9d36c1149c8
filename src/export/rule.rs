//! Structured rules and their text form.
use crate::constants::PREDICATE_SEPARATOR;

use std::fmt;

/// The comparison of a [`Predicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `x <= threshold`, the left branch of a node.
    LessEq,
    /// `x > threshold`, the right branch of a node.
    Greater,
}

impl Comparison {
    /// Returns `true` if `x` satisfies this comparison against `threshold`.
    pub fn holds(&self, x: f64, threshold: f64) -> bool {
        match self {
            Self::LessEq  => x <= threshold,
            Self::Greater => x > threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::LessEq  => "<=",
            Self::Greater => ">",
        };
        write!(f, "{op}")
    }
}

/// A single condition on the path to a leaf,
/// rendered as `(<feature> <= 2.45)` or `(<feature> > 2.45)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    feature:    String,
    comparison: Comparison,
    threshold:  f64,
}

impl Predicate {
    pub fn new<S: ToString>(
        feature:    S,
        comparison: Comparison,
        threshold:  f64,
    ) -> Self
    {
        Self { feature: feature.to_string(), comparison, threshold }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl fmt::Display for Predicate {
    /// The threshold is written with exactly two decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {} {:.2})",
            self.feature, self.comparison, self.threshold
        )
    }
}

/// The conjunction of predicates from the root to one leaf
/// together with the class the leaf predicts.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    predicates: Vec<Predicate>,
    class:      usize,
}

impl Rule {
    pub fn new(predicates: Vec<Predicate>, class: usize) -> Self {
        Self { predicates, class }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates[..]
    }

    pub fn class(&self) -> usize {
        self.class
    }
}

impl fmt::Display for Rule {
    /// `IF <p1> & <p2> & ... THEN Class=<id>`.
    /// A rule without predicates reads `IF  THEN Class=<id>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let premise = self.predicates.iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(PREDICATE_SEPARATOR);
        write!(f, "IF {premise} THEN Class={}", self.class)
    }
}
