use std::ops::Index;

use crate::constants::BUFFER_SIZE;

/// A named numeric column of a [`Sample`](crate::Sample).
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    vals: Vec<f64>,
}

impl Feature {
    /// Construct an empty column named `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            vals: Vec::with_capacity(BUFFER_SIZE),
        }
    }

    /// Construct a column from its values.
    pub fn from_vals<T: ToString>(name: T, vals: Vec<f64>) -> Self {
        Self { name: name.to_string(), vals }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vals(&self) -> &[f64] {
        &self.vals[..]
    }

    pub fn into_vals(self) -> Vec<f64> {
        self.vals
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn append(&mut self, val: f64) {
        self.vals.push(val);
    }
}

impl Index<usize> for Feature {
    type Output = f64;

    fn index(&self, row: usize) -> &Self::Output {
        &self.vals[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_index() {
        let mut feature = Feature::new("x");
        assert!(feature.is_empty());
        feature.append(0.5);
        feature.append(1.5);
        assert_eq!(2, feature.len());
        assert_eq!(1.5, feature[1]);
        assert_eq!(vec![0.5, 1.5], feature.into_vals());
    }
}
