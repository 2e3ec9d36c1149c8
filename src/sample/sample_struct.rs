use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::collections::HashMap;

use polars::prelude::*;
use rand::prelude::*;

use crate::{
    constants::MAX_CLASS_ID,
    error::{Error, Result},
};
use super::feature::*;

/// A batch of labeled examples stored column by column.
/// The target column holds class ids `0, 1, ..., n_classes - 1`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}

impl Sample {
    /// Construct a sample from its columns.
    /// Every feature must have as many values as `target`.
    pub fn from_columns(features: Vec<Feature>, target: Vec<f64>)
        -> Result<Self>
    {
        let n_sample = target.len();
        if let Some(feat) = features.iter().find(|f| f.len() != n_sample) {
            return Err(Error::LengthMismatch {
                column: feat.name().to_string(),
                expected: n_sample,
                got: feat.len(),
            });
        }
        check_target(&target)?;

        let n_feature = features.len();
        let name_to_index = index_names(&features);
        Ok(Self { name_to_index, features, target, n_sample, n_feature })
    }

    /// Read a CSV format file to [`Sample`] type.
    /// This method returns `Err` if the file does not exist.
    ///
    /// If the CSV file does not have a header row,
    /// this method assigns a default name for each column:
    /// `Feat. [1]`, `Feat. [2]`, ..., `Feat. [n]`.
    ///
    /// **Do not forget** to call [`Sample::set_target`] to
    /// assign the class label.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header)
    }

    /// Read a CSV from [`BufReader`].
    /// Blank lines are skipped.
    pub fn from_reader<R>(reader: BufReader<R>, has_header: bool)
        -> Result<Self>
        where R: Read,
    {
        let mut features: Option<Vec<Feature>> = None;
        let mut n_sample = 0_usize;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            if line.trim().is_empty() { continue; }

            if has_header && features.is_none() {
                features = Some(
                    line.split(',')
                        .map(|name| Feature::new(name.trim()))
                        .collect()
                );
                continue;
            }

            let xs = line.split(',')
                .map(|x| {
                    x.trim().parse::<f64>()
                        .map_err(|_| Error::Parse {
                            line: lineno,
                            value: x.trim().to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            // If the header does not exist,
            // construct a dummy header from the first row.
            let columns = features.get_or_insert_with(|| {
                (1..=xs.len())
                    .map(|k| Feature::new(format!("Feat. [{k}]")))
                    .collect()
            });

            if columns.len() != xs.len() {
                return Err(Error::Ragged {
                    line: lineno,
                    expected: columns.len(),
                    got: xs.len(),
                });
            }

            columns.iter_mut()
                .zip(xs)
                .for_each(|(feat, x)| feat.append(x));
            n_sample += 1;
        }

        let features = features.unwrap_or_default();
        let n_feature = features.len();
        let name_to_index = index_names(&features);

        Ok(Self {
            name_to_index,
            features,
            target: Vec::with_capacity(0),
            n_sample,
            n_feature,
        })
    }

    /// Construct a sample from a polars [`DataFrame`].
    /// Every column of `df` becomes a feature, `target` holds class ids.
    pub fn from_dataframe(df: DataFrame, target: Series) -> Result<Self> {
        let features = df.get_columns()
            .iter()
            .map(column_values)
            .collect::<Result<Vec<_>>>()?;
        let target = column_values(&target)?.into_vals();

        Self::from_columns(features, target)
    }

    /// Returns the slice of target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }

    /// Returns the target of the `row`-th example as a class id.
    pub fn class_at(&self, row: usize) -> usize {
        self.target[row] as usize
    }

    /// Returns the number of classes, `max(target) + 1`.
    pub fn n_classes(&self) -> usize {
        self.target.iter()
            .map(|&y| (y as usize).saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }

    /// Returns the feature named `name`, if any.
    pub fn feature<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }

    /// Returns the feature names in column order.
    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter()
            .map(|feat| feat.name().to_string())
            .collect()
    }

    /// Set the feature of name `target` to `self.target`.
    /// The old value assigned to `self.target` will be dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| Error::UnknownColumn(target.to_string()))?;

        let target = self.features.remove(pos).into_vals();
        check_target(&target)?;
        self.target = target;
        self.n_feature -= 1;
        self.name_to_index = index_names(&self.features);

        Ok(self)
    }

    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }

    /// Returns the `idx`-th instance `(x, y)`.
    pub fn at(&self, idx: usize) -> (Vec<f64>, f64) {
        let x = self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>();
        let y = self.target[idx];

        (x, y)
    }

    fn append(&mut self, feat: Vec<f64>, y: f64) {
        self.features.iter_mut()
            .zip(feat)
            .for_each(|(col, f)| col.append(f));
        self.target.push(y);
        self.n_sample += 1;
    }

    fn empty_like(&self, capacity: usize) -> Self {
        let features = self.features.iter()
            .map(|feat| Feature::new(feat.name()))
            .collect();
        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            target: Vec::with_capacity(capacity),
            n_sample: 0,
            n_feature: self.n_feature,
        }
    }

    /// Split `self` into two samples.
    /// The rows `ix[start..end]` form the second sample,
    /// the remaining rows form the first one.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Sample, Sample)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        let test_size = end - start;
        let mut train = self.empty_like(self.n_sample - test_size);
        let mut test = self.empty_like(test_size);

        for (i, &ii) in ix.iter().enumerate() {
            let (x, y) = self.at(ii);
            if (start..end).contains(&i) {
                test.append(x, y);
            } else {
                train.append(x, y);
            }
        }

        (train, test)
    }

    /// Shuffle the rows with a seeded generator and
    /// hold out `ceil(test_ratio * n_sample)` of them.
    /// Returns the pair `(train, test)`.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64)
        -> (Sample, Sample)
    {
        assert!(
            0f64 < test_ratio && test_ratio < 1f64,
            "Test ratio should be in `(0, 1)`. got {test_ratio}."
        );
        let mut ix = (0..self.n_sample).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        ix.shuffle(&mut rng);

        let test_size = (test_ratio * self.n_sample as f64).ceil() as usize;
        self.split(&ix, 0, test_size.min(self.n_sample))
    }
}

fn index_names(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect()
}

fn check_target(target: &[f64]) -> Result<()> {
    let is_class_id = |y: f64| {
        y.is_finite() && y >= 0f64 && y.trunc() == y && y <= MAX_CLASS_ID
    };
    match target.iter().find(|&&y| !is_class_id(y)) {
        Some(&y) => Err(Error::InvalidTarget(y)),
        None => Ok(()),
    }
}

fn column_values(series: &Series) -> Result<Feature> {
    let count = series.null_count();
    if count > 0 {
        return Err(Error::MissingValues {
            column: series.name().to_string(),
            count,
        });
    }
    let casted = series.cast(&DataType::Float64)?;
    let vals = casted.f64()?
        .into_no_null_iter()
        .collect::<Vec<f64>>();
    Ok(Feature::from_vals(series.name(), vals))
}
