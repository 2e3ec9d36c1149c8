use std::path::Path;

use crate::error::{Error, Result};
use super::sample_struct::Sample;


/// Reads a numeric CSV file into a [`Sample`]
/// whose target column holds class ids.
///
/// ```no_run
/// use treerules::SampleReader;
/// let sample = SampleReader::new()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    path:   Option<P>,
    header: bool,
    class_column: Option<S>,
}


impl<P, S> SampleReader<P, S> {
    /// An empty reader. The file and the class column must be set
    /// before calling [`SampleReader::read`].
    pub fn new() -> Self {
        Self { path: None, header: false, class_column: None }
    }


    /// Whether the first non-blank line names the columns.
    /// Without a header, columns are named `Feat. [1]`, `Feat. [2]`, ...
    pub fn has_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P: AsRef<Path>, S> SampleReader<P, S> {
    /// Path of the CSV file.
    pub fn file(mut self, path: P) -> Self {
        self.path = Some(path);
        self
    }
}


impl<P, S: AsRef<str>> SampleReader<P, S> {
    /// Name of the column holding the class ids `0, 1, 2, ...`.
    /// The column is removed from the features.
    pub fn target_feature(mut self, column: S) -> Self {
        self.class_column = Some(column);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Parse the file.
    /// Returns [`Error::EmptySample`] if it has no data row.
    /// Panics if the file or the class column is not set.
    pub fn read(self) -> Result<Sample> {
        let path = self.path
            .expect("No CSV file is set. Use `SampleReader::file`.");
        let class_column = self.class_column
            .expect(
                "No class column is set. \
                Use `SampleReader::target_feature`."
            );

        let sample = Sample::from_csv(path, self.header)?
            .set_target(class_column)?;
        match sample.shape().0 {
            0 => Err(Error::EmptySample),
            _ => Ok(sample),
        }
    }
}
