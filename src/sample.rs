//! Column-oriented labeled data and the CSV reader that fills it.

mod feature;
mod sample_struct;
mod sample_reader;

pub use feature::Feature;
pub use sample_struct::Sample;
pub use sample_reader::SampleReader;
