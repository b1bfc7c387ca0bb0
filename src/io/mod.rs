//! Data sources for the viewer.

pub mod sample_data;

pub use sample_data::SampleGenerator;
