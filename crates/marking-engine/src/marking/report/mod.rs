mod summary;
pub mod views;

pub use summary::{GradeCount, MarkingReport};

pub(crate) use summary::DATE_FORMAT;
