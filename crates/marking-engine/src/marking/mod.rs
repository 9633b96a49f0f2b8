//! Rubric-driven lab marking: catalogue data, grading rules, feedback synthesis,
//! aggregation into a report and the CSV/JSON export formats.

pub mod catalogue;
pub mod domain;
pub mod evaluation;
pub mod export;
pub mod report;

#[cfg(test)]
mod tests;

pub use catalogue::{
    BandCut, BandTable, Catalogue, CatalogueError, MarkTable, PresentationCriterion,
    SelectionError, UnitRubric,
};
pub use domain::{Grade, MarkingRequest, Selection, Severity, UnitId, UnitSelection};
pub use evaluation::{
    synthesize, Advisory, EmptyPresentationPolicy, GradingPolicy, MarkingEngine,
    PresentationResult, Terminator, UnitResult,
};
pub use export::{export_file_name, to_csv, to_json, ExportError, ExportFormat};
pub use report::{GradeCount, MarkingReport};
