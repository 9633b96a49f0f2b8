mod config;
mod feedback;
mod rules;

pub use config::{EmptyPresentationPolicy, GradingPolicy};
pub use feedback::{synthesize, Terminator};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalogue::{Catalogue, MarkTable, UnitRubric};
use super::domain::{Grade, MarkingRequest, Selection, UnitId, UnitSelection};
use super::report::MarkingReport;

pub(crate) const PRESENTATION_SUBJECT: &str = "presentation";
pub(crate) const DESCRIPTION_SUBJECT: &str = "description";

/// Stateless evaluator applying the catalogue and grading policy to one pass.
#[derive(Debug, Clone)]
pub struct MarkingEngine {
    catalogue: Catalogue,
    policy: GradingPolicy,
}

impl MarkingEngine {
    pub fn new(catalogue: Catalogue, policy: GradingPolicy) -> Self {
        Self { catalogue, policy }
    }

    pub fn standard(policy: GradingPolicy) -> Self {
        Self::new(Catalogue::standard(), policy)
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    pub fn evaluate_presentation(&self, selected: &Selection) -> PresentationResult {
        let grade = rules::classify_presentation(selected, &self.policy);
        let marks = self.catalogue.presentation_marks();
        let (grade, mark) = lookup_mark("Presentation", marks, grade);

        let criteria = self.catalogue.ordered_presentation(selected);
        let descriptions: Vec<&str> = criteria
            .iter()
            .map(|criterion| criterion.description)
            .collect();
        let feedback = synthesize(
            PRESENTATION_SUBJECT,
            grade,
            &descriptions,
            Terminator::Never,
        );

        let advisory = match grade {
            Grade::InvalidSelection => Some(Advisory::new(
                "Presentation",
                grade,
                "excellent cannot be combined with other non-bad criteria; mark set to 0",
            )),
            Grade::NoSelection => Some(Advisory::new(
                "Presentation",
                grade,
                "no presentation criteria were selected; mark set to 0",
            )),
            _ => None,
        };

        debug!(grade = grade.label(), mark, selected = criteria.len(), "presentation classified");

        PresentationResult {
            grade,
            mark,
            max_mark: marks.top_mark(),
            selected_ids: criteria.iter().map(|c| c.id.to_string()).collect(),
            feedback,
            advisory,
        }
    }

    pub fn evaluate_unit(&self, unit: &UnitRubric, selection: &UnitSelection) -> UnitResult {
        let missing_items = unit.ordered_missing(&selection.missing);
        let missing_count = missing_items.len();
        let grade = rules::classify_unit(
            unit,
            missing_count,
            selection.excellence_confirmed,
            &self.policy,
        );
        let label = unit.label();
        let (grade, mark) = lookup_mark(&label, &unit.marks, grade);
        let feedback = synthesize(DESCRIPTION_SUBJECT, grade, &missing_items, Terminator::Always);

        debug!(unit = %unit.id, grade = grade.label(), mark, missing_count, "lab classified");

        UnitResult {
            unit: unit.id,
            label,
            grade,
            mark,
            max_mark: unit.marks.top_mark(),
            missing_items: missing_items.into_iter().map(str::to_string).collect(),
            missing_count,
            feedback,
        }
    }

    /// Grades every category in catalogue order and aggregates the pass.
    pub fn evaluate(&self, request: &MarkingRequest, evaluated_at: NaiveDateTime) -> MarkingReport {
        for unit_id in request.units.keys() {
            if self.catalogue.unit(*unit_id).is_none() {
                warn!(unit = %unit_id, "selection names a lab outside the catalogue; ignoring");
            }
        }

        let presentation = self.evaluate_presentation(&request.presentation);
        let empty = UnitSelection::default();
        let units = self
            .catalogue
            .units()
            .iter()
            .map(|unit| {
                let selection = request.unit_selection(unit.id).unwrap_or(&empty);
                self.evaluate_unit(unit, selection)
            })
            .collect();

        MarkingReport::aggregate(
            request.student_id.clone(),
            presentation,
            units,
            self.catalogue.max_mark(),
            evaluated_at,
        )
    }
}

fn lookup_mark(category: &str, marks: &MarkTable, grade: Grade) -> (Grade, f64) {
    if !grade.is_gradeable() {
        return (grade, 0.0);
    }

    match marks.mark_for(grade) {
        Some(mark) => (grade, mark),
        None => {
            warn!(
                category,
                grade = grade.label(),
                "mark table has no entry for grade; recording 0 marks"
            );
            (Grade::Unknown, 0.0)
        }
    }
}

/// Non-fatal condition surfaced alongside a result instead of blocking the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub category: String,
    pub grade: Grade,
    pub message: String,
}

impl Advisory {
    pub fn new(category: impl Into<String>, grade: Grade, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            grade,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationResult {
    pub grade: Grade,
    pub mark: f64,
    pub max_mark: f64,
    /// Selected criterion ids in catalogue order.
    pub selected_ids: Vec<String>,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Advisory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitResult {
    pub unit: UnitId,
    pub label: String,
    pub grade: Grade,
    pub mark: f64,
    pub max_mark: f64,
    /// Ticked deficiencies in catalogue order.
    pub missing_items: Vec<String>,
    pub missing_count: usize,
    pub feedback: String,
}

impl UnitResult {
    /// The sentence used for this lab in the combined feedback text.
    pub fn summary_feedback(&self) -> String {
        synthesize(
            DESCRIPTION_SUBJECT,
            self.grade,
            &self.missing_items,
            Terminator::UpToTwoItems,
        )
    }
}
