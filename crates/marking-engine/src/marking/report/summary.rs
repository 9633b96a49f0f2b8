use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::super::domain::Grade;
use super::super::evaluation::{Advisory, PresentationResult, UnitResult};
use super::views::{CategoryRow, GradeCountEntry, MarkingSummary};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

/// Aggregated outcome of one marking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkingReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub presentation: PresentationResult,
    pub units: Vec<UnitResult>,
    pub total_mark: f64,
    pub max_mark: f64,
    /// Labs grouped by grade, in order of first appearance.
    pub grade_counts: Vec<GradeCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
    pub evaluated_at: NaiveDateTime,
}

impl MarkingReport {
    pub fn aggregate(
        student_id: Option<String>,
        presentation: PresentationResult,
        units: Vec<UnitResult>,
        max_mark: f64,
        evaluated_at: NaiveDateTime,
    ) -> Self {
        let total_mark = units
            .iter()
            .fold(presentation.mark, |total, unit| total + unit.mark);

        let mut grade_counts: Vec<GradeCount> = Vec::new();
        for unit in &units {
            match grade_counts.iter_mut().find(|entry| entry.grade == unit.grade) {
                Some(entry) => entry.count += 1,
                None => grade_counts.push(GradeCount {
                    grade: unit.grade,
                    count: 1,
                }),
            }
        }

        let mut advisories: Vec<Advisory> = presentation.advisory.iter().cloned().collect();
        advisories.extend(
            units
                .iter()
                .filter(|unit| unit.grade == Grade::Unknown)
                .map(|unit| {
                    Advisory::new(
                        unit.label.clone(),
                        Grade::Unknown,
                        "no mark is defined for the computed grade; mark set to 0",
                    )
                }),
        );

        Self {
            student_id,
            presentation,
            units,
            total_mark,
            max_mark,
            grade_counts,
            advisories,
            evaluated_at,
        }
    }

    pub fn evaluation_date(&self) -> String {
        self.evaluated_at.format(DATE_FORMAT).to_string()
    }

    pub fn presentation_feedback_text(&self) -> String {
        format!(
            "{} ({} marks)",
            self.presentation.feedback, self.presentation.mark
        )
    }

    pub fn description_feedback_text(&self) -> String {
        self.units
            .iter()
            .map(|unit| {
                format!(
                    "{}: {} ({} marks)\n",
                    unit.label,
                    unit.summary_feedback(),
                    unit.mark
                )
            })
            .collect()
    }

    /// The complete feedback block handed back to the student.
    pub fn feedback_text(&self) -> String {
        let mut text = format!("**Evaluation Date:** {}\n\n", self.evaluation_date());
        text.push_str(&format!(
            "**TOTAL MARKS: {}/{}**\n\n",
            self.total_mark, self.max_mark
        ));

        text.push_str("**PRESENTATION EVALUATION:**\n");
        text.push_str(&self.presentation_feedback_text());
        text.push_str("\n\n");

        text.push_str("**DESCRIPTION EVALUATION:**\n");
        for unit in &self.units {
            text.push_str(&format!(
                "\n{}: {} ({} marks)\n",
                unit.label,
                unit.summary_feedback(),
                unit.mark
            ));
        }

        text
    }

    pub fn summary(&self) -> MarkingSummary {
        let mut rows = vec![CategoryRow {
            category: "Presentation".to_string(),
            grade: self.presentation.grade,
            grade_label: self.presentation.grade.label(),
            mark: self.presentation.mark,
            max_mark: self.presentation.max_mark,
        }];
        rows.extend(self.units.iter().map(|unit| CategoryRow {
            category: unit.label.clone(),
            grade: unit.grade,
            grade_label: unit.grade.label(),
            mark: unit.mark,
            max_mark: unit.max_mark,
        }));

        let grade_counts = self
            .grade_counts
            .iter()
            .map(|entry| GradeCountEntry {
                grade: entry.grade,
                grade_label: entry.grade.label(),
                count: entry.count,
            })
            .collect();

        MarkingSummary {
            student_id: self.student_id.clone(),
            rows,
            grade_counts,
            total_mark: self.total_mark,
            max_mark: self.max_mark,
            advisories: self
                .advisories
                .iter()
                .map(|advisory| format!("{}: {}", advisory.category, advisory.message))
                .collect(),
            evaluation_date: self.evaluation_date(),
        }
    }
}
