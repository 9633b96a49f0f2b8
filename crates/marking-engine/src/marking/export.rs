//! Boundary serialisation of a [`MarkingReport`]: a one-row CSV sheet and a nested
//! JSON record. Field names match the spreadsheets graders already import.

use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::report::{MarkingReport, DATE_FORMAT};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV export: {0}")]
    Flush(String),
    #[error("CSV export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn render(self, report: &MarkingReport) -> Result<String, ExportError> {
        match self {
            Self::Csv => to_csv(report),
            Self::Json => to_json_string(report),
        }
    }
}

/// `marking_results_<YYYYmmdd_HHMMSS>.<ext>`
pub fn export_file_name(format: ExportFormat, at: NaiveDateTime) -> String {
    format!(
        "marking_results_{}.{}",
        at.format(FILE_STAMP_FORMAT),
        format.extension()
    )
}

pub fn csv_header(report: &MarkingReport) -> Vec<String> {
    let mut header = vec![
        "Presentation_Grade".to_string(),
        "Presentation_Mark".to_string(),
    ];
    for unit in &report.units {
        let prefix = unit.unit.column_prefix();
        header.push(format!("{prefix}_Grade"));
        header.push(format!("{prefix}_Mark"));
    }
    header.push("Total_Marks".to_string());
    header.push("Evaluation_Date".to_string());
    header
}

pub fn to_csv(report: &MarkingReport) -> Result<String, ExportError> {
    let mut row = vec![
        report.presentation.grade.label().to_string(),
        report.presentation.mark.to_string(),
    ];
    for unit in &report.units {
        row.push(unit.grade.label().to_string());
        row.push(unit.mark.to_string());
    }
    row.push(report.total_mark.to_string());
    row.push(report.evaluated_at.format(DATE_FORMAT).to_string());

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(csv_header(report))?;
    writer.write_record(&row)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;

    Ok(String::from_utf8(bytes)?)
}

/// Map serialised in insertion order, so labs stay in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<T>(pub Vec<(String, T)>);

impl<T: Serialize> Serialize for Ordered<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationExport {
    pub grade: &'static str,
    pub mark: f64,
    pub selected_issues: Vec<String>,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabExport {
    pub missing_criteria: Vec<String>,
    pub missing_count: usize,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub presentation: PresentationExport,
    pub labs: Ordered<LabExport>,
    pub lab_grades: Ordered<&'static str>,
    pub lab_marks: Ordered<f64>,
    pub total_marks: f64,
    pub max_marks: f64,
    pub evaluation_date: String,
    pub feedback: String,
}

pub fn to_json(report: &MarkingReport) -> StructuredExport {
    let presentation = PresentationExport {
        grade: report.presentation.grade.label(),
        mark: report.presentation.mark,
        selected_issues: report.presentation.selected_ids.clone(),
        feedback: report.presentation.feedback.clone(),
    };

    let labs = report
        .units
        .iter()
        .map(|unit| {
            (
                unit.label.clone(),
                LabExport {
                    missing_criteria: unit.missing_items.clone(),
                    missing_count: unit.missing_count,
                    feedback: unit.feedback.clone(),
                },
            )
        })
        .collect();
    let lab_grades = report
        .units
        .iter()
        .map(|unit| (unit.label.clone(), unit.grade.label()))
        .collect();
    let lab_marks = report
        .units
        .iter()
        .map(|unit| (unit.label.clone(), unit.mark))
        .collect();

    StructuredExport {
        student_id: report.student_id.clone(),
        presentation,
        labs: Ordered(labs),
        lab_grades: Ordered(lab_grades),
        lab_marks: Ordered(lab_marks),
        total_marks: report.total_mark,
        max_marks: report.max_mark,
        evaluation_date: report.evaluated_at.format(ISO_FORMAT).to_string(),
        feedback: report.feedback_text(),
    }
}

pub fn to_json_string(report: &MarkingReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&to_json(report))?)
}
