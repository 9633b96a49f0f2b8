use super::super::domain::Grade;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub grade: Grade,
    pub grade_label: &'static str,
    pub mark: f64,
    pub max_mark: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeCountEntry {
    pub grade: Grade,
    pub grade_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkingSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub rows: Vec<CategoryRow>,
    pub grade_counts: Vec<GradeCountEntry>,
    pub total_mark: f64,
    pub max_mark: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
    pub evaluation_date: String,
}
