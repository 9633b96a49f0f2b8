use serde::{Deserialize, Serialize};

/// How an untouched presentation checklist is graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPresentationPolicy {
    /// Nothing flagged means nothing wrong.
    #[default]
    Excellent,
    /// Nothing flagged is not gradeable and scores zero.
    NoSelection,
}

impl EmptyPresentationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "no_selection" | "no-selection" | "none" => Some(Self::NoSelection),
            _ => None,
        }
    }
}

/// Deployment-level switches for the grading rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingPolicy {
    #[serde(default)]
    pub empty_presentation: EmptyPresentationPolicy,
    /// A lab with no deficiencies only earns Excellent when the grader also confirms it.
    #[serde(default)]
    pub require_explicit_excellence_flag: bool,
}
