use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal grade awarded to a category, plus the advisory states a pass can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    Average,
    Medium,
    Bad,
    NoSelection,
    InvalidSelection,
    Unknown,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Medium => "Medium",
            Self::Bad => "Bad",
            Self::NoSelection => "No Selection",
            Self::InvalidSelection => "No Valid Selection",
            Self::Unknown => "Unknown",
        }
    }

    /// Position on the quality scale; higher is better. Advisory states have no rank.
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Excellent => Some(3),
            Self::Good => Some(2),
            Self::Average | Self::Medium => Some(1),
            Self::Bad => Some(0),
            Self::NoSelection | Self::InvalidSelection | Self::Unknown => None,
        }
    }

    pub const fn is_gradeable(self) -> bool {
        self.rank().is_some()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity encoded in a presentation criterion id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Excellent,
    Medium,
    Bad,
}

impl Severity {
    pub const EXCELLENT_ID: &'static str = "excellent";
    const MEDIUM_PREFIX: &'static str = "medium_";
    const BAD_PREFIX: &'static str = "bad_";

    pub fn from_id(id: &str) -> Option<Self> {
        if id == Self::EXCELLENT_ID {
            Some(Self::Excellent)
        } else if id.starts_with(Self::MEDIUM_PREFIX) {
            Some(Self::Medium)
        } else if id.starts_with(Self::BAD_PREFIX) {
            Some(Self::Bad)
        } else {
            None
        }
    }
}

/// 1-based lab number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u8);

impl UnitId {
    pub fn label(self) -> String {
        format!("Lab {}", self.0)
    }

    /// Prefix used for tabular export columns, e.g. `Lab3`.
    pub fn column_prefix(self) -> String {
        format!("Lab{}", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lab {}", self.0)
    }
}

/// Criterion ids (presentation) or deficiency descriptions (labs) ticked in one pass.
pub type Selection = BTreeSet<String>;

/// Grader input for a single lab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection {
    #[serde(default)]
    pub missing: Selection,
    /// Only consulted when the explicit-excellence policy is enabled.
    #[serde(default)]
    pub excellence_confirmed: bool,
}

impl UnitSelection {
    pub fn missing<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            missing: items.into_iter().map(Into::into).collect(),
            excellence_confirmed: false,
        }
    }

    pub fn confirmed_excellent() -> Self {
        Self {
            missing: Selection::new(),
            excellence_confirmed: true,
        }
    }
}

/// Everything the grader selected for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub presentation: Selection,
    /// Labs absent from the map are treated as having nothing ticked.
    #[serde(default)]
    pub units: BTreeMap<UnitId, UnitSelection>,
}

impl MarkingRequest {
    pub fn unit_selection(&self, unit: UnitId) -> Option<&UnitSelection> {
        self.units.get(&unit)
    }
}
