//! Static rubric data: presentation criteria, per-lab deficiency lists, band tables and
//! mark tables. A [`Catalogue`] is validated once at construction and never mutated.

mod standard;
mod tables;

pub use tables::{BandCut, BandTable, MarkEntry, MarkTable};

use std::collections::HashSet;

use serde::Serialize;

use super::domain::{Grade, MarkingRequest, Selection, Severity, UnitId};

/// One checkable presentation statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationCriterion {
    pub id: &'static str,
    pub description: &'static str,
}

impl PresentationCriterion {
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_id(self.id)
    }
}

/// Deficiency list and grading tables for a single lab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRubric {
    pub id: UnitId,
    pub deficiencies: Vec<&'static str>,
    pub bad_threshold: usize,
    pub bands: BandTable,
    pub marks: MarkTable,
}

impl UnitRubric {
    pub fn label(&self) -> String {
        self.id.label()
    }

    /// Selected deficiencies in declaration order; unknown entries are dropped.
    pub fn ordered_missing<'a>(&'a self, selected: &Selection) -> Vec<&'a str> {
        self.deficiencies
            .iter()
            .copied()
            .filter(|item| selected.contains(*item))
            .collect()
    }

    fn reachable_grades(&self) -> impl Iterator<Item = Grade> + '_ {
        [Grade::Excellent, Grade::Bad]
            .into_iter()
            .chain(self.bands.grades())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogueError {
    #[error("catalogue declares no labs")]
    NoUnits,
    #[error("{unit} is declared more than once")]
    DuplicateUnit { unit: UnitId },
    #[error("presentation criterion `{id}` is declared more than once")]
    DuplicatePresentationCriterion { id: &'static str },
    #[error("presentation criterion `{id}` does not start with excellent, medium_ or bad_")]
    UnknownSeverity { id: &'static str },
    #[error("{unit} lists `{item}` more than once")]
    DuplicateDeficiency { unit: UnitId, item: &'static str },
    #[error("{unit} bad threshold {threshold} must be between 1 and {criteria}")]
    InvalidThreshold {
        unit: UnitId,
        threshold: usize,
        criteria: usize,
    },
    #[error("{unit} band cut {max_count} must increase and stay below the bad threshold {threshold}")]
    InvalidBand {
        unit: UnitId,
        max_count: usize,
        threshold: usize,
    },
    #[error("{unit} band grades must not improve as deficiencies grow")]
    BandOrder { unit: UnitId },
    #[error("{category} mark table has no entry for {grade}")]
    MissingMark { category: String, grade: Grade },
}

/// Raised at the boundary when a request names criteria the catalogue does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown presentation criterion `{0}`")]
    UnknownPresentationCriterion(String),
    #[error("{0} is not part of the catalogue")]
    UnknownUnit(UnitId),
    #[error("{unit} has no deficiency `{item}`")]
    UnknownDeficiency { unit: UnitId, item: String },
}

/// The full marking rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalogue {
    presentation: Vec<PresentationCriterion>,
    presentation_marks: MarkTable,
    units: Vec<UnitRubric>,
}

impl Catalogue {
    pub fn new(
        presentation: Vec<PresentationCriterion>,
        presentation_marks: MarkTable,
        units: Vec<UnitRubric>,
    ) -> Result<Self, CatalogueError> {
        validate_presentation(&presentation, &presentation_marks)?;

        if units.is_empty() {
            return Err(CatalogueError::NoUnits);
        }

        let mut seen = HashSet::new();
        for unit in &units {
            if !seen.insert(unit.id) {
                return Err(CatalogueError::DuplicateUnit { unit: unit.id });
            }
            validate_unit(unit)?;
        }

        Ok(Self {
            presentation,
            presentation_marks,
            units,
        })
    }

    /// The nine-lab rubric used for the cloud computing lab portfolio.
    pub fn standard() -> Self {
        standard::catalogue()
    }

    pub fn presentation_criteria(&self) -> &[PresentationCriterion] {
        &self.presentation
    }

    pub fn presentation_marks(&self) -> &MarkTable {
        &self.presentation_marks
    }

    pub fn presentation_description(&self, id: &str) -> Option<&'static str> {
        self.presentation
            .iter()
            .find(|criterion| criterion.id == id)
            .map(|criterion| criterion.description)
    }

    /// Selected presentation criteria in declaration order.
    pub fn ordered_presentation<'a>(
        &'a self,
        selected: &Selection,
    ) -> Vec<&'a PresentationCriterion> {
        self.presentation
            .iter()
            .filter(|criterion| selected.contains(criterion.id))
            .collect()
    }

    pub fn units(&self) -> &[UnitRubric] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitRubric> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Best attainable total, derived from the mark tables.
    pub fn max_mark(&self) -> f64 {
        self.units
            .iter()
            .fold(self.presentation_marks.top_mark(), |total, unit| {
                total + unit.marks.top_mark()
            })
    }

    pub fn validate_request(&self, request: &MarkingRequest) -> Result<(), SelectionError> {
        if let Some(unknown) = request
            .presentation
            .iter()
            .find(|id| self.presentation_description(id).is_none())
        {
            return Err(SelectionError::UnknownPresentationCriterion(
                unknown.clone(),
            ));
        }

        for (unit_id, selection) in &request.units {
            let unit = self
                .unit(*unit_id)
                .ok_or(SelectionError::UnknownUnit(*unit_id))?;
            if let Some(item) = selection
                .missing
                .iter()
                .find(|item| !unit.deficiencies.iter().any(|known| *known == item.as_str()))
            {
                return Err(SelectionError::UnknownDeficiency {
                    unit: *unit_id,
                    item: item.clone(),
                });
            }
        }

        Ok(())
    }
}

fn validate_presentation(
    criteria: &[PresentationCriterion],
    marks: &MarkTable,
) -> Result<(), CatalogueError> {
    let mut seen = HashSet::new();
    for criterion in criteria {
        if !seen.insert(criterion.id) {
            return Err(CatalogueError::DuplicatePresentationCriterion { id: criterion.id });
        }
        if criterion.severity().is_none() {
            return Err(CatalogueError::UnknownSeverity { id: criterion.id });
        }
    }

    for grade in [Grade::Excellent, Grade::Medium, Grade::Bad] {
        if marks.mark_for(grade).is_none() {
            return Err(CatalogueError::MissingMark {
                category: "Presentation".to_string(),
                grade,
            });
        }
    }

    Ok(())
}

fn validate_unit(unit: &UnitRubric) -> Result<(), CatalogueError> {
    let mut seen = HashSet::new();
    for item in &unit.deficiencies {
        if !seen.insert(*item) {
            return Err(CatalogueError::DuplicateDeficiency {
                unit: unit.id,
                item: *item,
            });
        }
    }

    if unit.bad_threshold == 0 || unit.bad_threshold > unit.deficiencies.len() {
        return Err(CatalogueError::InvalidThreshold {
            unit: unit.id,
            threshold: unit.bad_threshold,
            criteria: unit.deficiencies.len(),
        });
    }

    let mut previous = 0;
    for cut in unit.bands.cuts() {
        if cut.max_count <= previous || cut.max_count >= unit.bad_threshold {
            return Err(CatalogueError::InvalidBand {
                unit: unit.id,
                max_count: cut.max_count,
                threshold: unit.bad_threshold,
            });
        }
        previous = cut.max_count;
    }

    let ranks: Option<Vec<u8>> = unit.bands.grades().map(Grade::rank).collect();
    match ranks {
        Some(ranks) if ranks.windows(2).all(|pair| pair[0] >= pair[1]) => {}
        _ => return Err(CatalogueError::BandOrder { unit: unit.id }),
    }

    if let Some(grade) = unit
        .reachable_grades()
        .find(|grade| unit.marks.mark_for(*grade).is_none())
    {
        return Err(CatalogueError::MissingMark {
            category: unit.label(),
            grade,
        });
    }

    Ok(())
}
