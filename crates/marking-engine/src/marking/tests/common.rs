use chrono::{NaiveDate, NaiveDateTime};

use crate::marking::{
    Catalogue, GradingPolicy, MarkingEngine, MarkingRequest, Selection, UnitId, UnitSelection,
};

pub(super) fn engine() -> MarkingEngine {
    MarkingEngine::standard(GradingPolicy::default())
}

pub(super) fn engine_with(policy: GradingPolicy) -> MarkingEngine {
    MarkingEngine::standard(policy)
}

pub(super) fn evaluated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .expect("valid date")
        .and_hms_opt(14, 3, 9)
        .expect("valid time")
}

pub(super) fn selection(ids: &[&str]) -> Selection {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Ticks the first `count` deficiencies of a lab in the standard catalogue.
pub(super) fn first_deficiencies(unit: UnitId, count: usize) -> UnitSelection {
    let catalogue = Catalogue::standard();
    let rubric = catalogue.unit(unit).expect("lab exists in standard catalogue");
    UnitSelection::missing(rubric.deficiencies.iter().take(count).copied())
}

pub(super) fn request_with_counts(presentation: &[&str], counts: &[(u8, usize)]) -> MarkingRequest {
    MarkingRequest {
        student_id: Some("s1234567".to_string()),
        presentation: selection(presentation),
        units: counts
            .iter()
            .map(|&(unit, count)| (UnitId(unit), first_deficiencies(UnitId(unit), count)))
            .collect(),
    }
}

pub(super) fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
