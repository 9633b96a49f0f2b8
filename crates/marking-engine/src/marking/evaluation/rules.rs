use super::super::catalogue::UnitRubric;
use super::super::domain::{Grade, Selection, Severity};
use super::config::{EmptyPresentationPolicy, GradingPolicy};

/// Presentation rules, first match wins: bad criteria dominate, a lone `excellent`
/// is Excellent while `excellent` next to anything else is an invalid mix, any medium
/// criterion is Medium, and ids with no recognised severity are invalid.
pub(crate) fn classify_presentation(selected: &Selection, policy: &GradingPolicy) -> Grade {
    if selected.is_empty() {
        return match policy.empty_presentation {
            EmptyPresentationPolicy::Excellent => Grade::Excellent,
            EmptyPresentationPolicy::NoSelection => Grade::NoSelection,
        };
    }

    let severities: Vec<Option<Severity>> =
        selected.iter().map(|id| Severity::from_id(id)).collect();

    if severities.contains(&Some(Severity::Bad)) {
        return Grade::Bad;
    }

    if selected.contains(Severity::EXCELLENT_ID) {
        return if selected.len() == 1 {
            Grade::Excellent
        } else {
            Grade::InvalidSelection
        };
    }

    if severities.contains(&Some(Severity::Medium)) {
        return Grade::Medium;
    }

    Grade::InvalidSelection
}

/// Lab rules: zero deficiencies is the top tier, the bad threshold forces the bottom
/// tier, and everything in between is looked up in the lab's own band table.
///
/// Under the explicit-flag policy an unconfirmed Excellent drops to Good wherever it
/// comes from, including the first band of the four-tier labs.
pub(crate) fn classify_unit(
    unit: &UnitRubric,
    missing_count: usize,
    excellence_confirmed: bool,
    policy: &GradingPolicy,
) -> Grade {
    let grade = if missing_count == 0 {
        Grade::Excellent
    } else if missing_count >= unit.bad_threshold {
        Grade::Bad
    } else {
        unit.bands.grade_for(missing_count)
    };

    if grade == Grade::Excellent
        && policy.require_explicit_excellence_flag
        && !excellence_confirmed
    {
        return Grade::Good;
    }
    grade
}
