use crate::infra::grade_icon;
use marking_engine::marking::{Catalogue, Grade, MarkTable, UnitRubric};
use std::fmt::Write as _;

pub(crate) fn run_scheme() {
    print!("{}", render_scheme(&Catalogue::standard()));
}

fn marks_line(marks: &MarkTable) -> String {
    marks
        .entries()
        .iter()
        .map(|entry| format!("{} {} ({})", grade_icon(entry.grade), entry.grade, entry.mark))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Count ranges per grade, e.g. `Good (1-2)`, ending with the bad threshold.
fn bands_line(unit: &UnitRubric) -> String {
    let mut parts = Vec::new();
    let mut lower = 0;
    let mut open_grade = Grade::Excellent;
    for cut in unit.bands.cuts() {
        if cut.grade == open_grade {
            parts.push(format!("{} ({}-{})", cut.grade, lower, cut.max_count));
        } else {
            if lower == 0 {
                parts.push(format!("{open_grade} (0)"));
                lower = 1;
            }
            parts.push(format!("{} ({}-{})", cut.grade, lower, cut.max_count));
        }
        lower = cut.max_count + 1;
        open_grade = cut.grade;
    }

    let otherwise = unit.bands.otherwise();
    let last = unit.bad_threshold - 1;
    if otherwise != Grade::Bad && lower <= last {
        parts.push(format!("{otherwise} ({lower}-{last})"));
    }
    parts.push(format!("Bad ({}+)", unit.bad_threshold));
    parts.join(" -> ")
}

pub(crate) fn render_scheme(catalogue: &Catalogue) -> String {
    let mut out = String::from("Marking scheme\n\n");

    let _ = writeln!(
        out,
        "Presentation: {}",
        marks_line(catalogue.presentation_marks())
    );
    out.push_str("  Bad criteria dominate; `excellent` must be selected on its own.\n\n");

    for unit in catalogue.units() {
        let _ = writeln!(
            out,
            "{} ({} criteria): {}",
            unit.label(),
            unit.deficiencies.len(),
            marks_line(&unit.marks)
        );
        let _ = writeln!(out, "  missing: {}", bands_line(unit));
    }

    let _ = writeln!(out, "\nTotal: {} marks", catalogue.max_mark());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use marking_engine::marking::UnitId;

    fn unit(id: u8) -> UnitRubric {
        Catalogue::standard()
            .unit(UnitId(id))
            .expect("lab in catalogue")
            .clone()
    }

    #[test]
    fn split_bands_describe_good_and_average() {
        assert_eq!(
            bands_line(&unit(1)),
            "Excellent (0) -> Good (1-2) -> Average (3-3) -> Bad (4+)"
        );
    }

    #[test]
    fn graded_bands_extend_excellent_past_zero() {
        assert_eq!(
            bands_line(&unit(6)),
            "Excellent (0-2) -> Good (3-10) -> Average (11-16) -> Bad (17+)"
        );
    }

    #[test]
    fn scheme_lists_every_lab_and_the_total() {
        let text = render_scheme(&Catalogue::standard());
        assert!(text.contains("Presentation: 🟢 Excellent (1.5) -> 🟡 Medium (0.8) -> 🔴 Bad (0.3)"));
        assert!(text.contains("Lab 8 (28 criteria): 🟢 Excellent (2.55)"));
        assert_eq!(text.matches("  missing: ").count(), 9);
        assert!(text.contains("\nTotal: "));
    }
}
