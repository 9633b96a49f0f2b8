use serde::{Deserialize, Serialize};

use super::super::domain::Grade;

/// Whether a feedback sentence that lists reasons ends with a full stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    /// Presentation descriptions carry their own punctuation.
    Never,
    Always,
    /// Lines in the combined summary drop the stop once the list needs an Oxford comma.
    UpToTwoItems,
}

impl Terminator {
    fn applies_to(self, item_count: usize) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::UpToTwoItems => item_count <= 2,
        }
    }
}

/// Builds `The <subject> is <grade> because <reasons>` with an Oxford-style list.
///
/// Every reason is lowercased verbatim, acronyms included.
pub fn synthesize<S: AsRef<str>>(
    subject: &str,
    grade: Grade,
    items: &[S],
    terminator: Terminator,
) -> String {
    let grade = grade.label().to_lowercase();

    let reasons = match items {
        [] => return format!("The {subject} is {grade}."),
        [only] => only.as_ref().to_lowercase(),
        [first, second] => format!(
            "{} and {}",
            first.as_ref().to_lowercase(),
            second.as_ref().to_lowercase()
        ),
        [head @ .., last] => {
            let head: Vec<String> = head
                .iter()
                .map(|item| item.as_ref().to_lowercase())
                .collect();
            format!("{}, and {}", head.join(", "), last.as_ref().to_lowercase())
        }
    };

    let stop = if terminator.applies_to(items.len()) {
        "."
    } else {
        ""
    };
    format!("The {subject} is {grade} because {reasons}{stop}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reasons_always_end_with_a_stop() {
        let items: [&str; 0] = [];
        assert_eq!(
            synthesize("presentation", Grade::Excellent, &items, Terminator::Never),
            "The presentation is excellent."
        );
    }

    #[test]
    fn advisory_labels_are_lowercased_whole() {
        let items: [&str; 0] = [];
        assert_eq!(
            synthesize(
                "presentation",
                Grade::InvalidSelection,
                &items,
                Terminator::Never
            ),
            "The presentation is no valid selection."
        );
    }

    #[test]
    fn two_reasons_are_joined_with_and() {
        let sentence = synthesize(
            "description",
            Grade::Good,
            &["Evidence is missing", "The AWS CLI code is missing"],
            Terminator::Always,
        );
        assert_eq!(
            sentence,
            "The description is good because evidence is missing and the aws cli code is missing."
        );
    }

    #[test]
    fn summary_lines_drop_the_stop_for_long_lists() {
        let sentence = synthesize(
            "description",
            Grade::Average,
            &["A", "B", "C"],
            Terminator::UpToTwoItems,
        );
        assert_eq!(sentence, "The description is average because a, b, and c");
    }
}
