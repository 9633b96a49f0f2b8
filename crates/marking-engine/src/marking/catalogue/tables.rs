use serde::Serialize;

use super::super::domain::Grade;

/// Grade to mark lookup for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkTable {
    entries: Vec<MarkEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkEntry {
    pub grade: Grade,
    pub mark: f64,
}

impl MarkTable {
    /// Entries are expected best-to-worst; the first one is the top mark.
    pub fn new(entries: Vec<(Grade, f64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(grade, mark)| MarkEntry { grade, mark })
                .collect(),
        }
    }

    pub fn presentation(excellent: f64, medium: f64, bad: f64) -> Self {
        Self::new(vec![
            (Grade::Excellent, excellent),
            (Grade::Medium, medium),
            (Grade::Bad, bad),
        ])
    }

    pub fn four_tier(excellent: f64, good: f64, average: f64, bad: f64) -> Self {
        Self::new(vec![
            (Grade::Excellent, excellent),
            (Grade::Good, good),
            (Grade::Average, average),
            (Grade::Bad, bad),
        ])
    }

    pub fn mark_for(&self, grade: Grade) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.grade == grade)
            .map(|entry| entry.mark)
    }

    pub fn top_mark(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.mark)
            .fold(0.0, f64::max)
    }

    pub fn entries(&self) -> &[MarkEntry] {
        &self.entries
    }
}

/// Upper-inclusive deficiency count bound for one interior band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandCut {
    pub max_count: usize,
    pub grade: Grade,
}

/// Maps deficiency counts strictly between zero and the bad threshold to a grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandTable {
    cuts: Vec<BandCut>,
    otherwise: Grade,
}

impl BandTable {
    pub fn new(cuts: Vec<BandCut>, otherwise: Grade) -> Self {
        Self { cuts, otherwise }
    }

    /// `1..=cut` is Good, anything above (and below the threshold) is Average.
    pub fn split(cut: usize) -> Self {
        Self::new(
            vec![BandCut {
                max_count: cut,
                grade: Grade::Good,
            }],
            Grade::Average,
        )
    }

    /// Three cuts over the interior; counts past the last cut fall to Bad.
    pub fn graded(excellent_max: usize, good_max: usize, average_max: usize) -> Self {
        Self::new(
            vec![
                BandCut {
                    max_count: excellent_max,
                    grade: Grade::Excellent,
                },
                BandCut {
                    max_count: good_max,
                    grade: Grade::Good,
                },
                BandCut {
                    max_count: average_max,
                    grade: Grade::Average,
                },
            ],
            Grade::Bad,
        )
    }

    pub fn grade_for(&self, count: usize) -> Grade {
        self.cuts
            .iter()
            .find(|cut| count <= cut.max_count)
            .map(|cut| cut.grade)
            .unwrap_or(self.otherwise)
    }

    pub fn cuts(&self) -> &[BandCut] {
        &self.cuts
    }

    pub fn otherwise(&self) -> Grade {
        self.otherwise
    }

    /// Every grade the table can hand out, in band order.
    pub fn grades(&self) -> impl Iterator<Item = Grade> + '_ {
        self.cuts
            .iter()
            .map(|cut| cut.grade)
            .chain(std::iter::once(self.otherwise))
    }
}
