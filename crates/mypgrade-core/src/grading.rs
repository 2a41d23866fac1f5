//! Criterion averaging, grade boundaries, and GPA.
//!
//! Every function here is total: empty lists, out-of-table totals and unknown
//! grades all resolve to a defined value instead of an error.

use serde::{Deserialize, Serialize};

use crate::model::{Criterion, CriterionScores, Subject};

/// One row of the grade boundary table. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeBoundary {
    pub grade: u8,
    pub min: u32,
    pub max: u32,
}

/// Highest possible total: four criteria at 8 each.
pub const MAX_TOTAL: u32 = 32;

/// Highest MYP grade.
pub const MAX_GRADE: u8 = 7;

/// MYP total-to-grade boundaries, partitioning `0..=32`.
pub const GRADE_BOUNDARIES: [GradeBoundary; 7] = [
    GradeBoundary { grade: 1, min: 0, max: 5 },
    GradeBoundary { grade: 2, min: 6, max: 9 },
    GradeBoundary { grade: 3, min: 10, max: 14 },
    GradeBoundary { grade: 4, min: 15, max: 18 },
    GradeBoundary { grade: 5, min: 19, max: 23 },
    GradeBoundary { grade: 6, min: 24, max: 27 },
    GradeBoundary { grade: 7, min: 28, max: 32 },
];

/// Mean of the entries rounded to the nearest integer, halves rounding up
/// (5.5 becomes 6). Empty lists average to 0.
pub fn criterion_average(scores: &[u8]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let n = scores.len() as u64;
    // floor(sum / n + 1/2), exact in integers
    ((2 * sum + n) / (2 * n)) as u32
}

/// Mean of the entries rounded to one decimal place, for display (e.g. 5.3).
/// Empty lists average to 0.0.
pub fn criterion_raw_average(scores: &[u8]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let n = scores.len() as u64;
    let tenths = (20 * sum + n) / (2 * n);
    tenths as f64 / 10.0
}

/// Sum of the four rounded criterion averages, in `0..=32` for valid entries.
pub fn total_score(scores: &CriterionScores) -> u32 {
    Criterion::ALL
        .iter()
        .map(|&c| criterion_average(scores.get(c)))
        .sum()
}

/// Look up the MYP grade for a total. Totals outside the table fall back to 1.
pub fn final_grade(total: u32) -> u8 {
    GRADE_BOUNDARIES
        .iter()
        .find(|b| total >= b.min && total <= b.max)
        .map(|b| b.grade)
        .unwrap_or(1)
}

/// Visual bucket for a grade. Grades 1 and 2 share the lowest bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeCategory {
    G7,
    G6,
    G5,
    G4,
    G3,
    #[serde(rename = "G1-2")]
    G1To2,
}

impl GradeCategory {
    /// Bucket for any grade; anything outside 3..=7 lands in the lowest one.
    pub fn from_grade(grade: u8) -> Self {
        match grade {
            7 => GradeCategory::G7,
            6 => GradeCategory::G6,
            5 => GradeCategory::G5,
            4 => GradeCategory::G4,
            3 => GradeCategory::G3,
            _ => GradeCategory::G1To2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeCategory::G7 => "7",
            GradeCategory::G6 => "6",
            GradeCategory::G5 => "5",
            GradeCategory::G4 => "4",
            GradeCategory::G3 => "3",
            GradeCategory::G1To2 => "1-2",
        }
    }

    /// Chart colour for the bucket.
    pub fn hex_color(&self) -> &'static str {
        match self {
            GradeCategory::G7 => "#6ee7b7",
            GradeCategory::G6 => "#5eead4",
            GradeCategory::G5 => "#93c5fd",
            GradeCategory::G4 => "#fcd34d",
            GradeCategory::G3 => "#fdba74",
            GradeCategory::G1To2 => "#fda4af",
        }
    }
}

/// Mean final grade across subjects. An empty roster yields 0.0.
pub fn gpa(subjects: &[Subject]) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }
    let points: u32 = subjects
        .iter()
        .map(|s| u32::from(final_grade(total_score(&s.scores))))
        .sum();
    points as f64 / subjects.len() as f64
}

/// Derived figures for one criterion of one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSummary {
    pub criterion: Criterion,
    pub average: u32,
    pub raw_average: f64,
    pub count: usize,
}

/// Derived figures for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub id: String,
    pub short_name: String,
    pub name: String,
    pub criteria: Vec<CriterionSummary>,
    pub total: u32,
    pub grade: u8,
    pub category: GradeCategory,
}

impl SubjectSummary {
    pub fn from_subject(subject: &Subject) -> Self {
        let criteria = subject
            .scores
            .iter()
            .map(|(criterion, entries)| CriterionSummary {
                criterion,
                average: criterion_average(entries),
                raw_average: criterion_raw_average(entries),
                count: entries.len(),
            })
            .collect();
        let total = total_score(&subject.scores);
        let grade = final_grade(total);
        Self {
            id: subject.id.clone(),
            short_name: subject.short_name(),
            name: subject.name.clone(),
            criteria,
            total,
            grade,
            category: GradeCategory::from_grade(grade),
        }
    }
}

/// Whole-document overview: per-subject grades plus GPA and grade points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub subjects: Vec<SubjectSummary>,
    /// Sum of final grades.
    pub total_points: u32,
    /// `7 * subject count`.
    pub max_points: u32,
    pub gpa: f64,
}

impl Dashboard {
    /// Fraction of the maximum grade points earned, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.max_points == 0 {
            return 0.0;
        }
        self.total_points as f64 / self.max_points as f64
    }
}

/// Build the dashboard for a subject list.
pub fn summarize(subjects: &[Subject]) -> Dashboard {
    let summaries: Vec<SubjectSummary> = subjects
        .iter()
        .map(SubjectSummary::from_subject)
        .collect();
    let total_points: u32 = summaries.iter().map(|s| u32::from(s.grade)).sum();
    Dashboard {
        max_points: u32::from(MAX_GRADE) * summaries.len() as u32,
        total_points,
        gpa: gpa(subjects),
        subjects: summaries,
    }
}
