//! CSV score import.
//!
//! Turns an exported class/assessment table into per-subject criterion lists
//! and merges them into the roster. Parsing builds an [`ImportPlan`] without
//! touching the live document; only [`ImportPlan::apply`] mutates, and it is
//! meant to run after the user has confirmed.
//!
//! Expected row layout: column 0 is the class label (e.g. `"Mathematics
//! (Grade 8) B"`), columns 6 through 9 hold criteria A to D as `"7/8"` style
//! cells. The first line is a header.

use crate::error::ImportError;
use crate::model::{Criterion, CriterionScores, Subject, MAX_SCORE};

/// Class-label fragments and the subject they map to. Matching is a
/// case-sensitive substring test and the first hit wins, so order matters.
pub const SUBJECT_LABELS: [(&str, &str); 9] = [
    ("Chinese", "chn"),
    ("English", "eng"),
    ("Mathematics", "math"),
    ("Biology", "bio"),
    ("Physics", "phys"),
    ("Digital Design", "dd"),
    ("Product Design", "pd"),
    ("Physical and health", "phe"),
    ("Music", "mus"),
];

/// Rows with fewer fields are skipped.
pub const MIN_FIELDS: usize = 10;

/// Column holding criterion A; B..D follow.
pub const FIRST_CRITERION_FIELD: usize = 6;

/// Split one line into trimmed fields.
///
/// Commas inside double quotes do not split, and `""` yields a literal quote.
/// Quoted fields cannot span lines.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Map a free-text class label to a subject id.
pub fn resolve_subject(label: &str) -> Option<&'static str> {
    SUBJECT_LABELS
        .iter()
        .find(|(fragment, _)| label.contains(fragment))
        .map(|&(_, id)| id)
}

/// Read the score from a cell like `"7/8"`: the leading run of digits.
///
/// Returns `None` for empty cells, cells that do not start with a digit, and
/// values above the maximum score.
pub fn extract_score(cell: &str) -> Option<u8> {
    let digits_end = cell
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(cell.len());
    if digits_end == 0 {
        return None;
    }
    // Overflowing digit runs are out of range too.
    let value: u32 = cell[..digits_end].parse().ok()?;
    if value > u32::from(MAX_SCORE) {
        return None;
    }
    Some(value as u8)
}

/// Row-level bookkeeping for one import pass. Logged, never shown per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Non-blank data rows after the header.
    pub rows_seen: usize,
    /// Rows with fewer than [`MIN_FIELDS`] fields.
    pub rows_too_short: usize,
    /// Rows whose label matched no subject in the table or the roster.
    pub rows_unmatched: usize,
    /// Non-empty criterion cells that yielded no score.
    pub cells_rejected: usize,
}

/// Scores extracted from a CSV, waiting to be merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPlan {
    /// Scratch lists per roster subject, in roster order.
    scratch: Vec<(String, CriterionScores)>,
    processed: usize,
    stats: ImportStats,
}

impl ImportPlan {
    /// Total score entries extracted.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// Extracted lists for one subject, if it is on the roster.
    pub fn scores_for(&self, subject_id: &str) -> Option<&CriterionScores> {
        self.scratch
            .iter()
            .find(|(id, _)| id == subject_id)
            .map(|(_, scores)| scores)
    }

    /// Ids of the subjects the merge will replace.
    pub fn touched_subjects(&self) -> Vec<&str> {
        self.scratch
            .iter()
            .filter(|(_, scores)| !scores.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Prompt text shown before merging.
    pub fn confirmation_message(&self) -> String {
        format!(
            "Found valid grades for {} criteria entries. This will overwrite existing grades for matched subjects. Continue?",
            self.processed
        )
    }

    /// Merge into the roster and return the ids of the replaced subjects.
    ///
    /// A subject with at least one extracted entry has its whole criterion
    /// record replaced, so criteria absent from the CSV end up empty. Subjects
    /// with no extracted entries keep their existing scores.
    pub fn apply(self, subjects: &mut [Subject]) -> Vec<String> {
        let mut replaced = Vec::new();
        for (id, scores) in self.scratch {
            if scores.is_empty() {
                continue;
            }
            if let Some(subject) = subjects.iter_mut().find(|s| s.id == id) {
                subject.scores = scores;
                replaced.push(id);
            }
        }
        tracing::info!(subjects = ?replaced, "merged imported scores");
        replaced
    }
}

/// Parse CSV text against the current roster.
///
/// Malformed rows, unknown subjects and out-of-range cells are skipped
/// silently. Fails with [`ImportError::NoValidGrades`] when nothing usable
/// was found.
pub fn reconcile(text: &str, roster: &[Subject]) -> Result<ImportPlan, ImportError> {
    let mut scratch: Vec<(String, CriterionScores)> = roster
        .iter()
        .map(|s| (s.id.clone(), CriterionScores::default()))
        .collect();
    let mut processed = 0usize;
    let mut stats = ImportStats::default();

    for line in text.split('\n').skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.rows_seen += 1;

        let fields = parse_csv_line(line);
        if fields.len() < MIN_FIELDS {
            stats.rows_too_short += 1;
            tracing::debug!(fields = fields.len(), "skipping short CSV row");
            continue;
        }

        let label = &fields[0];
        let Some(target) = resolve_subject(label)
            .and_then(|id| scratch.iter_mut().find(|(sid, _)| sid == id))
        else {
            stats.rows_unmatched += 1;
            tracing::debug!(label = %label, "skipping CSV row with unknown subject");
            continue;
        };

        for (offset, criterion) in Criterion::ALL.into_iter().enumerate() {
            let cell = &fields[FIRST_CRITERION_FIELD + offset];
            if cell.is_empty() {
                continue;
            }
            match extract_score(cell) {
                Some(score) => {
                    target.1.get_mut(criterion).push(score);
                    processed += 1;
                }
                None => stats.cells_rejected += 1,
            }
        }
    }

    tracing::debug!(processed, ?stats, "CSV pass complete");

    if processed == 0 {
        return Err(ImportError::NoValidGrades);
    }

    Ok(ImportPlan {
        scratch,
        processed,
        stats,
    })
}
