//! The `mypgrade add` command.

use anyhow::Result;

use mypgrade_core::grading::{criterion_average, final_grade, total_score};
use mypgrade_core::model::Criterion;
use mypgrade_core::validation::parse_score;

use super::Paths;

pub fn execute(
    paths: &Paths,
    subject_id: String,
    criterion: Criterion,
    score: String,
) -> Result<()> {
    let value = parse_score(&score)?;

    let (_, mut store) = paths.open()?;
    store.add_score(&subject_id, criterion, i64::from(value))?;
    store.save()?;

    if let Some(subject) = store.subject(&subject_id) {
        let entries = subject.scores.get(criterion);
        let total = total_score(&subject.scores);
        println!(
            "Added {value} to {} criterion {criterion} (attempt #{}).",
            subject.name,
            entries.len()
        );
        println!(
            "Criterion {criterion} average: {}. Total {total}/32, grade {}.",
            criterion_average(entries),
            final_grade(total)
        );
    }

    Ok(())
}
