//! The `mypgrade subject` command.

use anyhow::Result;

use mypgrade_core::grading::SubjectSummary;

use super::Paths;

pub fn execute(paths: &Paths, id: String) -> Result<()> {
    let (_, store) = paths.open()?;
    let subject = store.subject(&id).ok_or_else(|| {
        let known: Vec<&str> = store.subjects().iter().map(|s| s.id.as_str()).collect();
        anyhow::anyhow!("unknown subject '{id}'. Available: {}", known.join(", "))
    })?;
    let summary = SubjectSummary::from_subject(subject);

    println!(
        "{} ({}): total {}/32, grade {}",
        summary.name, summary.short_name, summary.total, summary.grade
    );

    for (criterion, entries) in subject.scores.iter() {
        let figures = summary
            .criteria
            .iter()
            .find(|c| c.criterion == criterion);
        println!();
        match figures {
            Some(f) if f.count > 0 => println!(
                "Criterion {criterion}: average {} (exact {:.1}) from {} score(s)",
                f.average, f.raw_average, f.count
            ),
            _ => println!("Criterion {criterion}: no scores yet"),
        }
        for (i, score) in entries.iter().enumerate() {
            println!("  #{}  {score}/8", i + 1);
        }
    }

    Ok(())
}
