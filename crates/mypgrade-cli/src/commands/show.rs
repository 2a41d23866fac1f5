//! The `mypgrade show` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mypgrade_core::grading::Dashboard;

use super::Paths;

pub fn execute(paths: &Paths, format: String) -> Result<()> {
    let (_, store) = paths.open()?;
    let dashboard = store.dashboard();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        "text" => print_dashboard(&dashboard),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    let mut table = Table::new();
    table.set_header(vec!["Subject", "", "A", "B", "C", "D", "Total", "Grade"]);

    for subject in &dashboard.subjects {
        let mut row = vec![Cell::new(&subject.short_name), Cell::new(&subject.name)];
        for criterion in &subject.criteria {
            row.push(if criterion.count == 0 {
                Cell::new("-")
            } else {
                Cell::new(criterion.average)
            });
        }
        row.push(Cell::new(format!("{}/32", subject.total)));
        row.push(Cell::new(subject.grade));
        table.add_row(row);
    }

    println!("{table}");
    println!();
    println!("GPA: {:.2} out of 7.00", dashboard.gpa);
    println!(
        "Total points: {}/{} ({:.1}%)",
        dashboard.total_points,
        dashboard.max_points,
        dashboard.progress() * 100.0
    );
    println!("{} subjects active", dashboard.subjects.len());
}
