//! The `mypgrade boundaries` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use mypgrade_core::grading::{GradeCategory, GRADE_BOUNDARIES};

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Grade", "Total", "Colour"]);

    for boundary in &GRADE_BOUNDARIES {
        let category = GradeCategory::from_grade(boundary.grade);
        table.add_row(vec![
            Cell::new(boundary.grade),
            Cell::new(format!("{}-{}", boundary.min, boundary.max)),
            Cell::new(category.hex_color()),
        ]);
    }

    println!("{table}");
    Ok(())
}
