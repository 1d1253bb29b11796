//! The `giftbank list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use giftbank_core::parser::parse_file;

pub fn execute(file: PathBuf) -> Result<()> {
    let exam = parse_file(&file)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Type", "Title", "Answers", "Category"]);

    for (idx, q) in exam.questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(q.question_type),
            Cell::new(&q.title),
            Cell::new(q.answers.len()),
            Cell::new(
                q.category
                    .as_ref()
                    .map(|c| c.path())
                    .unwrap_or_default(),
            ),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", exam.len());

    Ok(())
}
