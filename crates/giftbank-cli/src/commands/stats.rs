//! The `giftbank stats` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use giftbank_core::model::{MAX_EXPORT_QUESTIONS, MIN_EXPORT_QUESTIONS};
use giftbank_core::parser::parse_file;

pub fn execute(file: PathBuf) -> Result<()> {
    let exam = parse_file(&file)?;

    let mut per_type: BTreeMap<String, usize> = BTreeMap::new();
    for q in &exam.questions {
        *per_type.entry(q.question_type.to_string()).or_default() += 1;
    }

    let mut table = Table::new();
    table.set_header(vec!["Type", "Count"]);
    for (kind, count) in &per_type {
        table.add_row(vec![Cell::new(kind), Cell::new(count)]);
    }

    println!("{table}");
    println!("Total: {} question(s)", exam.len());
    println!("Estimated duration: {} minute(s)", exam.estimated_minutes());
    if exam.is_valid() {
        println!("Export gate: ok ({MIN_EXPORT_QUESTIONS}-{MAX_EXPORT_QUESTIONS} questions)");
    } else {
        println!(
            "Export gate: blocked ({} questions, requires {MIN_EXPORT_QUESTIONS}-{MAX_EXPORT_QUESTIONS})",
            exam.len()
        );
    }

    Ok(())
}
