//! The `giftbank validate` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use giftbank_core::parser::parse_file;
use giftbank_core::validate::ValidationReport;

#[derive(Serialize)]
struct QuestionReport {
    position: usize,
    title: String,
    #[serde(flatten)]
    report: ValidationReport,
}

pub fn execute(file: PathBuf, format: String) -> Result<()> {
    let exam = parse_file(&file)?;

    let reports: Vec<QuestionReport> = exam
        .questions
        .iter()
        .enumerate()
        .map(|(idx, q)| QuestionReport {
            position: idx + 1,
            title: q.title.clone(),
            report: q.validate(),
        })
        .collect();

    let total_errors: usize = reports.iter().map(|r| r.report.errors.len()).sum();
    let total_warnings: usize = reports.iter().map(|r| r.report.warnings.len()).sum();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        _ => {
            // text format
            println!("Exam: {} ({} questions)", file.display(), exam.len());
            for r in &reports {
                for e in &r.report.errors {
                    println!("  [{}] ERROR: {e}", r.position);
                }
                for w in &r.report.warnings {
                    println!("  [{}] WARNING: {w}", r.position);
                }
            }
            if total_errors == 0 && total_warnings == 0 {
                println!("All questions valid.");
            } else {
                println!("\n{total_errors} error(s), {total_warnings} warning(s) found.");
            }
        }
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} validation error(s) found");
    }
    Ok(())
}
