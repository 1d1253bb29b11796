//! The `giftbank export` command.

use std::path::PathBuf;

use anyhow::Result;

use giftbank_core::parser::parse_file;
use giftbank_core::writer;

pub fn execute(file: PathBuf, output: PathBuf) -> Result<()> {
    let exam = parse_file(&file)?;
    tracing::debug!("parsed {} question(s) from {}", exam.len(), file.display());

    writer::try_save(&exam, &output)?;
    println!(
        "Exported {} question(s) to {}",
        exam.len(),
        output.display()
    );

    Ok(())
}
