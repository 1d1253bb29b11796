//! Structural validation of individual questions.
//!
//! Validation is pure and purely advisory: it never blocks parsing or
//! in-memory edits. Errors mark a question structurally unusable; warnings
//! flag quality issues and never affect validity.

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionType};

/// Outcome of validating one question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Structural problems; any entry makes the question invalid.
    pub errors: Vec<String>,
    /// Quality advisories.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// `true` when no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Question {
    /// Check type-specific structural well-formedness.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.text.trim().is_empty() {
            report.errors.push("question text cannot be empty".into());
        }

        match self.question_type {
            QuestionType::MultipleChoice => {
                if self.answers.len() < 2 {
                    report
                        .errors
                        .push("multiple choice must have at least 2 answers".into());
                }
                if self.correct_answers().next().is_none() {
                    report
                        .errors
                        .push("multiple choice must have at least 1 correct answer".into());
                }
                if self.answers.len() < 3 {
                    report.warnings.push(
                        "multiple choice should have at least 3 options for better quality"
                            .into(),
                    );
                }
                if self
                    .answers
                    .iter()
                    .all(|a| a.feedback.as_deref().unwrap_or_default().is_empty())
                {
                    report
                        .warnings
                        .push("consider adding feedback to help students learn".into());
                }
            }
            QuestionType::TrueFalse => {
                if self.answers.is_empty() {
                    report
                        .errors
                        .push("true/false must have an answer defined".into());
                }
            }
            QuestionType::ShortAnswer => {
                if self.correct_answers().next().is_none() {
                    report
                        .errors
                        .push("short answer must have at least 1 correct answer".into());
                }
            }
            QuestionType::Numerical => {
                if self.answers.is_empty() {
                    report
                        .errors
                        .push("numerical question must have an answer".into());
                } else if self.answers.len() > 1 {
                    report
                        .warnings
                        .push("numerical question should have only 1 answer".into());
                }
                // Only the first answer is checked; an empty text is skipped.
                let first_text = self.answers.first().map(|a| a.text.as_str());
                if let Some(text) = first_text.filter(|t| !t.is_empty()) {
                    if text.trim().parse::<f64>().is_err() {
                        report
                            .errors
                            .push("numerical answer must be a valid number".into());
                    }
                }
            }
            QuestionType::Matching => {
                if self.answers.len() < 2 {
                    report
                        .errors
                        .push("matching question must have at least 2 pairs".into());
                }
                if self
                    .answers
                    .iter()
                    .any(|a| a.match_text.as_deref().unwrap_or_default().is_empty())
                {
                    report
                        .errors
                        .push("all matching pairs must have both left and right sides".into());
                }
            }
            QuestionType::Essay | QuestionType::Description => {}
        }

        report
    }
}
