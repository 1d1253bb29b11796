//! Canonical GIFT emission and file export.
//!
//! The writer is the inverse of the parser for exactly one textual form: it
//! canonicalizes rather than echoes, so re-parsing its output always works
//! but byte-reproducing an arbitrary lenient source is not a goal.

use std::path::Path;

use crate::error::ExportError;
use crate::model::{Exam, Question, QuestionType, TextFormat};

impl Question {
    /// Render this question in canonical GIFT form.
    pub fn to_gift(&self) -> String {
        let mut out = String::new();

        if let Some(category) = &self.category {
            out.push_str(&format!("$CATEGORY: {}\n\n", category.path()));
        }

        if !self.title.is_empty() {
            out.push_str(&format!("::{}::", self.title));
        }

        if self.format != TextFormat::Moodle {
            out.push_str(&format!("[{}]", self.format));
        }

        out.push_str(&self.text);

        // A description is all statement, no answer block.
        if self.question_type == QuestionType::Description {
            return out;
        }

        out.push_str(" {");
        match self.question_type {
            QuestionType::TrueFalse => {
                let is_true = self.answers.first().is_some_and(|a| a.is_correct);
                out.push_str(if is_true { "TRUE" } else { "FALSE" });
            }
            QuestionType::MultipleChoice | QuestionType::ShortAnswer => {
                for answer in &self.answers {
                    let prefix = if answer.is_correct { '=' } else { '~' };
                    out.push_str(&format!("\n\t{prefix}{}", answer.text));
                    if let Some(feedback) =
                        answer.feedback.as_deref().filter(|f| !f.is_empty())
                    {
                        out.push_str(&format!("#{feedback}"));
                    }
                }
            }
            QuestionType::Matching => {
                for answer in &self.answers {
                    let right = answer.match_text.as_deref().unwrap_or_default();
                    out.push_str(&format!("\n\t={} -> {right}", answer.text));
                }
            }
            QuestionType::Numerical => {
                if let Some(answer) = self.answers.first() {
                    out.push_str(&format!("#{}", answer.text));
                }
            }
            // Essay bodies are empty; descriptions returned above.
            QuestionType::Essay | QuestionType::Description => {}
        }
        out.push_str("\n}");

        out
    }
}

impl Exam {
    /// Render every question, blank-line separated, in insertion order.
    pub fn to_gift(&self) -> String {
        self.questions
            .iter()
            .map(Question::to_gift)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Render and write `exam` to `path`, enforcing the export cardinality
/// gate. Nothing is written unless the gate passes.
pub fn try_save(exam: &Exam, path: &Path) -> Result<(), ExportError> {
    if !exam.is_valid() {
        return Err(ExportError::CardinalityOutOfRange { count: exam.len() });
    }
    std::fs::write(path, exam.to_gift()).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Boolean-boundary wrapper over [`try_save`]: logs the failure and reports
/// `false` instead of an error. Callers that need the reason use
/// [`try_save`] directly.
pub fn save(exam: &Exam, path: &Path) -> bool {
    match try_save(exam, path) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("export failed: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, Category};
    use crate::parser::parse_str;
    use std::sync::Arc;

    fn question(kind: QuestionType, answers: Vec<AnswerOption>) -> Question {
        let mut q = Question::new("Title", "Statement", kind);
        q.answers = answers;
        q
    }

    #[test]
    fn multiple_choice_one_line_per_answer() {
        let mut right = AnswerOption::new("Paris", true);
        right.feedback = Some("Well done".into());
        let q = question(
            QuestionType::MultipleChoice,
            vec![right, AnswerOption::new("London", false)],
        );
        assert_eq!(
            q.to_gift(),
            "::Title::Statement {\n\t=Paris#Well done\n\t~London\n}"
        );
    }

    #[test]
    fn empty_feedback_is_not_emitted() {
        let mut answer = AnswerOption::new("Paris", true);
        answer.feedback = Some(String::new());
        let q = question(QuestionType::ShortAnswer, vec![answer]);
        assert_eq!(q.to_gift(), "::Title::Statement {\n\t=Paris\n}");
    }

    #[test]
    fn true_false_uses_first_answer() {
        let q = question(
            QuestionType::TrueFalse,
            vec![
                AnswerOption::new("True", true),
                AnswerOption::new("False", false),
            ],
        );
        assert_eq!(q.to_gift(), "::Title::Statement {TRUE\n}");

        let q = question(
            QuestionType::TrueFalse,
            vec![
                AnswerOption::new("True", false),
                AnswerOption::new("False", true),
            ],
        );
        assert_eq!(q.to_gift(), "::Title::Statement {FALSE\n}");
    }

    #[test]
    fn matching_pairs_with_arrow() {
        let q = question(
            QuestionType::Matching,
            vec![
                AnswerOption::pair("Paris", "France"),
                AnswerOption::pair("Rome", "Italy"),
            ],
        );
        assert_eq!(
            q.to_gift(),
            "::Title::Statement {\n\t=Paris -> France\n\t=Rome -> Italy\n}"
        );
    }

    #[test]
    fn numerical_is_inline() {
        let q = question(
            QuestionType::Numerical,
            vec![AnswerOption::new("3.14", true)],
        );
        assert_eq!(q.to_gift(), "::Title::Statement {#3.14\n}");
    }

    #[test]
    fn essay_body_is_empty() {
        let q = question(QuestionType::Essay, Vec::new());
        assert_eq!(q.to_gift(), "::Title::Statement {\n}");
    }

    #[test]
    fn description_has_no_brace_block() {
        let q = question(QuestionType::Description, Vec::new());
        assert_eq!(q.to_gift(), "::Title::Statement");
    }

    #[test]
    fn untitled_question_omits_marker() {
        let mut q = question(QuestionType::Essay, Vec::new());
        q.title = String::new();
        assert_eq!(q.to_gift(), "Statement {\n}");
    }

    #[test]
    fn non_moodle_format_is_tagged() {
        let mut q = question(QuestionType::Essay, Vec::new());
        q.format = TextFormat::Markdown;
        assert_eq!(q.to_gift(), "::Title::[markdown]Statement {\n}");
    }

    #[test]
    fn category_line_precedes_question() {
        let mut q = question(QuestionType::Essay, Vec::new());
        q.category = Some(Arc::new(Category::new(
            "Unit 3",
            Some(Arc::new(Category::new("top", None))),
        )));
        assert_eq!(
            q.to_gift(),
            "$CATEGORY: top/Unit 3\n\n::Title::Statement {\n}"
        );
    }

    #[test]
    fn exam_questions_are_blank_line_separated() {
        let mut exam = Exam::new();
        exam.add_question(question(QuestionType::Essay, Vec::new()));
        let mut second = question(QuestionType::Essay, Vec::new());
        second.text = "Another statement".into();
        exam.add_question(second);

        let rendered = exam.to_gift();
        assert!(rendered.contains("\n}\n\n::Title::"));
        assert_eq!(parse_str(&rendered).len(), 2);
    }

    fn regulation_exam() -> Exam {
        let mut exam = Exam::new();
        for i in 0..15 {
            let mut q = Question::new(
                format!("Q{i}"),
                format!("Question number {i}"),
                QuestionType::MultipleChoice,
            );
            q.answers = vec![
                AnswerOption::new(format!("right {i}"), true),
                AnswerOption::new(format!("wrong {i}"), false),
            ];
            exam.add_question(q);
        }
        exam
    }

    #[test]
    fn save_refuses_undersized_exam() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gift");

        let mut exam = Exam::new();
        exam.add_question(question(QuestionType::Essay, Vec::new()));

        assert!(!save(&exam, &path));
        assert!(!path.exists());

        let err = try_save(&exam, &path).unwrap_err();
        assert!(err.is_gate());
    }

    #[test]
    fn save_writes_regulation_exam() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gift");

        let exam = regulation_exam();
        assert!(save(&exam, &path));

        let written = std::fs::read_to_string(&path).unwrap();
        for i in 0..15 {
            assert!(written.contains(&format!("::Q{i}::")));
        }
        assert_eq!(parse_str(&written).len(), 15);
    }

    #[test]
    fn save_reports_io_failure() {
        let exam = regulation_exam();
        let path = Path::new("no/such/dir/out.gift");
        assert!(!save(&exam, path));

        let err = try_save(&exam, path).unwrap_err();
        assert!(!err.is_gate());
    }
}
