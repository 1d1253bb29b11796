//! Core data model types for giftbank.
//!
//! These are the fundamental types the entire giftbank system uses to
//! represent questions, answer options, categories, and exams.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Lower bound of the export cardinality gate.
pub const MIN_EXPORT_QUESTIONS: usize = 15;
/// Upper bound of the export cardinality gate.
pub const MAX_EXPORT_QUESTIONS: usize = 20;

/// The question kinds the GIFT dialect can express.
///
/// Exactly one tag per question; it selects the serialization branch and
/// the validation rules that apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Matching,
    Numerical,
    Essay,
    /// Informational text, not a graded question.
    Description,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::Matching => "matching",
            QuestionType::Numerical => "numerical",
            QuestionType::Essay => "essay",
            QuestionType::Description => "description",
        };
        f.write_str(name)
    }
}

/// Format tag a question block may carry (e.g. `[html]`).
///
/// Only non-moodle tags are emitted on serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Moodle,
    Html,
    Markdown,
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextFormat::Moodle => "moodle",
            TextFormat::Html => "html",
            TextFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

impl FromStr for TextFormat {
    type Err = String;

    // Tags are case-sensitive in the dialect.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moodle" => Ok(TextFormat::Moodle),
            "html" => Ok(TextFormat::Html),
            "markdown" => Ok(TextFormat::Markdown),
            other => Err(format!("unknown format tag: {other}")),
        }
    }
}

/// A node in the parent-chained category hierarchy
/// (e.g. `$course$/top/Unit 3`).
///
/// Categories are immutable once built and shared between questions via
/// [`Arc`]; traversal is always child-to-root, so no cycle can be formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// This node's own path segment.
    pub name: String,
    /// The enclosing category, if any.
    pub parent: Option<Arc<Category>>,
}

impl Category {
    pub fn new(name: impl Into<String>, parent: Option<Arc<Category>>) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }

    /// Full `/`-separated path from the root to this node.
    pub fn path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}/{}", parent.path(), self.name),
            None => self.name.clone(),
        }
    }
}

/// One candidate answer of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Answer text (left-hand side for matching pairs).
    pub text: String,
    /// Whether this answer is correct.
    pub is_correct: bool,
    /// Feedback shown when this answer is chosen.
    #[serde(default)]
    pub feedback: Option<String>,
    /// Partial-credit percentage (`%50%`); a weight of 100 implies
    /// correctness.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Right-hand side of a matching pair.
    #[serde(default)]
    pub match_text: Option<String>,
}

impl AnswerOption {
    /// A plain correct/incorrect answer with no annotations.
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
            feedback: None,
            weight: None,
            match_text: None,
        }
    }

    /// A matching pair `left -> right`.
    pub fn pair(text: impl Into<String>, match_text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: true,
            feedback: None,
            weight: None,
            match_text: Some(match_text.into()),
        }
    }
}

/// A single question of an exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question title; never part of the equality key.
    pub title: String,
    /// The statement shown to the student.
    pub text: String,
    /// Selects the serialization and validation branch.
    pub question_type: QuestionType,
    /// Ordered answer options; empty for descriptions.
    #[serde(default)]
    pub answers: Vec<AnswerOption>,
    /// Format tag of the statement text.
    #[serde(default)]
    pub format: TextFormat,
    /// Category this question belongs to; shared, never owned.
    #[serde(default)]
    pub category: Option<Arc<Category>>,
}

impl Question {
    /// A question with no answers attached yet.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        question_type: QuestionType,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            question_type,
            answers: Vec::new(),
            format: TextFormat::Moodle,
            category: None,
        }
    }

    /// The correct answers, in authored order.
    pub fn correct_answers(&self) -> impl Iterator<Item = &AnswerOption> {
        self.answers.iter().filter(|a| a.is_correct)
    }

    /// The incorrect answers (distractors), in authored order.
    pub fn incorrect_answers(&self) -> impl Iterator<Item = &AnswerOption> {
        self.answers.iter().filter(|a| !a.is_correct)
    }

    /// Structural equality: statement, type, format, and the ordered lists
    /// of correct and incorrect answers, field by field.
    ///
    /// Title and category are deliberately ignored; this is the
    /// deduplication key used by [`Exam::add_question`].
    pub fn structurally_equals(&self, other: &Question) -> bool {
        self.text == other.text
            && self.question_type == other.question_type
            && self.format == other.format
            && self.correct_answers().eq(other.correct_answers())
            && self.incorrect_answers().eq(other.incorrect_answers())
    }
}

/// An ordered collection of questions.
///
/// Insertion order is significant: it drives numbering and export order.
/// Uniqueness is enforced at insertion time via structural equality.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exam {
    /// The questions, in insertion order.
    pub questions: Vec<Question>,
}

impl Exam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a question unless a structurally-equal one is already
    /// present. Returns `true` if it was inserted, `false` for a duplicate.
    pub fn add_question(&mut self, question: Question) -> bool {
        if self.contains(&question) {
            return false;
        }
        self.questions.push(question);
        true
    }

    /// Whether a structurally-equal question is already present.
    pub fn contains(&self, question: &Question) -> bool {
        self.questions.iter().any(|q| q.structurally_equals(question))
    }

    /// Bulk-ingest every question from `other`, dropping structural
    /// duplicates. Returns the number actually inserted.
    pub fn merge(&mut self, other: Exam) -> usize {
        let mut inserted = 0;
        for question in other.questions {
            if self.add_question(question) {
                inserted += 1;
            }
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Remove and return the question at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Question> {
        if index < self.questions.len() {
            Some(self.questions.remove(index))
        } else {
            None
        }
    }

    /// Export gate: a regulation exam carries between 15 and 20 questions
    /// inclusive. This is a policy check consumed by the export path, not a
    /// structural invariant of the collection.
    pub fn is_valid(&self) -> bool {
        (MIN_EXPORT_QUESTIONS..=MAX_EXPORT_QUESTIONS).contains(&self.questions.len())
    }

    /// Estimated completion time in whole minutes.
    pub fn estimated_minutes(&self) -> u32 {
        let minutes: f64 = self
            .questions
            .iter()
            .map(|q| match q.question_type {
                QuestionType::MultipleChoice => 1.5,
                QuestionType::Essay => 15.0,
                QuestionType::TrueFalse => 1.0,
                _ => 2.0,
            })
            .sum();
        minutes.ceil() as u32
    }
}
