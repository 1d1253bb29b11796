//! GIFT document and block parsing.
//!
//! Parsing is deliberately total: malformed blocks degrade to description
//! questions instead of failing, so authored content is never lost. Only a
//! missing or unreadable file is a fatal error.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::classify::classify;
use crate::model::{Category, Exam, Question, QuestionType, TextFormat};

/// Marker introducing a comment line.
const COMMENT_PREFIX: &str = "//";
/// Marker introducing a category line.
const CATEGORY_PREFIX: &str = "$CATEGORY:";
/// Gap token spliced into cloze statements with trailing text.
const CLOZE_GAP: &str = "_____";
/// Title snippet length used when a block carries no `::title::` marker.
const TITLE_SNIPPET_CHARS: usize = 50;

/// Parse a GIFT file into an exam.
pub fn parse_file(path: &Path) -> Result<Exam> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;
    Ok(parse_str(&content))
}

/// Parse GIFT text into an exam. Never fails.
///
/// Comment lines are discarded, `$CATEGORY:` lines move the category cursor,
/// and the remaining lines split into blank-line-delimited question blocks.
/// Each block snapshots the category cursor as of its first line; the cursor
/// is local to this call and never leaks across files. Structurally
/// duplicate questions are dropped.
pub fn parse_str(content: &str) -> Exam {
    let mut current_category: Option<Arc<Category>> = None;

    let mut blocks: Vec<(Vec<&str>, Option<Arc<Category>>)> = Vec::new();
    let mut block_lines: Vec<&str> = Vec::new();
    let mut block_category: Option<Arc<Category>> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        if let Some(path) = trimmed.strip_prefix(CATEGORY_PREFIX) {
            current_category = build_category(path);
            continue;
        }
        if trimmed.is_empty() {
            if !block_lines.is_empty() {
                blocks.push((std::mem::take(&mut block_lines), block_category.take()));
            }
            continue;
        }
        if block_lines.is_empty() {
            block_category = current_category.clone();
        }
        block_lines.push(line);
    }
    if !block_lines.is_empty() {
        blocks.push((block_lines, block_category));
    }

    let mut exam = Exam::new();
    for (lines, category) in blocks {
        let question = parse_block(&lines.join("\n"), category);
        if !exam.add_question(question) {
            tracing::debug!("dropped structurally duplicate question block");
        }
    }

    exam
}

/// Build the parent-chained category for a `$CATEGORY:` path. An empty path
/// clears the cursor.
fn build_category(path: &str) -> Option<Arc<Category>> {
    let mut parent: Option<Arc<Category>> = None;
    for segment in path.trim().split('/').filter(|s| !s.is_empty()) {
        parent = Some(Arc::new(Category::new(segment, parent)));
    }
    parent
}

/// Parse one blank-line-delimited block into a question.
///
/// Blocks without a `{...}` answer block become descriptions; an empty
/// answer block signals an essay prompt.
pub fn parse_block(block: &str, category: Option<Arc<Category>>) -> Question {
    let block = block.trim();

    // ::Title:: prefix, or a statement snippet when absent.
    let (title, text) = match take_title(block) {
        Some((title, rest)) => (title.to_string(), rest.trim()),
        None => (snippet_title(block), block),
    };

    // Optional [html|markdown|moodle] format tag.
    let (format, text) = match take_format(text) {
        Some((format, rest)) => (format, rest.trim()),
        None => (TextFormat::Moodle, text),
    };

    // Locate the answer block: first `{`, last `}`. This is not balanced
    // matching; a statement containing literal braces will mis-split here.
    let (start, end) = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Question {
                title,
                text: text.to_string(),
                question_type: QuestionType::Description,
                answers: Vec::new(),
                format,
                category,
            };
        }
    };

    let pre = text[..start].trim();
    let brace_content = &text[start + 1..end];
    let post = text[end + 1..].trim();

    // Trailing text means a cloze gap between the two statement halves.
    let statement = if post.is_empty() {
        pre.to_string()
    } else {
        format!("{pre} {CLOZE_GAP} {post}")
    };

    let (classified, answers) = classify(brace_content);

    // An empty answer block is an open-ended prompt, whatever the
    // classifier made of it.
    let question_type = if brace_content.trim().is_empty() {
        QuestionType::Essay
    } else {
        classified
    };

    Question {
        title,
        text: statement,
        question_type,
        answers,
        format,
        category,
    }
}

/// Extract a leading `::title::` marker. Titles never span lines.
fn take_title(block: &str) -> Option<(&str, &str)> {
    let body = block.strip_prefix("::")?;
    let (title, rest) = body.split_once("::")?;
    if title.contains('\n') {
        return None;
    }
    Some((title, rest))
}

/// First 50 characters of the statement, with an ellipsis when truncated.
fn snippet_title(text: &str) -> String {
    let mut snippet: String = text.chars().take(TITLE_SNIPPET_CHARS).collect();
    if text.chars().count() > TITLE_SNIPPET_CHARS {
        snippet.push_str("...");
    }
    snippet
}

/// Extract a leading `[html]`, `[markdown]`, or `[moodle]` tag. Unknown
/// bracketed prefixes stay in the statement text.
fn take_format(text: &str) -> Option<(TextFormat, &str)> {
    let body = text.strip_prefix('[')?;
    let (tag, rest) = body.split_once(']')?;
    let format = tag.parse().ok()?;
    Some((format, rest))
}
