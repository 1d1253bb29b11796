//! Answer-block classification.
//!
//! Given the raw content between a question's braces, decides the question
//! type and builds the typed answer options. Precedence: true/false token,
//! `#` numerical, `->` matching, then the `~`/`=` marker fallback.

use crate::model::{AnswerOption, QuestionType};

/// Classify brace content and build its answer options.
///
/// Newlines inside the content are collapsed to spaces before any matching.
/// Always returns a type; unrecognizable non-empty content falls through to
/// the marker branch and reads as a short answer.
pub fn classify(content: &str) -> (QuestionType, Vec<AnswerOption>) {
    let content = content.replace("\r\n", " ").replace('\n', " ");
    let content = content.trim();

    if let Some(answers) = classify_true_false(content) {
        return (QuestionType::TrueFalse, answers);
    }

    if let Some(rest) = content.strip_prefix('#') {
        let answers = vec![AnswerOption::new(rest.trim(), true)];
        return (QuestionType::Numerical, answers);
    }

    if content.contains("->") {
        return (QuestionType::Matching, classify_matching(content));
    }

    classify_options(content)
}

/// Whole-content `T`/`F`/`TRUE`/`FALSE` match, case-insensitive. Emits the
/// two synthetic answers with the indicated side correct.
fn classify_true_false(content: &str) -> Option<Vec<AnswerOption>> {
    let is_true = if content.eq_ignore_ascii_case("T") || content.eq_ignore_ascii_case("TRUE") {
        true
    } else if content.eq_ignore_ascii_case("F") || content.eq_ignore_ascii_case("FALSE") {
        false
    } else {
        return None;
    };

    Some(vec![
        AnswerOption::new("True", is_true),
        AnswerOption::new("False", !is_true),
    ])
}

/// `=left -> right` pairs. Items without a `->` are dropped; only the first
/// `->` of an item splits, the remainder stays in the right side verbatim.
fn classify_matching(content: &str) -> Vec<AnswerOption> {
    content
        .split('=')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter_map(|item| {
            let (left, right) = item.split_once("->")?;
            Some(AnswerOption::pair(left.trim(), right.trim()))
        })
        .collect()
}

/// The `~`/`=` fallback: multiple choice or short answer.
fn classify_options(content: &str) -> (QuestionType, Vec<AnswerOption>) {
    let mut answers = Vec::new();
    let mut has_incorrect = false;

    for token in split_before_markers(content) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (mut is_correct, mut text) = match token.strip_prefix('=') {
            Some(rest) => (true, rest.trim()),
            None => match token.strip_prefix('~') {
                Some(rest) => (false, rest.trim()),
                None => (false, token),
            },
        };

        let mut weight = None;
        if let Some((value, rest)) = take_weight(text) {
            if (value - 100.0).abs() < f64::EPSILON {
                is_correct = true;
            }
            weight = Some(value);
            text = rest.trim();
        }

        let mut feedback = None;
        if let Some((before, after)) = text.split_once('#') {
            feedback = Some(after.trim().to_string());
            text = before.trim();
        }

        // A residue like a stray "~=" strips down to nothing; drop it so it
        // never becomes a blank answer.
        if text.is_empty() {
            continue;
        }

        has_incorrect |= !is_correct;
        answers.push(AnswerOption {
            text: text.to_string(),
            is_correct,
            feedback,
            weight,
            match_text: None,
        });
    }

    // Any distractor makes it multiple choice; an all-correct (or empty)
    // answer set reads as a short answer.
    let question_type = if has_incorrect {
        QuestionType::MultipleChoice
    } else {
        QuestionType::ShortAnswer
    };

    (question_type, answers)
}

/// Split into option tokens, each starting at its own `~` or `=` marker.
/// Text before the first marker forms its own (unmarked) token.
fn split_before_markers(content: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (idx, ch) in content.char_indices() {
        if (ch == '~' || ch == '=') && idx > start {
            tokens.push(&content[start..idx]);
            start = idx;
        }
    }
    if start < content.len() {
        tokens.push(&content[start..]);
    }
    tokens
}

/// Extract a leading `%n%` weight annotation, returning the weight and the
/// remainder after the closing `%`.
fn take_weight(text: &str) -> Option<(f64, &str)> {
    let body = text.strip_prefix('%')?;
    let (inner, rest) = body.split_once('%')?;
    if !is_plain_number(inner) {
        return None;
    }
    inner.parse().ok().map(|weight| (weight, rest))
}

/// The only number shape the weight annotation admits: optional `-`,
/// digits, optional decimal fraction. No exponents, no leading dot.
fn is_plain_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() {
        return false;
    }
    let (int_part, frac) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_token() {
        let (kind, answers) = classify("T");
        assert_eq!(kind, QuestionType::TrueFalse);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].text, "True");
        assert!(answers[0].is_correct);
        assert!(!answers[1].is_correct);
    }

    #[test]
    fn false_token_case_insensitive() {
        for content in ["F", "f", "FALSE", "false", "  False  "] {
            let (kind, answers) = classify(content);
            assert_eq!(kind, QuestionType::TrueFalse, "content {content:?}");
            assert!(!answers[0].is_correct);
            assert!(answers[1].is_correct);
        }
    }

    #[test]
    fn true_false_requires_whole_content() {
        // "T or F" is not a bare token; it falls through to the marker
        // branch as a single unmarked (incorrect) answer.
        let (kind, answers) = classify("T or F");
        assert_eq!(kind, QuestionType::MultipleChoice);
        assert_eq!(answers.len(), 1);
        assert!(!answers[0].is_correct);
    }

    #[test]
    fn numerical_hash_prefix() {
        let (kind, answers) = classify("#42");
        assert_eq!(kind, QuestionType::Numerical);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].text, "42");
        assert!(answers[0].is_correct);
    }

    #[test]
    fn numerical_trims_value() {
        let (_, answers) = classify("# 3.14 ");
        assert_eq!(answers[0].text, "3.14");
    }

    #[test]
    fn matching_single_pair() {
        let (kind, answers) = classify("a -> b");
        assert_eq!(kind, QuestionType::Matching);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].text, "a");
        assert_eq!(answers[0].match_text.as_deref(), Some("b"));
    }

    #[test]
    fn matching_multiple_pairs() {
        let (kind, answers) = classify("=Paris -> France =Rome -> Italy");
        assert_eq!(kind, QuestionType::Matching);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[1].text, "Rome");
        assert_eq!(answers[1].match_text.as_deref(), Some("Italy"));
    }

    #[test]
    fn matching_extra_arrows_stay_right() {
        let (_, answers) = classify("=a -> b -> c");
        assert_eq!(answers[0].text, "a");
        assert_eq!(answers[0].match_text.as_deref(), Some("b -> c"));
    }

    #[test]
    fn matching_drops_items_without_arrow() {
        let (_, answers) = classify("=a -> b =orphan");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].text, "a");
    }

    #[test]
    fn multiple_choice_markers() {
        let (kind, answers) = classify("=4 ~3 ~5");
        assert_eq!(kind, QuestionType::MultipleChoice);
        assert_eq!(answers.len(), 3);
        assert!(answers[0].is_correct);
        assert_eq!(answers[0].text, "4");
        assert!(!answers[1].is_correct);
        assert!(!answers[2].is_correct);
    }

    #[test]
    fn short_answer_when_all_correct() {
        let (kind, answers) = classify("=four =4");
        assert_eq!(kind, QuestionType::ShortAnswer);
        assert_eq!(answers.len(), 2);
        assert!(answers.iter().all(|a| a.is_correct));
    }

    #[test]
    fn unmarked_token_defaults_to_incorrect() {
        let (kind, answers) = classify("just some text");
        assert_eq!(kind, QuestionType::MultipleChoice);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].text, "just some text");
        assert!(!answers[0].is_correct);
    }

    #[test]
    fn weight_100_forces_correct() {
        let (kind, answers) = classify("%100%correct ~wrong");
        assert_eq!(kind, QuestionType::MultipleChoice);
        assert!(answers[0].is_correct);
        assert_eq!(answers[0].text, "correct");
        assert_eq!(answers[0].weight, Some(100.0));
    }

    #[test]
    fn partial_weight_is_recorded_not_coerced() {
        let (_, answers) = classify("~%50%half right ~wrong");
        assert!(!answers[0].is_correct);
        assert_eq!(answers[0].weight, Some(50.0));
        assert_eq!(answers[0].text, "half right");
    }

    #[test]
    fn negative_and_fractional_weights() {
        let (_, answers) = classify("~%-33.3%bad guess");
        assert_eq!(answers[0].weight, Some(-33.3));
        assert_eq!(answers[0].text, "bad guess");
    }

    #[test]
    fn malformed_weight_stays_in_text() {
        let (_, answers) = classify("~%abc%not a weight");
        assert_eq!(answers[0].weight, None);
        assert_eq!(answers[0].text, "%abc%not a weight");
    }

    #[test]
    fn feedback_after_hash() {
        let (_, answers) = classify("=Paris#Well done ~London#Wrong country");
        assert_eq!(answers[0].text, "Paris");
        assert_eq!(answers[0].feedback.as_deref(), Some("Well done"));
        assert_eq!(answers[1].text, "London");
        assert_eq!(answers[1].feedback.as_deref(), Some("Wrong country"));
    }

    #[test]
    fn weight_is_stripped_before_feedback() {
        let (_, answers) = classify("=%50%partial#half credit");
        assert_eq!(answers[0].weight, Some(50.0));
        assert_eq!(answers[0].text, "partial");
        assert_eq!(answers[0].feedback.as_deref(), Some("half credit"));
    }

    #[test]
    fn blank_residues_are_discarded() {
        // "~=" strips to nothing twice; only the real answer survives.
        let (kind, answers) = classify("~= =real");
        assert_eq!(kind, QuestionType::ShortAnswer);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].text, "real");
        assert!(answers[0].is_correct);
    }

    #[test]
    fn newlines_collapse_to_spaces() {
        let (kind, answers) = classify("=Paris\n~London\r\n~Berlin");
        assert_eq!(kind, QuestionType::MultipleChoice);
        assert_eq!(answers.len(), 3);
        assert_eq!(answers[1].text, "London");
    }

    #[test]
    fn empty_content_yields_no_answers() {
        let (kind, answers) = classify("   \n  ");
        assert_eq!(kind, QuestionType::ShortAnswer);
        assert!(answers.is_empty());
    }
}
