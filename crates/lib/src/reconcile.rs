//! # Body Reconciliation
//!
//! Removes already-extracted FAQ content from the raw input so the body
//! formatting call does not render it a second time.

use crate::faq::FaqItem;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Builds a pattern for one item as it may appear in the source text:
/// an optional list enumerator at the start of a line, an optional `Q:`
/// marker, the question, whitespace, an optional `A:` marker, then the answer.
fn item_pattern(item: &FaqItem) -> Result<Regex, regex::Error> {
    let pattern = format!(
        r"(?m:^[ \t]*(?:\d+[.)]|[-*\x{{2022}}])[ \t]*)?(?:Q:[ \t]*)?{question}\s*(?:A:[ \t]*)?{answer}",
        question = regex::escape(&item.question),
        answer = regex::escape(&item.answer),
    );
    Regex::new(&pattern)
}

/// Removes every matched FAQ pair and a standalone `FAQs` heading from `raw`.
///
/// Only the first occurrence of each pair is removed. Pairs that do not
/// appear verbatim (for example because the backend paraphrased them) are
/// left in place. Line endings are normalized to `\n`, runs of blank lines
/// left behind are collapsed, and the result is trimmed.
pub fn strip_faqs(raw: &str, faqs: &[FaqItem]) -> String {
    let mut text = raw.replace("\r\n", "\n");

    for item in faqs {
        let pattern = match item_pattern(item) {
            Ok(pattern) => pattern,
            Err(e) => {
                debug!(index = item.index, "Skipping FAQ with unbuildable pattern: {e}");
                continue;
            }
        };
        match pattern.find(&text) {
            Some(found) => {
                let range = found.range();
                text.replace_range(range, "");
            }
            None => debug!(
                index = item.index,
                "FAQ not found verbatim in input; leaving body text untouched"
            ),
        }
    }

    let text = remove_faq_heading(&text);
    collapse_blank_lines(&text).trim().to_string()
}

fn remove_faq_heading(text: &str) -> String {
    match RegexBuilder::new(r"^[ \t]*faqs[ \t]*$")
        .case_insensitive(true)
        .multi_line(true)
        .build()
    {
        Ok(heading) => heading.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

fn collapse_blank_lines(text: &str) -> String {
    match Regex::new(r"\n[ \t]*(?:\n[ \t]*)+\n") {
        Ok(blank_run) => blank_run.replace_all(text, "\n\n").into_owned(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(index: usize, question: &str, answer: &str) -> FaqItem {
        FaqItem {
            index,
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_strips_marked_pair() {
        let raw = "Gift cards never expire.\nQ: Do gift cards expire?\nA: No, never.";
        let stripped = strip_faqs(raw, &[faq(1, "Do gift cards expire?", "No, never.")]);
        assert_eq!(stripped, "Gift cards never expire.");
    }

    #[test]
    fn test_strips_unmarked_pair_across_newline() {
        let raw = "Intro.\n\nDo gift cards expire?\n\nNo, never.\n\nOutro.";
        let stripped = strip_faqs(raw, &[faq(1, "Do gift cards expire?", "No, never.")]);
        assert_eq!(stripped, "Intro.\n\nOutro.");
    }

    #[test]
    fn test_removes_only_first_occurrence() {
        let raw = "Q: Why?\nA: Because.\nQ: Why?\nA: Because.";
        let stripped = strip_faqs(raw, &[faq(1, "Why?", "Because.")]);
        assert_eq!(stripped, "Q: Why?\nA: Because.");
    }

    #[test]
    fn test_paraphrased_pair_is_left_in_place() {
        let raw = "Intro.\nQ: Can I get a refund?\nA: Within 14 days.";
        let stripped = strip_faqs(raw, &[faq(1, "Are refunds possible?", "Yes, within 14 days.")]);
        assert_eq!(stripped, raw);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let raw = "Price (USD)?\nA: $5.00 [approx]\nrest";
        let stripped = strip_faqs(raw, &[faq(1, "Price (USD)?", "$5.00 [approx]")]);
        assert_eq!(stripped, "rest");
    }

    #[test]
    fn test_removes_faq_heading_case_insensitively() {
        let raw = "Body text.\n\nfaqs\n\nQ: One?\nA: Yes.\n\nClosing line.";
        let stripped = strip_faqs(raw, &[faq(1, "One?", "Yes.")]);
        assert_eq!(stripped, "Body text.\n\nClosing line.");
    }

    #[test]
    fn test_heading_inside_sentence_is_kept() {
        let raw = "Read our FAQs below.";
        assert_eq!(strip_faqs(raw, &[]), raw);
    }

    #[test]
    fn test_no_faqs_only_trims() {
        assert_eq!(strip_faqs("  Plain text.\n", &[]), "Plain text.");
    }

    #[test]
    fn test_crlf_input_loses_heading_and_pair() {
        let raw = "Body text.\r\nFAQs\r\nQ: One?\r\nA: Yes.\r\nClosing.";
        let stripped = strip_faqs(raw, &[faq(1, "One?", "Yes.")]);
        assert_eq!(stripped, "Body text.\n\nClosing.");
    }

    #[test]
    fn test_strips_numbered_inline_pairs() {
        let raw = "Intro.\n1. Q: Fast? A: Yes.\n2. Q: Refunds? A: 14 days.\nOutro.";
        let stripped = strip_faqs(
            raw,
            &[faq(1, "Fast?", "Yes."), faq(2, "Refunds?", "14 days.")],
        );
        assert_eq!(stripped, "Intro.\n\nOutro.");
    }
}
