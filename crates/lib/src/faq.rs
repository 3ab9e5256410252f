//! # FAQ Parsing
//!
//! Turns the extraction backend's reply into structured question/answer pairs.
//!
//! `Q:` opens a question and `A:` opens the answer to the pending question.
//! Markers may sit anywhere in the text (`Q: ... A: ...` on one line, or
//! behind a list number), as long as they start a word. A question runs to
//! the next `A:`, an answer runs to the next `Q:`. Anything that does not fit
//! is skipped, so parsing never fails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `Q:` or `A:` at a word boundary, so `FAQ:` is not a question marker.
const MARKER_PATTERN: &str = r"\b[QA]:";

/// One extracted question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// 1-based position in extraction order.
    pub index: usize,
    pub question: String,
    pub answer: String,
}

/// Byte offsets of the question being read.
struct PendingItem {
    question_start: usize,
    /// `(question_end, answer_start)` once the `A:` marker was seen.
    answer: Option<(usize, usize)>,
}

/// Trims `span` and drops a trailing list enumerator (`2.`, `3)`, `-`) that
/// belongs to the next marker rather than to this span. On its own line the
/// enumerator is always dropped; on the same line only when a `Q:` follows,
/// since `A: Version 2.` at the end of a reply is real text.
fn clean_span(span: &str, before_question: bool) -> &str {
    let span = span.trim_end();
    let split_at = if before_question {
        span.rfind(char::is_whitespace)
    } else {
        span.rfind('\n')
    };
    let Some(pos) = split_at else {
        return span.trim();
    };

    let last = span[pos..].trim();
    let is_enumerator = match last.strip_suffix(['.', ')']) {
        Some(number) => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
        None => matches!(last, "-" | "*" | "\u{2022}"),
    };
    if is_enumerator {
        span[..pos].trim()
    } else {
        span.trim()
    }
}

/// Closes `pending` at byte `end`. `at_question` tells whether a `Q:` marker
/// sits at `end`.
fn finish(
    raw: &str,
    pending: Option<PendingItem>,
    end: usize,
    at_question: bool,
    items: &mut Vec<FaqItem>,
) {
    let Some(PendingItem {
        question_start,
        answer: Some((question_end, answer_start)),
    }) = pending
    else {
        return;
    };

    let question = clean_span(&raw[question_start..question_end], false);
    let answer = clean_span(&raw[answer_start..end], at_question);
    if question.is_empty() || answer.is_empty() {
        return;
    }

    items.push(FaqItem {
        index: items.len() + 1,
        question: question.to_string(),
        answer: answer.to_string(),
    });
}

/// Parses a `Q:`/`A:` formatted reply into an ordered list of FAQ items.
///
/// A question without an answer, or a pair where either side is blank after
/// trimming, yields no item. Indices are assigned to kept items only, so they
/// always run `1..=len`.
pub fn parse_faqs(raw: &str) -> Vec<FaqItem> {
    let markers = match Regex::new(MARKER_PATTERN) {
        Ok(markers) => markers,
        Err(e) => {
            warn!("FAQ marker pattern failed to compile: {e}");
            return Vec::new();
        }
    };
    let raw = raw.replace("\r\n", "\n");

    let mut items = Vec::new();
    let mut pending: Option<PendingItem> = None;

    for marker in markers.find_iter(&raw) {
        if marker.as_str() == "Q:" {
            finish(&raw, pending.take(), marker.start(), true, &mut items);
            pending = Some(PendingItem {
                question_start: marker.end(),
                answer: None,
            });
            continue;
        }

        // A second `A:` inside an answer, or one before any question, is text.
        if let Some(item) = pending.as_mut() {
            if item.answer.is_none() {
                item.answer = Some((marker.start(), marker.end()));
            }
        }
    }
    finish(&raw, pending, raw.len(), false, &mut items);

    items
}
