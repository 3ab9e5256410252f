//! # Snippet Assembly
//!
//! Fixed HTML templates for the category "About" snippet and the functions
//! that fill them in. Assembly is pure string substitution and cannot fail.

use crate::faq::FaqItem;
use regex::Regex;

/// The empty heading block placed after the accordion when it has items.
pub const SPACER_BLOCK: &str = r#"
  <div class="cdkeys-paragraph">
    <h4 class="text-center font-weight-bold mt-4 mb-3"></h4>
  </div>
"#;

/// Renders one accordion item. The `faq-<index>` anchor ties the heading to
/// its collapsible body, so indices must be unique within a snippet.
pub fn render_faq_item(item: &FaqItem) -> String {
    format!(
        r##"
    <div class="accordion-item">
      <h5 class="collapsed heading" data-toggle="collapse" data-target="#faq-{index}" aria-expanded="false">
        {question}
      </h5>
      <div id="faq-{index}" class="collapse" data-parent="#accordions">
        <div class="acr-body">
          <p>{answer}</p>
        </div>
      </div>
    </div>
"##,
        index = item.index,
        question = item.question,
        answer = item.answer,
    )
}

/// Assembles the final snippet from formatted body HTML and the FAQ list.
///
/// The body is embedded verbatim. Items keep their list order, and the
/// spacer is included only when there is at least one item.
pub fn assemble_html(body_html: &str, faqs: &[FaqItem]) -> String {
    let faq_blocks = faqs
        .iter()
        .map(render_faq_item)
        .collect::<Vec<_>>()
        .join("\n");
    let spacer_block = if faqs.is_empty() { "" } else { SPACER_BLOCK };

    format!(
        r#"
<div class="cdkeys-content-wrap">

  {body_html}

  <div class="cdkeys-paragraph">
    <h4 class="text-center font-weight-bold mt-4 mb-3">FAQs</h4>
  </div>

  <div class="accordion" id="accordions">
    {faq_blocks}
  </div>

  {spacer_block}

</div>
"#
    )
}

/// Trims formatter output and unwraps it when the whole reply is a single
/// Markdown code fence (```` ```html ```` or bare ```` ``` ````).
pub fn clean_body_html(raw: &str) -> String {
    let trimmed = raw.trim();
    let fenced = Regex::new(r"^```[A-Za-z]*[ \t]*\n([\s\S]*?)\n?```$").ok();
    fenced
        .as_ref()
        .and_then(|re| re.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
