//! # Prompt Templates
//!
//! The two instructions sent to the completion backend: one that turns plain
//! marketing copy into body HTML, and one that pulls existing Q&A pairs out of
//! the same copy.
//!
//! Placeholders: `{input}`

/// The system persona for the body formatting call.
pub const FORMATTER_SYSTEM_PROMPT: &str =
    "You format plain marketing text into HTML for product descriptions.";

/// The user prompt for the body formatting call.
///
/// The `---` line doubles as the stop marker passed to the backend.
pub const BODY_PROMPT_TEMPLATE: &str = r#"You are a professional HTML formatter. Take the following raw text intended for a product category "About" section and convert it to HTML wrapped in <div class="cdkeys-paragraph"> blocks.

- Use <h6> for headings, <p> for paragraphs.
- Use <ul>/<li> only if lists are clearly intended.
- Do not change the text.
- Do not add any extra text.
- Do not add <html>, <head> or <body> tags.

Input:
{input}

---
Output only the body sections (no outer wrapper):
"#;

/// The user prompt for the FAQ extraction call.
pub const FAQ_PROMPT_TEMPLATE: &str = r#"From the following content, extract up to 5 FAQs and format them in this structure:

Q: Question 1
A: Answer 1
Q: Question 2
A: Answer 2

Only include FAQs present in the content. Do not make them up.

Input:
{input}
"#;

/// Both prompts built for one piece of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetPrompts {
    pub body: String,
    pub faq: String,
}

/// Embeds `text` into the body formatting instruction.
pub fn build_body_prompt(text: &str) -> String {
    BODY_PROMPT_TEMPLATE.replace("{input}", text)
}

/// Embeds `text` into the FAQ extraction instruction.
pub fn build_faq_prompt(text: &str) -> String {
    FAQ_PROMPT_TEMPLATE.replace("{input}", text)
}

pub fn build_prompts(text: &str) -> SnippetPrompts {
    SnippetPrompts {
        body: build_body_prompt(text),
        faq: build_faq_prompt(text),
    }
}
