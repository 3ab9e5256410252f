use crate::{
    errors::GenerationError,
    faq::{parse_faqs, FaqItem},
    html::{assemble_html, clean_body_html},
    prompts::{build_body_prompt, build_faq_prompt, FORMATTER_SYSTEM_PROMPT},
    providers::ai::CompletionOptions,
    reconcile::strip_faqs,
    types::{GeneratedSnippet, SnippetGenerator},
};
use tracing::{debug, info};

impl SnippetGenerator {
    /// Runs one full generation cycle over `raw_text`.
    ///
    /// Blank input is a no-op: it returns `Ok(None)` without calling the
    /// backend. Otherwise the steps are:
    ///
    /// 1.  Ask the backend to extract existing Q&A pairs and parse the reply.
    /// 2.  Strip those pairs from the input so the body does not repeat them.
    /// 3.  Ask the backend to format the stripped text as body HTML. When
    ///     nothing is left after stripping, the body stays empty and no call
    ///     is made.
    /// 4.  Assemble the body and the FAQ accordion into the snippet template.
    ///
    /// A backend failure at any step aborts the cycle; no partial snippet is
    /// returned.
    pub async fn generate(
        &self,
        raw_text: &str,
    ) -> Result<Option<GeneratedSnippet>, GenerationError> {
        if raw_text.trim().is_empty() {
            info!("[generate] Input is blank; nothing to do.");
            return Ok(None);
        }

        let faqs = self.extract_faqs(raw_text).await?;
        info!("[generate] Extracted {} FAQ item(s).", faqs.len());

        let stripped_text = strip_faqs(raw_text, &faqs);
        debug!(stripped_text = %stripped_text, "Body text after FAQ removal");

        let body_html = if stripped_text.is_empty() {
            info!("[generate] Input held only FAQ content; skipping body formatting.");
            String::new()
        } else {
            self.format_body(&stripped_text).await?
        };
        let html = assemble_html(&body_html, &faqs);
        info!("[generate] Assembled snippet ({} bytes).", html.len());

        Ok(Some(GeneratedSnippet {
            html,
            faqs,
            stripped_text,
        }))
    }

    /// Asks the backend for `Q:`/`A:` pairs found in `text`.
    pub async fn extract_faqs(
        &self,
        text: &str,
    ) -> Result<Vec<FaqItem>, GenerationError> {
        let prompt = build_faq_prompt(text);
        debug!(prompt = %prompt, "--> Sending FAQ extraction prompt");

        let raw_faqs = self
            .ai_provider
            .generate("", &prompt, &CompletionOptions::extraction())
            .await?;
        debug!("<-- FAQ extraction reply: {}", raw_faqs);

        Ok(parse_faqs(raw_faqs.trim()))
    }

    /// Asks the backend to wrap `text` in the snippet's body markup.
    pub async fn format_body(&self, text: &str) -> Result<String, GenerationError> {
        let prompt = build_body_prompt(text);
        debug!(prompt = %prompt, "--> Sending body formatting prompt");

        let raw_body = self
            .ai_provider
            .generate(
                FORMATTER_SYSTEM_PROMPT,
                &prompt,
                &CompletionOptions::formatting(),
            )
            .await?;
        debug!("<-- Body formatting reply: {}", raw_body);

        Ok(clean_body_html(&raw_body))
    }
}
