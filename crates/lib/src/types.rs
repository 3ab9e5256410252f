use crate::{errors::GenerationError, faq::FaqItem, providers::ai::AiProvider};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Turns raw category text into an "About" HTML snippet using a completion backend.
pub struct SnippetGenerator {
    pub ai_provider: Box<dyn AiProvider>,
}

impl fmt::Debug for SnippetGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetGenerator")
            .field("ai_provider", &self.ai_provider)
            .finish()
    }
}

/// A builder for creating `SnippetGenerator` instances.
#[derive(Default)]
pub struct SnippetGeneratorBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
}

impl SnippetGeneratorBuilder {
    /// Creates a new `SnippetGeneratorBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use quickabout::SnippetGeneratorBuilder;
    ///
    /// let builder = SnippetGeneratorBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion backend.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Builds the `SnippetGenerator`, failing if no provider was set.
    pub fn build(self) -> Result<SnippetGenerator, GenerationError> {
        let ai_provider = self.ai_provider.ok_or(GenerationError::MissingAiProvider)?;
        Ok(SnippetGenerator { ai_provider })
    }
}

/// The outcome of one generation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSnippet {
    /// The assembled snippet, ready to paste into the admin panel.
    pub html: String,
    /// FAQ items rendered into the accordion, in extraction order.
    pub faqs: Vec<FaqItem>,
    /// The input text with extracted FAQ content removed, as sent for formatting.
    pub stripped_text: String,
}
