//! # QuickAbout
//!
//! Turns free-form marketing copy for a product category into an HTML
//! snippet for the category "About" tab: formatted body sections followed by
//! an FAQ accordion.
//!
//! The heavy lifting is delegated to a text-completion backend. This crate
//! builds the prompts, parses the extracted FAQs, removes them from the body
//! text, and assembles everything into a fixed template.
//!
//! ```no_run
//! use quickabout::{providers::factory::{create_provider, BackendSettings}, SnippetGeneratorBuilder};
//!
//! # async fn run() -> Result<(), quickabout::GenerationError> {
//! let provider = create_provider(&BackendSettings::from_env())?;
//! let generator = SnippetGeneratorBuilder::new().ai_provider(provider).build()?;
//!
//! if let Some(snippet) = generator.generate("Gift cards never expire.").await? {
//!     println!("{}", snippet.html);
//! }
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod faq;
pub mod generator;
pub mod html;
pub mod prompts;
pub mod providers;
pub mod reconcile;
pub mod types;

pub use errors::GenerationError;
pub use faq::{parse_faqs, FaqItem};
pub use html::assemble_html;
pub use reconcile::strip_faqs;
pub use types::{GeneratedSnippet, SnippetGenerator, SnippetGeneratorBuilder};
