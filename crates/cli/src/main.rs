//! # quickabout: A CLI for `quickabout`
//!
//! Generates a category "About" snippet from a text file or stdin, or prints
//! the prompts that would be sent to the backend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quickabout::{
    prompts::build_prompts,
    providers::factory::{create_provider, BackendSettings},
    SnippetGeneratorBuilder,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Printed instead of generating when the input has no text.
const EMPTY_INPUT_MESSAGE: &str = "Nothing to generate: input text is empty.";

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the About snippet HTML from raw category text
    Generate(GenerateArgs),
    /// Print the FAQ extraction and body formatting prompts without calling a backend
    Prompts(PromptsArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// File with the raw text. Reads stdin when omitted or `-`
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Where to write the snippet
    #[arg(long, short, default_value = "about_snippet.html")]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct PromptsArgs {
    /// File with the raw text. Reads stdin when omitted or `-`
    #[arg(long, short)]
    input: Option<PathBuf>,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for piping.
    let subscriber = fmt::Subscriber::builder()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => handle_generate(args).await,
        Commands::Prompts(args) => handle_prompts(args),
    }
}

// --- Command Handlers ---

async fn handle_generate(args: &GenerateArgs) -> Result<()> {
    let text = read_input(args.input.as_ref())?;
    if text.trim().is_empty() {
        println!("{EMPTY_INPUT_MESSAGE}");
        return Ok(());
    }

    let provider = create_provider(&BackendSettings::from_env())
        .context("Failed to configure the completion backend")?;
    let generator = SnippetGeneratorBuilder::new().ai_provider(provider).build()?;

    let Some(snippet) = generator
        .generate(&text)
        .await
        .context("Generation failed")?
    else {
        println!("{EMPTY_INPUT_MESSAGE}");
        return Ok(());
    };

    fs::write(&args.output, &snippet.html)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;
    info!(faqs = snippet.faqs.len(), "Snippet written");
    println!(
        "Wrote {} ({} FAQ item(s)).",
        args.output.display(),
        snippet.faqs.len()
    );
    Ok(())
}

fn handle_prompts(args: &PromptsArgs) -> Result<()> {
    let text = read_input(args.input.as_ref())?;
    let prompts = build_prompts(&text);
    println!("=== FAQ extraction prompt ===\n{}", prompts.faq);
    println!("=== Body formatting prompt ===\n{}", prompts.body);
    Ok(())
}

/// Reads the whole input file, or stdin for `None` and `-`.
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
