//! CLI for Compix - AI photo compositing.

use clap::{Args, Parser, Subcommand};
use compix::{CompositeProvider, CompositeRequest, GeminiCompositor, UploadedImage};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compix")]
#[command(about = "Merge a guest photo into a base scene via the Gemini image API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the guest image into the base image
    Merge(MergeArgs),

    /// Verify the provider is reachable and authenticated
    Check,
}

#[derive(Args)]
struct MergeArgs {
    /// Base scene photo
    #[arg(short, long)]
    base: PathBuf,

    /// Guest subject photo
    #[arg(short, long)]
    guest: PathBuf,

    /// Optional free-text instructions for the model
    #[arg(short, long, default_value = "")]
    notes: String,

    /// Output file path
    #[arg(short, long)]
    output: PathBuf,

    /// Print the full instruction prompt that was used
    #[arg(long)]
    show_prompt: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> compix::Result<()> {
    match cli.command {
        Commands::Merge(args) => merge(args).await,
        Commands::Check => {
            let provider = GeminiCompositor::builder().build()?;
            provider.health_check().await?;
            println!("{}: ok", provider.name());
            Ok(())
        }
    }
}

async fn merge(args: MergeArgs) -> compix::Result<()> {
    let provider = GeminiCompositor::builder().build()?;

    let request = CompositeRequest::from_parts(
        read_image(&args.base)?,
        read_image(&args.guest)?,
        args.notes,
    )?;

    let result = provider.generate_composite(&request).await?;
    result.save(&args.output)?;
    println!("Merged image saved to {}", args.output.display());

    if args.show_prompt {
        println!("\n{}", result.prompt_used);
    }

    Ok(())
}

/// Reads a photo from disk into the data-URL form the adapter consumes.
/// An empty file counts as no image, so `from_parts` rejects it before any
/// request goes out.
fn read_image(path: &std::path::Path) -> compix::Result<Option<UploadedImage>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedImage::from_bytes(&bytes, file_name)))
}
