use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "detox")]
#[command(about = "Mask or delete artifact tokens in labeled text datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sanitized variant of a dataset
    Variant(VariantArgs),

    /// Show how a single text would be tokenized and cleaned
    Preview(PreviewArgs),

    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct VariantArgs {
    /// Input dataset (label<TAB>text per line)
    #[arg(short = 'I', long)]
    pub input: PathBuf,

    /// Output dataset
    #[arg(short = 'O', long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Print the run summary as JSON
    #[arg(long)]
    pub summary_json: bool,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Text to clean
    pub text: String,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options shared by every command that rewrites text
#[derive(Args, Clone, Default)]
pub struct PolicyArgs {
    /// Artifact list, one entry per line
    #[arg(short = 'A', long)]
    pub artifacts: PathBuf,

    /// Replacement strategy: delete (or del), mask
    #[arg(short = 'S', long)]
    pub strategy: Option<String>,

    /// Records to sanitize: all, hateful
    #[arg(short = 'C', long)]
    pub classes: Option<String>,

    /// Denylist lookup key: token, source
    #[arg(long)]
    pub match_on: Option<String>,

    /// Placeholder for the mask strategy
    #[arg(long)]
    pub mask_placeholder: Option<String>,

    /// Pretrained tokenizer identifier, or "whitespace"
    #[arg(short = 'T', long)]
    pub tokenizer: Option<String>,

    /// Local tokenizer.json (overrides --tokenizer)
    #[arg(long)]
    pub tokenizer_file: Option<PathBuf>,

    /// Register a single [EMOJI] placeholder instead of every emoji glyph
    #[arg(short = 'E', long)]
    pub no_emojis: bool,
}
