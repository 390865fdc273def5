use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use sitecopy::cli;
use sitecopy::error::CopyResult;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitecopy")]
#[command(about = "Website copy and SEO generation from spreadsheet templates")]
#[command(long_about = "sitecopy - spreadsheet ⇄ website copy transcoder

Reads a filled-in website copy template (or a free-text brief), asks a
language model for optimized copy plus SEO analysis and Schema.org data, and
writes the result back as a spreadsheet.

COMMANDS:
  parse      - Template sheet → content tree JSON
  recover    - Raw model response → content tree JSON
  export     - Content tree JSON → sheet (overlay or fresh layout)
  generate   - Full run: input → model → output sheet
  languages  - List target languages

EXAMPLES:
  sitecopy parse template.csv
  sitecopy generate --sheet template.csv out.csv -l en --audience B2B
  sitecopy generate --text about.txt --url https://example.com out.xlsx
  sitecopy export tree.json out.csv --original template.csv -l ja")]
#[command(version)]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a template sheet into a content tree
    Parse {
        /// Template (.csv or .xlsx)
        sheet: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Repair a saved model response into a content tree
    Recover {
        /// File holding the raw response text
        response: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a content tree as a sheet
    Export {
        /// Content tree JSON
        tree: PathBuf,

        /// Output sheet (.csv or .xlsx)
        output: PathBuf,

        /// Original template to overlay onto (omit for the fresh layout)
        #[arg(long)]
        original: Option<PathBuf>,

        /// Target language code
        #[arg(short, long, default_value = "zh-TW")]
        language: String,
    },

    /// Generate copy with the model and write the output sheet
    Generate(cli::GenerateArgs),

    /// List supported target languages
    Languages,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sitecopy=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> CopyResult<()> {
    match command {
        Commands::Parse { sheet, output } => cli::parse(sheet, output),
        Commands::Recover { response, output } => cli::recover(response, output),
        Commands::Export {
            tree,
            output,
            original,
            language,
        } => cli::export(tree, output, original, language),
        Commands::Generate(args) => cli::generate(args),
        Commands::Languages => {
            cli::languages();
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", "Error:".bold().red(), e.user_message());
        std::process::exit(1);
    }
}
