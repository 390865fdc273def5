//! CLI command handlers.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Args};
use colored::Colorize;

use crate::client::GeminiClient;
use crate::config::{load_brief, ModelSettings};
use crate::error::{CopyError, CopyResult};
use crate::parser::parse_rows;
use crate::pipeline::{run_generation, BusyFlag, Generation, Source};
use crate::prompt::{Audience, ContentLength, Focus, GenerationParams, SeoMode};
use crate::recover::recover_tree;
use crate::tabular::{read_rows, write_rows};
use crate::types::{ContentTree, Language, LANGUAGES};

/// Write `tree` as pretty JSON to `output`, or to stdout when absent.
fn emit_tree(tree: &ContentTree, output: Option<&Path>) -> CopyResult<()> {
    let json = serde_json::to_string_pretty(tree)?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n")?;
            println!("{} {}", "✅ Tree written:".bold().green(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn section_summary(tree: &ContentTree) -> String {
    let mut parts = Vec::new();
    if tree.hero.is_some() {
        parts.push("hero".to_string());
    }
    if tree.about.is_some() {
        parts.push("about".to_string());
    }
    if !tree.solutions.is_empty() {
        parts.push(format!("{} solutions", tree.solutions.len()));
    }
    if !tree.products.is_empty() {
        parts.push(format!("{} products", tree.products.len()));
    }
    if tree.contact.is_some() {
        parts.push("contact".to_string());
    }
    if tree.seo.is_some() {
        parts.push("seo".to_string());
    }
    if tree.structured_data.is_some() {
        parts.push("structured data".to_string());
    }
    parts.join(", ")
}

/// `sitecopy parse`: template sheet → content tree JSON.
pub fn parse(sheet: PathBuf, output: Option<PathBuf>) -> CopyResult<()> {
    let rows = read_rows(&sheet)?;
    let tree = parse_rows(&rows)?;
    if output.is_some() {
        println!("{}", "📖 sitecopy - Parse".bold().green());
        println!("   Sheet:    {} ({} rows)", sheet.display(), rows.len());
        println!("   Sections: {}", section_summary(&tree));
    }
    emit_tree(&tree, output.as_deref())
}

/// `sitecopy recover`: saved model response → content tree JSON.
pub fn recover(response: PathBuf, output: Option<PathBuf>) -> CopyResult<()> {
    let text = fs::read_to_string(&response)?;
    let tree = recover_tree(&text)?;
    if output.is_some() {
        println!("{}", "🩹 sitecopy - Recover".bold().green());
        println!("   Response: {}", response.display());
        println!("   Sections: {}", section_summary(&tree));
    }
    emit_tree(&tree, output.as_deref())
}

/// `sitecopy export`: content tree JSON → sheet.
pub fn export(
    tree: PathBuf,
    output: PathBuf,
    original: Option<PathBuf>,
    language: String,
) -> CopyResult<()> {
    let content = fs::read_to_string(&tree)?;
    let generation = Generation {
        tree: ContentTree::from_value(serde_json::from_str(&content)?)?,
        original_rows: original.as_deref().map(read_rows).transpose()?,
        language: Language::new(language),
    };

    let rows = generation.to_rows();
    write_rows(&output, &rows)?;

    println!("{}", "📊 sitecopy - Export".bold().green());
    println!(
        "   Layout:   {}",
        if generation.original_rows.is_some() { "overlay" } else { "fresh" }
    );
    println!("   Language: {}", generation.language.display_name());
    println!("   Output:   {} ({} rows)", output.display(), rows.len());
    Ok(())
}

/// Options of `sitecopy generate`.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["sheet", "text", "url"])))]
pub struct GenerateArgs {
    /// Filled-in template (.csv or .xlsx)
    #[arg(long, conflicts_with_all = ["text", "url"])]
    pub sheet: Option<PathBuf>,

    /// Free-text description of the company or product
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Company website, added to the free-text input
    #[arg(long)]
    pub url: Option<String>,

    /// Output sheet (.csv or .xlsx)
    pub output: PathBuf,

    /// YAML file with generation parameters
    #[arg(short, long)]
    pub brief: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub audience: Option<Audience>,

    /// Target language code (zh-TW, en, ja, ...)
    #[arg(short, long)]
    pub language: Option<String>,

    #[arg(long, value_enum)]
    pub focus: Option<Focus>,

    /// Slogans or phrases the copy must mention
    #[arg(short, long)]
    pub keywords: Option<String>,

    #[arg(long)]
    pub industry: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub business_type: Option<String>,

    /// Competitor website (repeatable)
    #[arg(long = "competitor")]
    pub competitors: Vec<String>,

    #[arg(long, value_enum)]
    pub seo_mode: Option<SeoMode>,

    #[arg(long, value_enum)]
    pub content_length: Option<ContentLength>,

    /// Model service API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "SITECOPY_MODEL_ENDPOINT")]
    pub model_endpoint: Option<String>,

    #[arg(long, env = "SITECOPY_MODEL")]
    pub model: Option<String>,

    /// Also write the recovered content tree as JSON
    #[arg(long)]
    pub save_tree: Option<PathBuf>,
}

impl GenerateArgs {
    /// Brief (or defaults) with command-line overrides applied.
    pub fn params(&self) -> CopyResult<GenerationParams> {
        let mut params = match &self.brief {
            Some(path) => load_brief(path)?,
            None => GenerationParams::default(),
        };

        if let Some(audience) = self.audience {
            params.audience = audience;
        }
        if let Some(language) = &self.language {
            params.language = Language::new(language.as_str());
        }
        if let Some(focus) = self.focus {
            params.focus = focus;
        }
        if let Some(keywords) = &self.keywords {
            params.keywords = keywords.clone();
        }
        if let Some(industry) = &self.industry {
            params.industry_category = industry.clone();
        }
        if let Some(location) = &self.location {
            params.target_location = location.clone();
        }
        if let Some(business_type) = &self.business_type {
            params.business_type = business_type.clone();
        }
        if !self.competitors.is_empty() {
            params.competitor_urls = self.competitors.clone();
        }
        if let Some(seo_mode) = self.seo_mode {
            params.seo_mode = seo_mode;
        }
        if let Some(content_length) = self.content_length {
            params.content_length = content_length;
        }

        Ok(params)
    }

    fn source(&self) -> CopyResult<Source> {
        if let Some(sheet) = &self.sheet {
            return Ok(Source::Sheet {
                rows: read_rows(sheet)?,
            });
        }
        let body = match &self.text {
            Some(path) => fs::read_to_string(path)?,
            None => String::new(),
        };
        Ok(Source::Text {
            body,
            website_url: self.url.clone(),
        })
    }
}

/// `sitecopy generate`: input → model → output sheet.
pub fn generate(args: GenerateArgs) -> CopyResult<()> {
    let params = args.params()?;
    let source = args.source()?;
    let settings = ModelSettings::with_overrides(
        args.model_endpoint.as_deref(),
        args.model.as_deref(),
    );
    let client = GeminiClient::new(args.api_key.clone().unwrap_or_default(), settings)?;

    println!("{}", "✨ sitecopy - Generate".bold().green());
    println!(
        "   Input:    {}",
        match &source {
            Source::Sheet { rows } => format!("sheet ({} rows)", rows.len()),
            Source::Text { .. } => "free text".to_string(),
        }
    );
    println!("   Language: {}", params.language.display_name());
    println!("{}", "   Calling model service...".cyan());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CopyError::Io)?;
    let generation =
        runtime.block_on(run_generation(&client, &BusyFlag::new(), source, &params))?;

    let rows = generation.to_rows();
    write_rows(&args.output, &rows)?;
    if let Some(path) = &args.save_tree {
        fs::write(path, serde_json::to_string_pretty(&generation.tree)? + "\n")?;
    }

    println!("{}", "✅ Generation complete!".bold().green());
    println!("   Sections: {}", section_summary(&generation.tree));
    println!("   Output:   {} ({} rows)", args.output.display(), rows.len());
    if let Some(path) = &args.save_tree {
        println!("   Tree:     {}", path.display());
    }
    Ok(())
}

/// `sitecopy languages`: print the supported target languages.
pub fn languages() {
    println!("{}", "🌐 Target languages".bold().green());
    for (code, name) in LANGUAGES {
        let note = if Language::new(*code).is_chinese() {
            ""
        } else {
            "  + 中文翻譯"
        };
        println!("   {:<6} {}{}", code.cyan(), name, note.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn args(argv: &[&str]) -> Result<GenerateArgs, clap::Error> {
        let mut full = vec!["sitecopy"];
        full.extend_from_slice(argv);
        Harness::try_parse_from(full).map(|h| h.args)
    }

    #[test]
    fn test_overrides_beat_defaults() {
        let parsed = args(&[
            "--text", "in.txt", "out.csv", "--audience", "B2B", "-l", "en", "--competitor", "a",
            "--competitor", "b",
        ])
        .unwrap();
        let params = parsed.params().unwrap();

        assert_eq!(params.audience, Audience::B2b);
        assert_eq!(params.language.code(), "en");
        assert_eq!(params.competitor_urls, vec!["a", "b"]);
        assert_eq!(params.focus, Focus::Brand);
    }

    #[test]
    fn test_sheet_conflicts_with_text() {
        assert!(args(&["--sheet", "a.csv", "--text", "b.txt", "out.csv"]).is_err());
    }

    #[test]
    fn test_a_source_is_required() {
        assert!(args(&["out.csv"]).is_err());
    }

    #[test]
    fn test_url_alone_is_a_text_source() {
        let parsed = args(&["--url", "https://tea.example", "out.csv"]).unwrap();
        assert_eq!(
            parsed.source().unwrap(),
            Source::Text {
                body: String::new(),
                website_url: Some("https://tea.example".into())
            }
        );
    }
}
