//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiConfig};
use crate::prompts::{Language, NotesFormat};
use crate::telemetry::LogFormat;
use crate::video::VideoId;

/// Command line configuration for TubeNotes.
#[derive(Debug, Clone, Parser)]
#[command(name = "tubenotes", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Output directory
    #[arg(short, long, default_value = "dist", global = true)]
    pub output: PathBuf,

    /// Do not open the generated page
    #[arg(long, global = true)]
    pub no_open: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render an existing Markdown notes file to an HTML page
    Render(RenderArgs),
    /// Generate notes for a video from its saved transcript
    Generate(GenerateArgs),
    /// List models available to the API key
    Models(ModelsArgs),
}

/// Notes format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatKind {
    /// Developer focused technical notes
    Technical,
    /// Interview questions and answers
    Interview,
    /// Free text prompt given with --prompt
    Custom,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Markdown notes file
    pub input: PathBuf,

    /// Notes format, used for the page header
    #[arg(long, value_enum, default_value_t = FormatKind::Technical)]
    pub format: FormatKind,

    /// Page header, overrides the format title
    #[arg(long)]
    pub title: Option<String>,

    /// Notes name used for the output file
    #[arg(long)]
    pub name: Option<String>,

    /// Language code of the notes
    #[arg(long, default_value = "en")]
    pub language: String,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Video link or identifier
    pub video: String,

    /// Directory holding saved transcripts (<id>.json or <id>.txt)
    #[arg(long, default_value = "transcripts")]
    pub transcripts: PathBuf,

    /// Notes format
    #[arg(long, value_enum, default_value_t = FormatKind::Technical)]
    pub format: FormatKind,

    /// Custom prompt text, required with --format custom
    #[arg(long)]
    pub prompt: Option<String>,

    /// Notes language, as code (hi) or name (Hindi)
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Notes name used for the output file
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub api: ApiArgs,

    /// Model used for generation
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Args)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// Only list models that can generate notes
    #[arg(long)]
    pub generation_only: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file is missing, the video link cannot be
    /// parsed, the language is unknown, a custom prompt is empty or no API
    /// key is available.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Render(args) => {
                if !args.input.is_file() {
                    bail!("Notes file does not exist: {}", args.input.display());
                }
                args.language()?;
            }
            Command::Generate(args) => {
                args.video()?;
                args.language()?;
                args.notes_format()?;
                args.gemini_config()?;
            }
            Command::Models(args) => {
                args.api.api_key()?;
            }
        }

        Ok(())
    }
}

impl RenderArgs {
    pub fn language(&self) -> Result<Language> {
        parse_language(&self.language)
    }

    /// Page header from --title or the selected format.
    pub fn header_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => match self.format {
                FormatKind::Technical => NotesFormat::TechnicalNotes.header_title(),
                FormatKind::Interview => NotesFormat::InterviewQna.header_title(),
                FormatKind::Custom => NotesFormat::Custom(String::new()).header_title(),
            },
        }
    }
}

impl GenerateArgs {
    pub fn video(&self) -> Result<VideoId> {
        self.video
            .parse::<VideoId>()
            .with_context(|| format!("Invalid video: {}", self.video))
    }

    pub fn language(&self) -> Result<Language> {
        parse_language(&self.language)
    }

    /// Resolves the notes format, pairing `custom` with its prompt text.
    pub fn notes_format(&self) -> Result<NotesFormat> {
        match self.format {
            FormatKind::Technical => Ok(NotesFormat::TechnicalNotes),
            FormatKind::Interview => Ok(NotesFormat::InterviewQna),
            FormatKind::Custom => match self.prompt.as_deref().map(str::trim) {
                Some(prompt) if !prompt.is_empty() => Ok(NotesFormat::Custom(prompt.to_string())),
                _ => bail!("Please enter a custom prompt with --prompt when using --format custom"),
            },
        }
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let mut config = self.api.gemini_config()?;
        config.model = self.model.clone();
        config.timeout = Duration::from_secs(self.timeout);
        Ok(config)
    }
}

impl ApiArgs {
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!("Missing API key: pass --api-key or set GOOGLE_API_KEY"),
        }
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let mut config = GeminiConfig::new(self.api_key()?);
        config.endpoint = self.endpoint.clone();
        Ok(config)
    }
}

fn parse_language(value: &str) -> Result<Language> {
    Language::lookup(value).with_context(|| format!("Unsupported language: {}", value))
}
