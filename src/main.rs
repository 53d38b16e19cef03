use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tubenotes::pages::notes::{self, NotesPage};
use tubenotes::{
    Command, Config, GeminiClient, GenerateArgs, LocalTranscripts, ModelInfo, ModelsArgs,
    NotesPipeline, NotesRequest, PRACTICAL_INPUT_LIMIT, RenderArgs,
};

/// Renders an existing notes file into a page.
fn render_command(config: &Config, args: &RenderArgs) -> Result<()> {
    let markdown = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read notes file: {}", args.input.display()))?;

    if markdown.len() > PRACTICAL_INPUT_LIMIT {
        warn!(
            bytes = markdown.len(),
            limit = PRACTICAL_INPUT_LIMIT,
            "Notes file is larger than the supported rendering size"
        );
    }

    let header = args.header_title();
    let page = notes::generate(&NotesPage {
        header_title: &header,
        language: args.language()?,
        video: None,
        markdown: &markdown,
    });

    let stem = args
        .name
        .as_deref()
        .or_else(|| args.input.file_stem().and_then(|s| s.to_str()));
    publish(config, &page.into_string(), stem)
}

/// Generates notes for a video and writes the page.
fn generate_command(config: &Config, args: &GenerateArgs) -> Result<()> {
    let request = NotesRequest {
        video: args.video()?,
        format: args.notes_format()?,
        language: args.language()?,
    };

    let transcripts = LocalTranscripts::new(&args.transcripts);
    let generator = GeminiClient::new(args.gemini_config()?);
    let pipeline = NotesPipeline::new(transcripts, generator);

    let generated = pipeline.run(&request)?;
    info!(
        markdown_bytes = generated.markdown.len(),
        language = request.language.code(),
        "Notes generation complete"
    );

    publish(config, &generated.page, args.name.as_deref())
}

/// Prints models available to the API key.
fn models_command(args: &ModelsArgs) -> Result<()> {
    let client = GeminiClient::new(args.api.gemini_config()?);
    let models = client.list_models().context("Failed to list models")?;

    println!("\nAvailable Models:\n");
    for model in listed_models(models, args.generation_only) {
        println!(
            "{} -> {}",
            model.name,
            model.supported_generation_methods.join(", ")
        );
    }

    Ok(())
}

/// Models to print, keeping only `generateContent` capable ones on request.
fn listed_models(models: Vec<ModelInfo>, generation_only: bool) -> Vec<ModelInfo> {
    models
        .into_iter()
        .filter(|model| !generation_only || model.supports_generation())
        .collect()
}

/// Writes the page and opens it unless disabled.
fn publish(config: &Config, page: &str, name: Option<&str>) -> Result<()> {
    let file_name = notes::file_name(name);
    let path = notes::write(page, &config.output, &file_name)?;
    println!("Generated: {}", path.display());

    if !config.no_open {
        open_page(&path);
    }

    Ok(())
}

fn open_page(path: &Path) {
    if let Err(e) = open::that(path) {
        warn!(error = %e, path = %path.display(), "Failed to open generated page");
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    tubenotes::telemetry::init(config.verbose, config.log_format)?;
    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Render(args) => render_command(&config, args),
        Command::Generate(args) => generate_command(&config, args),
        Command::Models(args) => models_command(args),
    }
}
