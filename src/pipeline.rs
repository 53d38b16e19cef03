//! End to end note generation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::gemini::NoteGenerator;
use crate::pages::notes::{self, NotesPage};
use crate::prompts::{Language, NotesFormat, translation_prompt};
use crate::transcript::TranscriptSource;
use crate::video::VideoId;

/// What to generate notes for.
#[derive(Debug, Clone)]
pub struct NotesRequest {
    pub video: VideoId,
    pub format: NotesFormat,
    pub language: Language,
}

/// Generated notes in Markdown and as a complete HTML page.
#[derive(Debug, Clone)]
pub struct GeneratedNotes {
    pub markdown: String,
    pub page: String,
}

/// Runs transcript lookup, generation, translation and page assembly.
pub struct NotesPipeline<T, G> {
    transcripts: T,
    generator: G,
}

impl<T: TranscriptSource, G: NoteGenerator> NotesPipeline<T, G> {
    pub fn new(transcripts: T, generator: G) -> Self {
        Self {
            transcripts,
            generator,
        }
    }

    /// Generates notes for a video.
    ///
    /// # Arguments
    ///
    /// * `request`: Video, notes format and target language
    ///
    /// # Returns
    ///
    /// Notes Markdown (translated when requested) and the rendered page
    ///
    /// # Errors
    ///
    /// Returns error if the transcript is unavailable or generation fails.
    /// A failed translation is not an error: the untranslated notes are kept.
    pub fn run(&self, request: &NotesRequest) -> Result<GeneratedNotes> {
        info!(video = %request.video, format = %request.format, "Fetching transcript");
        let transcript = self
            .transcripts
            .fetch(&request.video)
            .with_context(|| format!("Error fetching transcript for {}", request.video))?;

        info!(transcript_bytes = transcript.len(), "Generating notes");
        let prompt = request.format.build_prompt(&transcript);
        let summary = self
            .generator
            .generate(&prompt)
            .context("Error generating summary")?;

        let markdown = self.translate(summary, request.language);

        let header = request.format.header_title();
        let page = notes::generate(&NotesPage {
            header_title: &header,
            language: request.language,
            video: Some(&request.video),
            markdown: &markdown,
        });

        Ok(GeneratedNotes {
            markdown,
            page: page.into_string(),
        })
    }

    /// Translates notes into the target language.
    ///
    /// English notes are returned untouched without calling the generator.
    pub fn translate(&self, notes: String, language: Language) -> String {
        if language.is_passthrough() {
            return notes;
        }

        info!(language = %language, "Translating notes");
        match self.generator.generate(&translation_prompt(&notes, language)) {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, language = language.code(), "Error translating summary, keeping original");
                notes
            }
        }
    }
}
