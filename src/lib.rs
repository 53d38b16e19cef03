//! Structured HTML notes from video transcripts.

mod assets;
pub mod components;
mod config;
pub mod gemini;
pub mod markdown;
pub mod pages;
pub mod pipeline;
pub mod prompts;
pub mod telemetry;
pub mod transcript;
pub mod video;

pub use config::{
    ApiArgs, Command, Config, FormatKind, GenerateArgs, ModelsArgs, RenderArgs,
};
pub use gemini::{GeminiClient, GeminiConfig, GenerationError, ModelInfo, NoteGenerator};
pub use markdown::{PRACTICAL_INPUT_LIMIT, render};
pub use pipeline::{GeneratedNotes, NotesPipeline, NotesRequest};
pub use prompts::{LANGUAGES, Language, NotesFormat};
pub use transcript::{LocalTranscripts, TranscriptError, TranscriptSegment, TranscriptSource};
pub use video::VideoId;
