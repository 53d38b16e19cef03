//! Prompt templates and target languages for note generation.

use std::borrow::Cow;
use std::fmt;

const TECHNICAL_NOTES: &str = include_str!("../prompts/technical_notes.txt");
const INTERVIEW_QNA: &str = include_str!("../prompts/interview_qna.txt");

/// Suffix appended to custom prompts before the transcript text.
const TRANSCRIPT_SUFFIX: &str = "\n\nTranscript:\n\n";

/// Notes format selecting the prompt sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesFormat {
    /// Developer focused technical documentation.
    TechnicalNotes,
    /// Interview questions and answers.
    InterviewQna,
    /// Free text prompt written by the user.
    Custom(String),
}

impl NotesFormat {
    /// Human readable format name.
    pub fn label(&self) -> &str {
        match self {
            NotesFormat::TechnicalNotes => "Technical Notes",
            NotesFormat::InterviewQna => "Interview QnA Notes",
            NotesFormat::Custom(_) => "Custom Prompt",
        }
    }

    /// Title shown at the top of the generated notes page.
    pub fn header_title(&self) -> String {
        match self {
            NotesFormat::Custom(_) => "📘 Custom Prompt Notes".to_string(),
            preset => format!("📘 {}", preset.label()),
        }
    }

    /// Prompt template ending right before the transcript text.
    pub fn prompt(&self) -> Cow<'_, str> {
        match self {
            NotesFormat::TechnicalNotes => Cow::Borrowed(TECHNICAL_NOTES),
            NotesFormat::InterviewQna => Cow::Borrowed(INTERVIEW_QNA),
            NotesFormat::Custom(text) => Cow::Owned(format!("{}{}", text.trim(), TRANSCRIPT_SUFFIX)),
        }
    }

    /// Full prompt with the transcript appended.
    pub fn build_prompt(&self, transcript: &str) -> String {
        let template = self.prompt();
        let mut prompt = String::with_capacity(template.len() + transcript.len());
        prompt.push_str(&template);
        prompt.push_str(transcript);
        prompt
    }
}

impl fmt::Display for NotesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target language for the generated notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    name: &'static str,
    code: &'static str,
}

/// Languages notes can be translated into.
pub const LANGUAGES: [Language; 10] = [
    Language::new("English", "en"),
    Language::new("Hindi", "hi"),
    Language::new("Spanish", "es"),
    Language::new("French", "fr"),
    Language::new("German", "de"),
    Language::new("Chinese", "zh"),
    Language::new("Japanese", "ja"),
    Language::new("Russian", "ru"),
    Language::new("Portuguese", "pt"),
    Language::new("Arabic", "ar"),
];

impl Language {
    const fn new(name: &'static str, code: &'static str) -> Self {
        Self { name, code }
    }

    /// Language notes are generated in before any translation.
    pub const fn english() -> Self {
        LANGUAGES[0]
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Looks up a language by its code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.code.eq_ignore_ascii_case(code.trim()))
    }

    /// Looks up a language by its English name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Looks up a language by code first, then by name.
    pub fn lookup(value: &str) -> Option<Self> {
        Self::from_code(value).or_else(|| Self::from_name(value))
    }

    /// True when notes in this language need no translation pass.
    pub fn is_passthrough(&self) -> bool {
        self.code == Self::english().code
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Builds the prompt asking the model to translate generated notes.
///
/// Code blocks and Markdown formatting must survive translation so the
/// result can be rendered like the original notes.
pub fn translation_prompt(notes: &str, language: Language) -> String {
    format!(
        "Translate the following notes into the target language. Preserve any code blocks and \
         markdown formatting.\nTarget language code: {}\n\nNotes:\n{}",
        language.code, notes
    )
}
