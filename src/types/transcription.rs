//! Audio transcription options.

use std::path::Path;
use uuid::Uuid;

use super::file::{FileInput, FormValue};
use crate::errors::{HasabError, HasabResult};

/// Default language hint for transcription.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Options for uploading audio to be transcribed.
///
/// Exactly one of `file` or `url` must be set.
///
/// ```rust
/// use hasab_client::TranscriptionOptions;
///
/// let options = TranscriptionOptions::new()
///     .url("https://example.com/audio/interview.mp3")
///     .key("interview-2024-jan")
///     .summarize(true);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOptions {
    /// Local audio file to upload.
    pub file: Option<FileInput>,
    /// Remote audio URL for the service to fetch.
    pub url: Option<String>,
    /// Caller-side identifier; generated when absent.
    pub key: Option<String>,
    /// Whether the recording is a meeting.
    pub is_meeting: bool,
    /// Produce a transcription.
    pub transcribe: bool,
    /// Produce a translation.
    pub translate: bool,
    /// Produce a summary.
    pub summarize: bool,
    /// Target language code, or `auto`.
    pub language: String,
    /// Language spoken in the audio, sent only when set.
    pub source_language: Option<String>,
    /// Request segment timestamps.
    pub timestamps: bool,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            file: None,
            url: None,
            key: None,
            is_meeting: false,
            transcribe: true,
            translate: false,
            summarize: false,
            language: DEFAULT_LANGUAGE.to_string(),
            source_language: None,
            timestamps: false,
        }
    }
}

/// Where the audio to transcribe comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    /// Uploaded as a multipart file part.
    File(FileInput),
    /// Fetched by the service from a URL.
    Url(String),
}

/// A validated upload: the audio source plus the defaulted fields.
#[derive(Debug, Clone)]
pub(crate) struct PreparedUpload {
    pub source: AudioSource,
    pub fields: Vec<(&'static str, Option<FormValue>)>,
}

impl TranscriptionOptions {
    /// Creates options with the service defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads a local file (or in-memory buffer).
    pub fn file(mut self, file: impl Into<FileInput>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Points the service at a remote audio URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the identifying key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Marks the recording as a meeting.
    pub fn is_meeting(mut self, is_meeting: bool) -> Self {
        self.is_meeting = is_meeting;
        self
    }

    /// Enables or disables transcription.
    pub fn transcribe(mut self, transcribe: bool) -> Self {
        self.transcribe = transcribe;
        self
    }

    /// Enables or disables translation.
    pub fn translate(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    /// Enables or disables summarization.
    pub fn summarize(mut self, summarize: bool) -> Self {
        self.summarize = summarize;
        self
    }

    /// Sets the target language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the source language.
    pub fn source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = Some(source_language.into());
        self
    }

    /// Enables or disables timestamps.
    pub fn timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Checks the option combination without touching the filesystem.
    ///
    /// Local files are checked for existence when the upload is prepared.
    pub fn validate(&self) -> HasabResult<()> {
        match (&self.file, &self.url) {
            (None, None) => Err(HasabError::invalid_input(
                "file",
                "either `file` or `url` is required",
            )),
            (Some(_), Some(_)) => Err(HasabError::invalid_input(
                "file",
                "`file` and `url` are mutually exclusive",
            )),
            (None, Some(url)) if url.trim().is_empty() => {
                Err(HasabError::invalid_input("url", "`url` cannot be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Validates the options, checks a local file exists, and applies defaults.
    pub(crate) async fn prepare(self) -> HasabResult<PreparedUpload> {
        self.validate()?;

        if let Some(path) = self.file.as_ref().and_then(FileInput::local_path) {
            check_local_file(path).await?;
        }

        let source = match (self.file, self.url) {
            (Some(file), _) => AudioSource::File(file),
            (None, Some(url)) => AudioSource::Url(url),
            (None, None) => {
                return Err(HasabError::invalid_input(
                    "file",
                    "either `file` or `url` is required",
                ))
            }
        };

        let key = self.key.unwrap_or_else(|| Uuid::new_v4().to_string());

        let fields = vec![
            ("key", Some(FormValue::from(key))),
            ("is_meeting", Some(FormValue::from(self.is_meeting))),
            ("transcribe", Some(FormValue::from(self.transcribe))),
            ("translate", Some(FormValue::from(self.translate))),
            ("summarize", Some(FormValue::from(self.summarize))),
            ("language", Some(FormValue::from(self.language))),
            ("source_language", self.source_language.map(FormValue::from)),
            ("timestamps", Some(FormValue::from(self.timestamps))),
        ];

        Ok(PreparedUpload { source, fields })
    }
}

async fn check_local_file(path: &Path) -> HasabResult<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(HasabError::invalid_input(
            "file",
            format!("'{}' is not a file", path.display()),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(HasabError::invalid_input(
            "file",
            format!("file '{}' does not exist", path.display()),
        )),
        Err(e) => Err(HasabError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}
