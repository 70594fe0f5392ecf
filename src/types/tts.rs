//! Text-to-speech request body.

use serde::Serialize;

/// Body of a synthesis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizeRequest {
    /// Text to speak.
    pub text: String,
    /// Language code of the text.
    pub language: String,
    /// Voice to use; sent as `null` to let the service choose.
    pub speaker_name: Option<String>,
}

impl SynthesizeRequest {
    /// Creates a synthesis request.
    pub fn new(
        text: impl Into<String>,
        language: impl Into<String>,
        speaker_name: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            speaker_name,
        }
    }
}
