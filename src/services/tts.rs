//! Text-to-speech service.

use std::fmt::Display;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::HasabResult;
use crate::transport::ApiTransport;
use crate::types::response::ApiResponse;
use crate::types::tts::SynthesizeRequest;

/// Text-to-speech service.
pub struct TtsService {
    http: Arc<ApiTransport>,
}

impl TtsService {
    /// Creates a new TTS service.
    pub fn new(http: Arc<ApiTransport>) -> Self {
        Self { http }
    }

    /// Synthesizes speech from text.
    ///
    /// When the service replies with audio instead of JSON, the response is
    /// a [`BinaryEnvelope`](crate::types::response::BinaryEnvelope).
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn synthesize(
        &self,
        text: &str,
        language: &str,
        speaker: Option<&str>,
    ) -> HasabResult<ApiResponse> {
        let request = SynthesizeRequest::new(text, language, speaker.map(str::to_string));
        self.http.post("tts/synthesize", &request).await
    }

    /// Lists available speakers, optionally for one language.
    #[instrument(skip(self))]
    pub async fn speakers(&self, language: Option<&str>) -> HasabResult<ApiResponse> {
        let query: Vec<(&str, String)> = language
            .map(|language| vec![("language", language.to_string())])
            .unwrap_or_default();
        self.http.get("tts/speakers", &query).await
    }

    /// Lists previous syntheses.
    #[instrument(skip(self))]
    pub async fn history(&self) -> HasabResult<ApiResponse> {
        self.http.get("tts/history", &[]).await
    }

    /// Deletes a synthesis record.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete(&self, id: impl Display + Send) -> HasabResult<ApiResponse> {
        self.http.delete(&format!("tts/record/{}", id)).await
    }
}

impl std::fmt::Debug for TtsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtsService").finish()
    }
}
