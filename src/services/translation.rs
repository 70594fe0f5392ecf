//! Translation service.

use std::sync::Arc;
use tracing::instrument;

use super::transcription::upload_audio;
use crate::errors::HasabResult;
use crate::transport::ApiTransport;
use crate::types::response::ApiResponse;
use crate::types::transcription::TranscriptionOptions;
use crate::types::translation::TranslationOptions;

/// Text and audio translation service.
pub struct TranslationService {
    http: Arc<ApiTransport>,
}

impl TranslationService {
    /// Creates a new translation service.
    pub fn new(http: Arc<ApiTransport>) -> Self {
        Self { http }
    }

    /// Translates text between two languages.
    ///
    /// Sent as a multipart form with `text` encoded as a JSON array.
    #[instrument(skip(self, options))]
    pub async fn translate(&self, options: TranslationOptions) -> HasabResult<ApiResponse> {
        let fields = options.into_fields()?;
        self.http.post_multipart("translate", Vec::new(), fields).await
    }

    /// Transcribes and translates audio.
    ///
    /// Same as [`TranscriptionService::upload`](super::TranscriptionService::upload)
    /// with `translate` forced on.
    #[instrument(skip(self, options))]
    pub async fn upload(&self, options: TranscriptionOptions) -> HasabResult<ApiResponse> {
        upload_audio(&self.http, options.translate(true)).await
    }

    /// Lists previous translations. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn history(&self, page: u32) -> HasabResult<ApiResponse> {
        self.http
            .get("translations", &[("page", page.max(1).to_string())])
            .await
    }
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService").finish()
    }
}
