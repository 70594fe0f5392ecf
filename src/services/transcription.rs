//! Audio transcription service.

use serde_json::{Map, Value};
use std::fmt::Display;
use std::sync::Arc;
use tracing::instrument;

use crate::errors::HasabResult;
use crate::transport::ApiTransport;
use crate::types::response::ApiResponse;
use crate::types::transcription::{AudioSource, TranscriptionOptions};

const UPLOAD_PATH: &str = "upload-audio";

/// Audio transcription service.
pub struct TranscriptionService {
    http: Arc<ApiTransport>,
}

impl TranscriptionService {
    /// Creates a new transcription service.
    pub fn new(http: Arc<ApiTransport>) -> Self {
        Self { http }
    }

    /// Uploads audio for transcription.
    ///
    /// A local file is sent as multipart form data; a URL is sent as JSON.
    /// Options are validated before anything is sent.
    #[instrument(skip(self, options))]
    pub async fn upload(&self, options: TranscriptionOptions) -> HasabResult<ApiResponse> {
        upload_audio(&self.http, options).await
    }

    /// Lists previous transcriptions. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn history(&self, page: u32) -> HasabResult<ApiResponse> {
        self.http
            .get("audios", &[("page", page.max(1).to_string())])
            .await
    }

    /// Fetches a single transcription.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get(&self, id: impl Display + Send) -> HasabResult<ApiResponse> {
        self.http.get(&format!("audios/{}", id), &[]).await
    }

    /// Deletes a transcription.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn delete(&self, id: impl Display + Send) -> HasabResult<ApiResponse> {
        self.http.delete(&format!("audios/{}", id)).await
    }
}

/// Validates `options` and sends them to the upload endpoint.
pub(crate) async fn upload_audio(
    http: &ApiTransport,
    options: TranscriptionOptions,
) -> HasabResult<ApiResponse> {
    let prepared = options.prepare().await?;

    match prepared.source {
        AudioSource::File(file) => {
            tracing::info!(
                filename = %file.resolved_filename("file"),
                "Uploading audio file for transcription"
            );
            http.post_multipart(UPLOAD_PATH, vec![("file", file)], prepared.fields)
                .await
        }
        AudioSource::Url(url) => {
            tracing::info!(url = %url, "Submitting audio URL for transcription");
            let mut body = Map::new();
            body.insert("url".to_string(), Value::String(url));
            for (name, value) in prepared.fields {
                if let Some(value) = value {
                    body.insert(name.to_string(), value.to_json());
                }
            }
            http.post(UPLOAD_PATH, &Value::Object(body)).await
        }
    }
}

impl std::fmt::Debug for TranscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionService").finish()
    }
}
