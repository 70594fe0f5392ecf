//! File inputs and form field values for multipart uploads.

use std::path::{Path, PathBuf};

use crate::errors::{HasabError, HasabResult};
use crate::transport::MultipartPart;

/// Where the bytes of a file part come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// A file on the local filesystem, read when the request is sent.
    Path(PathBuf),
    /// An in-memory buffer.
    Bytes(Vec<u8>),
}

/// A file to attach to a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInput {
    /// Source of the file contents.
    pub source: FileSource,
    /// File name sent with the part. Defaults to the path's base name.
    pub filename: Option<String>,
    /// Content type of the part. Left to the server when absent.
    pub content_type: Option<String>,
}

impl FileInput {
    /// Creates a file input backed by a local path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: FileSource::Path(path.into()),
            filename: None,
            content_type: None,
        }
    }

    /// Creates a file input backed by an in-memory buffer.
    pub fn bytes(data: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            source: FileSource::Bytes(data),
            filename: Some(filename.into()),
            content_type: None,
        }
    }

    /// Overrides the file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the content type, e.g. `audio/mpeg`.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the local path, if this input is path-backed.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Bytes(_) => None,
        }
    }

    /// Resolves the file name, falling back to the path's base name and
    /// finally to `fallback`.
    pub fn resolved_filename(&self, fallback: &str) -> String {
        if let Some(name) = &self.filename {
            return name.clone();
        }
        self.local_path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Reads the file and turns it into a multipart part named `name`.
    ///
    /// The file is read completely and closed before this returns.
    pub(crate) async fn into_part(self, name: &str) -> HasabResult<MultipartPart> {
        if let Some(content_type) = &self.content_type {
            content_type.parse::<mime::Mime>().map_err(|e| {
                HasabError::invalid_input(
                    name,
                    format!("invalid content type '{}': {}", content_type, e),
                )
            })?;
        }

        let filename = self.resolved_filename(name);

        let data = match self.source {
            FileSource::Bytes(data) => data,
            FileSource::Path(path) => tokio::fs::read(&path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HasabError::invalid_input(
                        name,
                        format!("file '{}' does not exist", path.display()),
                    )
                } else {
                    HasabError::FileRead {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                }
            })?,
        };

        Ok(MultipartPart::File {
            name: name.to_string(),
            filename,
            content_type: self.content_type,
            data,
        })
    }
}

impl From<&str> for FileInput {
    fn from(path: &str) -> Self {
        Self::path(path)
    }
}

impl From<String> for FileInput {
    fn from(path: String) -> Self {
        Self::path(path)
    }
}

impl From<PathBuf> for FileInput {
    fn from(path: PathBuf) -> Self {
        Self::path(path)
    }
}

impl From<&Path> for FileInput {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

/// A scalar value sent as a form field or JSON member.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Text value.
    Text(String),
    /// Boolean value, rendered as `true`/`false` in forms.
    Bool(bool),
    /// Integer value.
    Integer(i64),
}

impl FormValue {
    /// Renders the value as multipart text.
    pub fn render(&self) -> String {
        match self {
            FormValue::Text(s) => s.clone(),
            FormValue::Bool(b) => b.to_string(),
            FormValue::Integer(i) => i.to_string(),
        }
    }

    /// Converts the value to JSON, keeping its native type.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FormValue::Text(s) => serde_json::Value::String(s.clone()),
            FormValue::Bool(b) => serde_json::Value::Bool(*b),
            FormValue::Integer(i) => serde_json::Value::from(*i),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_filename_defaults_to_base_name() {
        let input = FileInput::path("/tmp/audio/recording.mp3");
        assert_eq!(input.resolved_filename("file"), "recording.mp3");

        let named = input.with_filename("meeting.mp3");
        assert_eq!(named.resolved_filename("file"), "meeting.mp3");
    }

    #[test]
    fn test_form_value_rendering() {
        assert_eq!(FormValue::from(true).render(), "true");
        assert_eq!(FormValue::from(false).render(), "false");
        assert_eq!(FormValue::from(3_i64).render(), "3");
        assert_eq!(FormValue::from("auto").to_json(), serde_json::json!("auto"));
        assert_eq!(FormValue::from(false).to_json(), serde_json::json!(false));
    }

    #[tokio::test]
    async fn test_into_part_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"RIFF....WAVE").unwrap();

        let part = FileInput::path(file.path())
            .with_content_type("audio/wav")
            .into_part("file")
            .await
            .unwrap();

        match part {
            MultipartPart::File {
                name,
                content_type,
                data,
                ..
            } => {
                assert_eq!(name, "file");
                assert_eq!(content_type.as_deref(), Some("audio/wav"));
                assert_eq!(data, b"RIFF....WAVE");
            }
            other => panic!("expected file part, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_into_part_missing_file_is_invalid_input() {
        let result = FileInput::path("/definitely/not/here.mp3")
            .into_part("file")
            .await;

        match result {
            Err(HasabError::InvalidInput { field, .. }) => assert_eq!(field, "file"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_into_part_rejects_bad_content_type() {
        let result = FileInput::bytes(vec![1, 2, 3], "a.png")
            .with_content_type("not a mime")
            .into_part("image")
            .await;

        assert!(matches!(result, Err(HasabError::InvalidInput { .. })));
    }
}
