//! Chat completion request.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::file::FileInput;

/// Model used for image chats when none is given.
pub const DEFAULT_CHAT_MODEL: &str = "hasab-1-lite";

/// A chat completion request.
///
/// Without an image the request is sent as JSON exactly as built, including
/// any extra parameters. With an image it is sent as a multipart form holding
/// the image, `message` and `model`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    /// User message.
    pub message: Option<String>,
    /// Model to use.
    pub model: Option<String>,
    /// Image attachment.
    pub image: Option<FileInput>,
    /// Additional parameters passed through unchanged.
    ///
    /// Entries named `message` or `model` are ignored while the matching
    /// field is set.
    pub extra: Map<String, Value>,
}

impl ChatRequest {
    /// Creates a request with a user message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sets the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attaches an image.
    pub fn image(mut self, image: impl Into<FileInput>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Adds a pass-through parameter.
    ///
    /// String values for `message` and `model` set those fields instead.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        match value.into() {
            Value::String(message) if name == "message" => self.message = Some(message),
            Value::String(model) if name == "model" => self.model = Some(model),
            value => {
                if name == "message" {
                    self.message = None;
                } else if name == "model" {
                    self.model = None;
                }
                self.extra.insert(name, value);
            }
        }
        self
    }

    /// Builds the JSON body: `message`, `model`, then the extra parameters.
    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(message) = &self.message {
            body.insert("message".to_string(), Value::String(message.clone()));
        }
        if let Some(model) = &self.model {
            body.insert("model".to_string(), Value::String(model.clone()));
        }
        for (name, value) in &self.extra {
            if body.contains_key(name) {
                tracing::debug!(param = %name, "Ignoring chat parameter shadowed by a typed field");
                continue;
            }
            body.insert(name.clone(), value.clone());
        }
        body
    }
}

impl Serialize for ChatRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_body().serialize(serializer)
    }
}
