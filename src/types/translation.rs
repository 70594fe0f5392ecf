//! Text translation options.

use super::file::FormValue;
use crate::errors::{HasabError, HasabResult};

/// Text to translate: a single string or a batch of strings.
///
/// A bare string is sent as a one-element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationText(Vec<String>);

impl TranslationText {
    /// Returns the texts.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns true if there is nothing to translate.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|t| t.is_empty())
    }
}

impl From<&str> for TranslationText {
    fn from(text: &str) -> Self {
        Self(vec![text.to_string()])
    }
}

impl From<String> for TranslationText {
    fn from(text: String) -> Self {
        Self(vec![text])
    }
}

impl From<Vec<String>> for TranslationText {
    fn from(texts: Vec<String>) -> Self {
        Self(texts)
    }
}

impl From<Vec<&str>> for TranslationText {
    fn from(texts: Vec<&str>) -> Self {
        Self(texts.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for TranslationText {
    fn from(texts: &[&str]) -> Self {
        Self(texts.iter().map(|t| t.to_string()).collect())
    }
}

/// Options for translating text between languages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Text to translate (required).
    pub text: Option<TranslationText>,
    /// Language of the text (required).
    pub source_language: Option<String>,
    /// Language to translate into (required).
    pub target_language: Option<String>,
}

impl TranslationOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text to translate.
    pub fn text(mut self, text: impl Into<TranslationText>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the source language.
    pub fn source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = Some(language.into());
        self
    }

    /// Sets the target language.
    pub fn target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = Some(language.into());
        self
    }

    /// Validates that every required option is present.
    pub fn validate(&self) -> HasabResult<()> {
        match &self.text {
            Some(text) if !text.is_empty() => {}
            _ => return Err(HasabError::invalid_input("text", "`text` is required")),
        }
        require(&self.source_language, "source_language")?;
        require(&self.target_language, "target_language")?;
        Ok(())
    }

    /// Validates and renders the form fields; `text` is a JSON array string.
    pub(crate) fn into_fields(self) -> HasabResult<Vec<(&'static str, Option<FormValue>)>> {
        self.validate()?;

        let text = match self.text {
            Some(text) => serde_json::to_string(text.as_slice())?,
            None => return Err(HasabError::invalid_input("text", "`text` is required")),
        };

        Ok(vec![
            ("text", Some(FormValue::from(text))),
            ("source_language", self.source_language.map(FormValue::from)),
            ("target_language", self.target_language.map(FormValue::from)),
        ])
    }
}

fn require(value: &Option<String>, field: &str) -> HasabResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(HasabError::invalid_input(
            field,
            format!("`{}` is required", field),
        )),
    }
}
