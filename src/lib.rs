//! Hasab AI Client Library
//!
//! An async Rust client for the Hasab AI API, covering speech and text
//! services for Ethiopian languages.
//!
//! # Features
//!
//! - **Transcription**: Upload local audio or a remote URL, with optional
//!   translation, summaries and timestamps
//! - **Translation**: Text translation and audio translation
//! - **Text-to-Speech**: Synthesis, speaker listing and history
//! - **Chat**: Text and image chat with conversation management
//! - **Pass-through responses**: JSON is returned exactly as sent; audio and
//!   other binary replies are wrapped in a [`BinaryEnvelope`]
//! - **Observability**: `tracing` spans, redacted error logging, request metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hasab_client::{HasabClient, TranslationOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HasabClient::from_env()?;
//!
//!     let response = client
//!         .translation()
//!         .translate(
//!             TranslationOptions::new()
//!                 .text("Hello")
//!                 .source_language("eng")
//!                 .target_language("amh"),
//!         )
//!         .await?;
//!
//!     println!("{}", response);
//!     Ok(())
//! }
//! ```
//!
//! # Saving synthesized audio
//!
//! ```rust,no_run
//! use hasab_client::{BinaryEnvelope, HasabClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HasabClient::from_api_key("hsb_your_api_key")?;
//!
//!     let response = client.tts().synthesize("ሰላም", "amh", None).await?;
//!
//!     if let Some(audio) = BinaryEnvelope::from_response(&response) {
//!         tokio::fs::write("hello.mp3", audio.bytes()?).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{HasabClient, HasabClientBuilder};
pub use config::{HasabConfig, HasabConfigBuilder};
pub use errors::{HasabError, HasabResult};
pub use observability::{init_logging, LogConfig, LogFormat, MetricsCollector, RequestMetrics};

// Type re-exports
pub use types::chat::{ChatRequest, DEFAULT_CHAT_MODEL};
pub use types::file::{FileInput, FileSource, FormValue};
pub use types::response::{ApiResponse, BinaryEnvelope};
pub use types::transcription::{AudioSource, TranscriptionOptions, DEFAULT_LANGUAGE};
pub use types::translation::{TranslationOptions, TranslationText};
pub use types::tts::SynthesizeRequest;

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
