//! Service implementations for the Hasab API.

mod chat;
mod transcription;
mod translation;
mod tts;

pub use chat::ChatService;
pub use transcription::TranscriptionService;
pub use translation::TranslationService;
pub use tts::TtsService;
