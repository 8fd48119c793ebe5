//! Speech adapters.
//!
//! - [`elevenlabs`]: text-to-speech.
//! - [`whisper`]: transcription of recorded clips.
//! - [`file_sink`]: writes synthesized audio to numbered files.

pub mod elevenlabs;
pub mod file_sink;
pub mod whisper;
