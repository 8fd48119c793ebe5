//! Speech ports: synthesis, transcription, utterance capture and playback.
//!
//! The voice adapter in [`crate::voice`] composes these; none of them know
//! about wizard state.

use brandkit_types::error::{ServiceError, VoiceError};
use brandkit_types::media::{AudioClip, RecognitionEvent, SpeechRequest};

/// Turns full text into audio.
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(
        &self,
        request: &SpeechRequest,
    ) -> impl std::future::Future<Output = Result<AudioClip, ServiceError>> + Send;
}

/// Transcribes a recorded clip into text.
pub trait SpeechRecognizer: Send + Sync {
    fn transcribe(
        &self,
        clip: &AudioClip,
    ) -> impl std::future::Future<Output = Result<String, ServiceError>> + Send;
}

/// A single-utterance, push-to-talk input source.
///
/// Each call to `listen` captures one utterance and yields recognition events
/// for it, ending with `Final` or `NoSpeech`. Returning `Ok(None)` means the
/// source is closed (e.g. end of input).
pub trait UtteranceSource: Send {
    fn next_event(
        &mut self,
    ) -> impl std::future::Future<Output = Result<Option<RecognitionEvent>, VoiceError>> + Send;
}

/// Plays audio. Returns once playback has finished.
pub trait AudioSink: Send {
    fn play(
        &mut self,
        clip: &AudioClip,
    ) -> impl std::future::Future<Output = Result<(), VoiceError>> + Send;
}
