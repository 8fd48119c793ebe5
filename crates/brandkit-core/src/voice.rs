//! Voice I/O adapter.
//!
//! Wraps a synthesizer, an audio sink and an utterance source around the
//! text wizard. Playback always finishes before listening starts, and
//! listening resumes after playback unless the wizard is done. Any failure
//! disables the adapter for the rest of the session; nothing is retried.

use std::fmt;

use brandkit_types::error::VoiceError;
use brandkit_types::media::{RecognitionEvent, SpeechRequest, VoiceSettings};
use brandkit_types::wizard::WizardStep;

use crate::service::speech::{AudioSink, SpeechSynthesizer, UtteranceSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
    Speaking,
    Disabled,
}

impl fmt::Display for VoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceState::Idle => write!(f, "idle"),
            VoiceState::Listening => write!(f, "listening"),
            VoiceState::Speaking => write!(f, "speaking"),
            VoiceState::Disabled => write!(f, "disabled"),
        }
    }
}

/// Result of one listening pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heard {
    /// The settled final transcript.
    Speech(String),
    /// The utterance ended without usable speech.
    Silence,
    /// The source has no more input.
    Closed,
}

pub struct VoiceAdapter<T, U, A> {
    synthesizer: T,
    source: U,
    sink: A,
    voice: VoiceSettings,
    state: VoiceState,
}

impl<T, U, A> VoiceAdapter<T, U, A>
where
    T: SpeechSynthesizer,
    U: UtteranceSource,
    A: AudioSink,
{
    pub fn new(synthesizer: T, source: U, sink: A, voice: VoiceSettings) -> Self {
        Self {
            synthesizer,
            source,
            sink,
            voice,
            state: VoiceState::Idle,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    fn disable(&mut self, err: VoiceError) -> VoiceError {
        tracing::warn!(error = %err, "voice interaction disabled");
        self.state = VoiceState::Disabled;
        err
    }

    /// Synthesize `text` and play it to completion.
    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub async fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        if self.state == VoiceState::Disabled {
            return Err(VoiceError::Disabled);
        }
        self.state = VoiceState::Speaking;

        let request = SpeechRequest {
            text: text.to_string(),
            voice: self.voice.clone(),
        };
        let clip = match self.synthesizer.synthesize(&request).await {
            Ok(clip) => clip,
            Err(e) => return Err(self.disable(VoiceError::Synthesis(e))),
        };
        if let Err(e) = self.sink.play(&clip).await {
            return Err(self.disable(e));
        }

        self.state = VoiceState::Idle;
        Ok(())
    }

    /// Capture one utterance. Interim results are discarded.
    pub async fn listen(&mut self) -> Result<Heard, VoiceError> {
        if self.state == VoiceState::Disabled {
            return Err(VoiceError::Disabled);
        }
        self.state = VoiceState::Listening;

        let heard = loop {
            match self.source.next_event().await {
                Ok(Some(RecognitionEvent::Interim(_))) => continue,
                Ok(Some(RecognitionEvent::Final(text))) => {
                    let text = text.trim();
                    break if text.is_empty() {
                        Heard::Silence
                    } else {
                        Heard::Speech(text.to_string())
                    };
                }
                Ok(Some(RecognitionEvent::NoSpeech)) => break Heard::Silence,
                Ok(None) => break Heard::Closed,
                Err(e) => return Err(self.disable(e)),
            }
        };

        self.state = VoiceState::Idle;
        Ok(heard)
    }

    /// Speak a bot reply, then listen for the answer unless the wizard is
    /// done. Returns `None` when no listening pass was started.
    pub async fn reply_and_listen(
        &mut self,
        reply: &str,
        step: WizardStep,
    ) -> Result<Option<Heard>, VoiceError> {
        self.speak(reply).await?;
        if step == WizardStep::Done {
            return Ok(None);
        }
        self.listen().await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_types::config::SpeechConfig;

    use crate::testing::{EchoSynthesizer, RecordingSink, ScriptedUtterances};

    type TestAdapter = VoiceAdapter<EchoSynthesizer, ScriptedUtterances, RecordingSink>;

    fn adapter(events: Vec<Result<RecognitionEvent, VoiceError>>) -> TestAdapter {
        VoiceAdapter::new(
            EchoSynthesizer { fail: false },
            ScriptedUtterances::new(events),
            RecordingSink::default(),
            SpeechConfig::default().voice(),
        )
    }

    #[tokio::test]
    async fn interim_results_are_ignored() {
        let mut voice = adapter(vec![
            Ok(RecognitionEvent::Interim("Fli".into())),
            Ok(RecognitionEvent::Interim("Flight Mo".into())),
            Ok(RecognitionEvent::Final("Flight Mobile".into())),
        ]);
        assert_eq!(voice.listen().await.unwrap(), Heard::Speech("Flight Mobile".into()));
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[tokio::test]
    async fn no_speech_is_silence() {
        let mut voice = adapter(vec![Ok(RecognitionEvent::NoSpeech)]);
        assert_eq!(voice.listen().await.unwrap(), Heard::Silence);
        assert_eq!(voice.listen().await.unwrap(), Heard::Closed);
    }

    #[tokio::test]
    async fn playback_finishes_before_listening() {
        let mut voice = adapter(vec![Ok(RecognitionEvent::Final("yes".into()))]);
        let heard = voice
            .reply_and_listen("Tell us a bit about your brand.", WizardStep::AwaitingBrandDescription)
            .await
            .unwrap();
        assert_eq!(heard, Some(Heard::Speech("yes".into())));
        assert_eq!(voice.sink().played, vec!["Tell us a bit about your brand."]);
    }

    #[tokio::test]
    async fn done_step_does_not_listen() {
        let mut voice = adapter(vec![Ok(RecognitionEvent::Final("ignored".into()))]);
        let heard = voice.reply_and_listen("All set.", WizardStep::Done).await.unwrap();
        assert_eq!(heard, None);
        // The scripted event was never consumed.
        assert_eq!(voice.listen().await.unwrap(), Heard::Speech("ignored".into()));
    }

    #[tokio::test]
    async fn synthesis_failure_disables() {
        let mut voice = VoiceAdapter::new(
            EchoSynthesizer { fail: true },
            ScriptedUtterances::new(vec![]),
            RecordingSink::default(),
            SpeechConfig::default().voice(),
        );
        assert!(matches!(voice.speak("hi").await, Err(VoiceError::Synthesis(_))));
        assert_eq!(voice.state(), VoiceState::Disabled);
        assert!(matches!(voice.listen().await, Err(VoiceError::Disabled)));
    }

    #[tokio::test]
    async fn recognition_failure_disables() {
        let mut voice = adapter(vec![Err(VoiceError::Recognition("mic busy".into()))]);
        assert!(voice.listen().await.is_err());
        assert_eq!(voice.state(), VoiceState::Disabled);
        assert!(matches!(voice.speak("hi").await, Err(VoiceError::Disabled)));
    }

    #[tokio::test]
    async fn playback_failure_disables() {
        let mut voice = VoiceAdapter::new(
            EchoSynthesizer { fail: false },
            ScriptedUtterances::new(vec![]),
            RecordingSink {
                played: vec![],
                fail: true,
            },
            SpeechConfig::default().voice(),
        );
        assert!(matches!(voice.speak("hi").await, Err(VoiceError::Playback(_))));
        assert_eq!(voice.state(), VoiceState::Disabled);
    }
}
