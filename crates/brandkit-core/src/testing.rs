//! Hand-written test doubles for the core ports.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use brandkit_types::error::{ServiceError, VoiceError};
use brandkit_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};
use brandkit_types::media::{
    AudioClip, GeneratedImage, ImageRequest, ImageSearchQuery, LogoRequest, PhotoRecord,
    PhotoUrls, RecognitionEvent, SpeechRequest,
};

use crate::llm::provider::LlmProvider;
use crate::service::image::{ImageGenerator, ImageSearch};
use crate::service::logo::LogoGenerator;
use crate::service::speech::{AudioSink, SpeechSynthesizer, UtteranceSource};

const CAPABILITIES: ProviderCapabilities = ProviderCapabilities {
    vision: false,
    json_mode: false,
    max_context_tokens: 16_000,
    max_output_tokens: 4_096,
};

// ---------------------------------------------------------------------------
// ScriptedProvider
// ---------------------------------------------------------------------------

enum Script {
    /// First rule whose needle appears in the system prompt or any message wins.
    Routed(Vec<(String, String)>),
    /// Replies handed out in order; errors once exhausted.
    Queue(Mutex<VecDeque<String>>),
    Failing,
}

/// Completion provider that replies from a script and records every request.
pub struct ScriptedProvider {
    script: Script,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: &str) -> Self {
        Self::routed(&[("", reply)])
    }

    pub fn routed(rules: &[(&str, &str)]) -> Self {
        Self::with_script(Script::Routed(
            rules
                .iter()
                .map(|(needle, reply)| (needle.to_string(), reply.to_string()))
                .collect(),
        ))
    }

    pub fn queue(replies: &[&str]) -> Self {
        Self::with_script(Script::Queue(Mutex::new(
            replies.iter().map(|r| r.to_string()).collect(),
        )))
    }

    pub fn failing() -> Self {
        Self::with_script(Script::Failing)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn reply_for(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let haystack = request
            .system
            .iter()
            .chain(request.messages.iter().map(|m| &m.content))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let reply = match &self.script {
            Script::Routed(rules) => rules
                .iter()
                .find(|(needle, _)| haystack.contains(needle.as_str()))
                .map(|(_, reply)| reply.clone()),
            Script::Queue(queue) => queue.lock().unwrap().pop_front(),
            Script::Failing => None,
        };
        reply.ok_or_else(|| LlmError::Provider {
            message: "no scripted reply".to_string(),
        })
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &CAPABILITIES
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let content = self.reply_for(request)?;
        Ok(CompletionResponse {
            id: "resp-scripted".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
            },
        })
    }
}

/// Lets a test keep a handle on the provider after boxing it.
impl LlmProvider for Arc<ScriptedProvider> {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &CAPABILITIES
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        ScriptedProvider::complete(self, request).await
    }
}

// ---------------------------------------------------------------------------
// Image search
// ---------------------------------------------------------------------------

pub fn photo(id: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        description: None,
        urls: PhotoUrls {
            raw: format!("https://img/{id}/raw?ixid=1"),
            small: format!("https://img/{id}/small?ixid=1"),
            ..PhotoUrls::default()
        },
    }
}

pub struct RecordingSearch {
    photos: Vec<PhotoRecord>,
    queries: Mutex<Vec<String>>,
}

impl RecordingSearch {
    pub fn with(photos: Vec<PhotoRecord>) -> Self {
        Self {
            photos,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ImageSearch for RecordingSearch {
    async fn search(&self, query: &ImageSearchQuery) -> Result<Vec<PhotoRecord>, ServiceError> {
        self.queries.lock().unwrap().push(query.query.clone());
        Ok(self.photos.iter().take(query.per_page as usize).cloned().collect())
    }
}

pub struct FailingSearch;

impl ImageSearch for FailingSearch {
    async fn search(&self, _query: &ImageSearchQuery) -> Result<Vec<PhotoRecord>, ServiceError> {
        Err(ServiceError::Http {
            service: "image search",
            status: 403,
            body: "Rate Limit Exceeded".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Image generation
// ---------------------------------------------------------------------------

/// Returns one URL per call, failing on the call with the given index.
pub struct StaticImages {
    fail_on: usize,
    calls: AtomicUsize,
    sizes: Mutex<Vec<String>>,
}

impl StaticImages {
    pub fn failing_on(fail_on: usize) -> Self {
        Self {
            fail_on,
            calls: AtomicUsize::new(0),
            sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn sizes(&self) -> Vec<String> {
        self.sizes.lock().unwrap().clone()
    }
}

impl ImageGenerator for StaticImages {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, ServiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.sizes.lock().unwrap().push(request.size.clone());
        if call == self.fail_on {
            return Err(ServiceError::RateLimited("image generation"));
        }
        Ok(vec![GeneratedImage {
            url: format!("https://images.example/{call}.png"),
        }])
    }
}

/// Answers every call after a fixed delay.
pub struct SlowImages {
    delay: Duration,
}

impl SlowImages {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ImageGenerator for SlowImages {
    async fn generate(&self, _request: &ImageRequest) -> Result<Vec<GeneratedImage>, ServiceError> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![GeneratedImage {
            url: "https://images.example/slow.png".to_string(),
        }])
    }
}

pub struct FailingImages;

impl ImageGenerator for FailingImages {
    async fn generate(&self, _request: &ImageRequest) -> Result<Vec<GeneratedImage>, ServiceError> {
        Err(ServiceError::RateLimited("image generation"))
    }
}

// ---------------------------------------------------------------------------
// Logo
// ---------------------------------------------------------------------------

pub struct StaticLogo;

impl LogoGenerator for StaticLogo {
    async fn generate_logo(&self, request: &LogoRequest) -> Result<String, ServiceError> {
        let slug = request.brand_name.to_lowercase().replace(' ', "-");
        Ok(format!("https://logos.example/{slug}.png"))
    }
}

pub struct UnconfiguredLogo;

impl LogoGenerator for UnconfiguredLogo {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate_logo(&self, _request: &LogoRequest) -> Result<String, ServiceError> {
        Err(ServiceError::NotConfigured("logo service"))
    }
}

// ---------------------------------------------------------------------------
// Voice
// ---------------------------------------------------------------------------

pub struct EchoSynthesizer {
    pub fail: bool,
}

impl SpeechSynthesizer for EchoSynthesizer {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, ServiceError> {
        if self.fail {
            return Err(ServiceError::AuthenticationFailed("speech synthesis"));
        }
        Ok(AudioClip::mpeg(request.text.as_bytes().to_vec()))
    }
}

/// Records what was played, as UTF-8 text of the clip bytes.
#[derive(Default)]
pub struct RecordingSink {
    pub played: Vec<String>,
    pub fail: bool,
}

impl AudioSink for RecordingSink {
    async fn play(&mut self, clip: &AudioClip) -> Result<(), VoiceError> {
        if self.fail {
            return Err(VoiceError::Playback("device unavailable".to_string()));
        }
        self.played.push(String::from_utf8_lossy(&clip.bytes).into_owned());
        Ok(())
    }
}

/// Emits scripted recognition events, then reports the source closed.
pub struct ScriptedUtterances {
    events: VecDeque<Result<RecognitionEvent, VoiceError>>,
}

impl ScriptedUtterances {
    pub fn new(events: Vec<Result<RecognitionEvent, VoiceError>>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl UtteranceSource for ScriptedUtterances {
    async fn next_event(&mut self) -> Result<Option<RecognitionEvent>, VoiceError> {
        self.events.pop_front().transpose()
    }
}
