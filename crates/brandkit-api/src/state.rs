//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. The wizard and pipeline are generic over the hosted-service ports;
//! AppState pins them to the infra adapters.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use brandkit_core::assets::pipeline::{AssetPipeline, PipelineSettings};
use brandkit_core::llm::box_provider::BoxLlmProvider;
use brandkit_core::wizard::controller::BrandWizard;
use brandkit_infra::config::{ApiKeys, load_app_config, resolve_data_dir};
use brandkit_infra::images::dalle::DalleImageGenerator;
use brandkit_infra::images::unsplash::UnsplashSearch;
use brandkit_infra::llm::create_provider;
use brandkit_infra::logo::HttpLogoGenerator;
use brandkit_infra::session_store::InMemorySessionStore;
use brandkit_infra::speech::elevenlabs::ElevenLabsSynthesizer;
use brandkit_infra::speech::whisper::WhisperRecognizer;
use brandkit_infra::upload::{CloudinaryCredentials, CloudinaryUploader};
use brandkit_types::config::AppConfig;

use crate::traced::TracedProvider;

/// The wizard pinned to the hosted-service adapters.
pub type ConcreteWizard = BrandWizard<DalleImageGenerator, UnsplashSearch, HttpLogoGenerator>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<ConcreteWizard>,
    pub sessions: Arc<InMemorySessionStore>,
    pub synthesizer: Arc<ElevenLabsSynthesizer>,
    pub recognizer: Arc<WhisperRecognizer>,
    pub uploader: Arc<CloudinaryUploader>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
}

fn copy_secret(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_string())
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// config and keys, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_app_config(&data_dir).await;
        let keys = ApiKeys::from_env();
        tracing::debug!(keys = ?keys.configured(), data_dir = %data_dir.display(), "resolved api keys");

        let provider = create_provider(&config.completion, keys.openai.as_ref())
            .context("the completion service needs OPENAI_API_KEY")?;

        Ok(Self::from_parts(config, data_dir, provider, keys))
    }

    /// Wire services from already-resolved parts. The completion provider is
    /// wrapped for GenAI span recording.
    pub fn from_parts(
        config: AppConfig,
        data_dir: PathBuf,
        provider: BoxLlmProvider,
        keys: ApiKeys,
    ) -> Self {
        let provider = Arc::new(BoxLlmProvider::new(TracedProvider::new(provider)));

        let images = DalleImageGenerator::new(&config.images, keys.openai.as_ref().map(copy_secret));
        let search = UnsplashSearch::new(&config.image_search, keys.unsplash);
        let logo = HttpLogoGenerator::new(&config.logo);
        let pipeline = AssetPipeline::new(
            provider,
            images,
            search,
            logo,
            PipelineSettings::from_config(&config),
        );

        let synthesizer = ElevenLabsSynthesizer::new(&config.speech, keys.elevenlabs);
        let recognizer = WhisperRecognizer::new(&config.speech, keys.openai);
        let credentials = match (keys.cloudinary_key, keys.cloudinary_secret) {
            (Some(api_key), Some(api_secret)) => Some(CloudinaryCredentials { api_key, api_secret }),
            _ => None,
        };
        let uploader = CloudinaryUploader::new(&config.upload, credentials);

        Self {
            wizard: Arc::new(BrandWizard::new(pipeline)),
            sessions: Arc::new(InMemorySessionStore::new()),
            synthesizer: Arc::new(synthesizer),
            recognizer: Arc::new(recognizer),
            uploader: Arc::new(uploader),
            config: Arc::new(config),
            data_dir,
        }
    }
}
