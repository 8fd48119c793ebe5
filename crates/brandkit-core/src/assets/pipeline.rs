//! Asset pipeline orchestration.
//!
//! A run fans out the five core branches (plus the logo branch when a logo
//! service is configured), settles every one of them, and merges whatever
//! succeeded into a fresh [`AssetBundle`]. There is no top-level failure: a
//! branch error only leaves its field absent and is recorded in the bundle's
//! branch reports.
//!
//! Image-search URLs are slotted into the highlight sections after both
//! branches settle, so a failed search leaves the section text in place with
//! empty image slots.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use brandkit_types::asset::{
    AiImages, AssetBranch, AssetBundle, BranchOutcome, BranchReport, BrandProfile,
    HighlightSections, SearchedImages,
};
use brandkit_types::brand::BrandBrief;
use brandkit_types::config::{AppConfig, CompletionConfig, ImageConfig, LogoConfig, PipelineMode};
use brandkit_types::error::AssetError;

use super::branches;
use crate::llm::box_provider::BoxLlmProvider;
use crate::service::image::{ImageGenerator, ImageSearch};
use crate::service::logo::LogoGenerator;

/// Settings the pipeline needs from the application config.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub completion: CompletionConfig,
    pub images: ImageConfig,
    pub logo: LogoConfig,
    pub per_page: u8,
    pub mode: PipelineMode,
    pub image_spacing: Duration,
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            completion: config.completion.clone(),
            images: config.images.clone(),
            logo: config.logo.clone(),
            per_page: config.image_search.per_page,
            mode: config.pipeline.mode,
            image_spacing: Duration::from_millis(config.pipeline.image_spacing_ms),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Runs the asset branches for a brand brief.
pub struct AssetPipeline<G, S, L> {
    provider: Arc<BoxLlmProvider>,
    images: G,
    search: S,
    logo: L,
    settings: PipelineSettings,
}

/// Raw results of one run, before merging.
struct Settled {
    profile: (Result<BrandProfile, AssetError>, u64),
    search: (Result<SearchedImages, AssetError>, u64),
    highlights: (Result<HighlightSections, AssetError>, u64),
    plans: (Result<Vec<String>, AssetError>, u64),
    ai_images: (Result<AiImages, AssetError>, u64),
    logo: Option<(Result<String, AssetError>, u64)>,
}

impl<G, S, L> AssetPipeline<G, S, L>
where
    G: ImageGenerator,
    S: ImageSearch,
    L: LogoGenerator,
{
    pub fn new(
        provider: Arc<BoxLlmProvider>,
        images: G,
        search: S,
        logo: L,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            provider,
            images,
            search,
            logo,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// The completion provider shared by every text branch.
    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    /// Run every branch for `brief` and return the merged bundle.
    ///
    /// Always completes. Re-running with the same brief produces a new,
    /// independent bundle.
    #[tracing::instrument(
        name = "asset_pipeline",
        skip_all,
        fields(brand = %brief.name(), mode = %self.settings.mode)
    )]
    pub async fn run(&self, brief: &BrandBrief) -> AssetBundle {
        let started = Instant::now();
        let settled = match self.settings.mode {
            PipelineMode::Concurrent => self.run_concurrent(brief).await,
            PipelineMode::Sequential => self.run_sequential(brief).await,
        };

        let bundle = merge(AssetBundle::new(brief), settled);
        tracing::info!(
            bundle_id = %bundle.id,
            failed = bundle.failed_branches().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "asset pipeline settled"
        );
        bundle
    }

    async fn run_concurrent(&self, brief: &BrandBrief) -> Settled {
        let logo = async {
            match self.logo.is_configured() {
                true => Some(timed(self.logo_url(brief)).await),
                false => None,
            }
        };
        let (profile, search, highlights, plans, ai_images, logo) = tokio::join!(
            timed(self.brand_profile(brief)),
            timed(self.search_images(brief)),
            timed(self.highlight_sections(brief)),
            timed(self.subscription_titles(brief)),
            timed(self.ai_images(brief)),
            logo,
        );
        Settled {
            profile,
            search,
            highlights,
            plans,
            ai_images,
            logo,
        }
    }

    async fn run_sequential(&self, brief: &BrandBrief) -> Settled {
        let profile = timed(self.brand_profile(brief)).await;
        let search = timed(self.search_images(brief)).await;
        let highlights = timed(self.highlight_sections(brief)).await;
        let plans = timed(self.subscription_titles(brief)).await;
        let ai_images = timed(self.ai_images(brief)).await;
        let logo = match self.logo.is_configured() {
            true => Some(timed(self.logo_url(brief)).await),
            false => None,
        };
        Settled {
            profile,
            search,
            highlights,
            plans,
            ai_images,
            logo,
        }
    }

    pub async fn brand_profile(&self, brief: &BrandBrief) -> Result<BrandProfile, AssetError> {
        branches::brand_profile(&self.provider, &self.settings.completion, brief).await
    }

    pub async fn search_images(&self, brief: &BrandBrief) -> Result<SearchedImages, AssetError> {
        branches::search_images(
            &self.provider,
            &self.settings.completion,
            &self.search,
            brief,
            self.settings.per_page,
        )
        .await
    }

    pub async fn highlight_sections(
        &self,
        brief: &BrandBrief,
    ) -> Result<HighlightSections, AssetError> {
        branches::highlight_sections(&self.provider, &self.settings.completion, brief).await
    }

    /// Highlight copy with image slots filled from a fresh image search.
    pub async fn highlight_sections_with_images(
        &self,
        brief: &BrandBrief,
    ) -> Result<HighlightSections, AssetError> {
        let (sections, images) =
            tokio::join!(self.highlight_sections(brief), self.search_images(brief));
        let mut sections = sections?;
        if let Ok(images) = images {
            slot_images(&mut sections, &images);
        }
        Ok(sections)
    }

    pub async fn subscription_titles(&self, brief: &BrandBrief) -> Result<Vec<String>, AssetError> {
        branches::subscription_titles(&self.provider, &self.settings.completion, brief).await
    }

    pub async fn ai_images(&self, brief: &BrandBrief) -> Result<AiImages, AssetError> {
        branches::ai_images(
            &self.images,
            &self.settings.images,
            brief,
            self.settings.image_spacing,
        )
        .await
    }

    pub async fn logo_url(&self, brief: &BrandBrief) -> Result<String, AssetError> {
        let request = self.settings.logo.request_for(brief.name());
        branches::logo(&self.logo, &request).await
    }
}

async fn timed<T, F>(future: F) -> (Result<T, AssetError>, u64)
where
    F: Future<Output = Result<T, AssetError>>,
{
    let started = Instant::now();
    let result = future.await;
    (result, started.elapsed().as_millis() as u64)
}

/// Record a branch's settlement and hand back its value on success.
fn settle<T>(
    bundle: &mut AssetBundle,
    branch: AssetBranch,
    (result, elapsed_ms): (Result<T, AssetError>, u64),
) -> Option<T> {
    match result {
        Ok(value) => {
            bundle.reports.push(BranchReport {
                branch,
                outcome: BranchOutcome::Succeeded,
                error: None,
                elapsed_ms,
            });
            Some(value)
        }
        Err(e) => {
            tracing::warn!(%branch, error = %e, "asset branch failed");
            bundle.reports.push(BranchReport {
                branch,
                outcome: BranchOutcome::Failed,
                error: Some(e.to_string()),
                elapsed_ms,
            });
            None
        }
    }
}

fn slot_images(sections: &mut HighlightSections, images: &SearchedImages) {
    sections.coverage.image_url = images.coverage.clone();
    sections.phone_compatibility.image_url = images.phone_compatibility.clone();
}

fn merge(mut bundle: AssetBundle, settled: Settled) -> AssetBundle {
    bundle.profile = settle(&mut bundle, AssetBranch::BrandProfile, settled.profile);

    let searched = settle(&mut bundle, AssetBranch::ImageSearch, settled.search);
    bundle.cover_image = searched.as_ref().and_then(|s| s.cover.clone());

    bundle.highlights =
        settle(&mut bundle, AssetBranch::HighlightSections, settled.highlights).map(|mut h| {
            if let Some(images) = &searched {
                slot_images(&mut h, images);
            }
            h
        });

    bundle.subscription_titles = settle(&mut bundle, AssetBranch::SubscriptionPlans, settled.plans);
    bundle.ai_images = settle(&mut bundle, AssetBranch::AiImages, settled.ai_images);

    match settled.logo {
        Some(logo) => bundle.logo_url = settle(&mut bundle, AssetBranch::Logo, logo),
        None => bundle.reports.push(BranchReport {
            branch: AssetBranch::Logo,
            outcome: BranchOutcome::Skipped,
            error: None,
            elapsed_ms: 0,
        }),
    }

    bundle
}
