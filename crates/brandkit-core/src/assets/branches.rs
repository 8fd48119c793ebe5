//! The independent asset branches.
//!
//! Each branch makes its external calls and returns a typed result. Branches
//! never touch the bundle; the pipeline decides what a failure means.

use std::time::Duration;

use brandkit_types::asset::{AiImages, BrandProfile, HighlightSection, HighlightSections, SearchedImages};
use brandkit_types::brand::BrandBrief;
use brandkit_types::config::{CompletionConfig, ImageConfig};
use brandkit_types::error::{AssetError, ServiceError};
use brandkit_types::llm::Message;
use brandkit_types::media::{ImageRequest, ImageSearchQuery, LogoRequest};
use serde_json::{Map, Value};

use crate::extract::{self, UNABLE_TO_EXTRACT};
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::request::complete_text;
use crate::prompt::{self, PromptPair};
use crate::service::image::{ImageGenerator, ImageSearch};
use crate::service::logo::LogoGenerator;

/// Cover image sizing appended to the raw photo URL.
const COVER_SIZE: (u32, u32) = (1440, 500);

/// Section image sizing appended to the small photo URL.
const SECTION_SIZE: (u32, u32) = (530, 352);

async fn ask(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    prompt: PromptPair,
) -> Result<String, AssetError> {
    Ok(complete_text(provider, config, &prompt.system, vec![Message::user(prompt.user)]).await?)
}

/// Tagline, keywords and website. An uninterpretable reply degrades to
/// placeholder values rather than failing.
#[tracing::instrument(name = "branch.brand_profile", skip_all, fields(brand = %brief.name()))]
pub async fn brand_profile(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    brief: &BrandBrief,
) -> Result<BrandProfile, AssetError> {
    let reply = ask(provider, config, prompt::brand_profile(brief)).await?;
    let map = extract::parse_json_object(&reply).unwrap_or_else(|| {
        tracing::warn!("brand profile reply held no JSON object, using placeholders");
        Map::new()
    });

    let website_url = extract::non_blank(extract::field(&map, "websiteUrl"))
        .filter(|url| url != UNABLE_TO_EXTRACT)
        .unwrap_or_else(|| brief.fallback_website());

    Ok(BrandProfile {
        brand_name: brief.name().to_string(),
        brand_description: brief.description().to_string(),
        tagline: extract::string_or_sentinel(extract::field(&map, "tagline")),
        keywords: extract::keywords_or_sentinel(extract::field(&map, "keywords")),
        website_url,
    })
}

/// Decide what to search for: the brand itself when it is well known,
/// otherwise a one-word industry keyword.
pub async fn search_word(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    brief: &BrandBrief,
) -> Result<String, AssetError> {
    let verdict = ask(provider, config, prompt::popularity_check(brief)).await?;
    let verdict = verdict
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if verdict != "no" {
        return Ok(brief.name().to_string());
    }

    let industry = ask(provider, config, prompt::industry_keyword(brief)).await?;
    let keyword = industry
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(str::to_string);

    Ok(keyword.unwrap_or_else(|| brief.name().to_string()))
}

/// Stock photos for the cover and the two highlight sections.
#[tracing::instrument(name = "branch.image_search", skip_all, fields(brand = %brief.name()))]
pub async fn search_images<S: ImageSearch>(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    search: &S,
    brief: &BrandBrief,
    per_page: u8,
) -> Result<SearchedImages, AssetError> {
    let word = search_word(provider, config, brief).await?;
    let query = ImageSearchQuery {
        query: prompt::image_search_query(&word),
        per_page,
    };
    tracing::debug!(query = %query.query, "searching stock photos");

    let photos = search.search(&query).await?;
    if photos.is_empty() {
        return Err(ServiceError::Empty {
            service: "image search",
        }
        .into());
    }

    Ok(SearchedImages {
        search_word: word,
        cover: sized(photos.first().map(|p| p.urls.raw.as_str()), COVER_SIZE),
        phone_compatibility: sized(photos.get(1).map(|p| p.urls.small.as_str()), SECTION_SIZE),
        coverage: sized(photos.get(2).map(|p| p.urls.small.as_str()), SECTION_SIZE),
    })
}

/// Coverage and Phone Compatibility copy. Image slots are left empty.
#[tracing::instrument(name = "branch.highlight_sections", skip_all, fields(brand = %brief.name()))]
pub async fn highlight_sections(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    brief: &BrandBrief,
) -> Result<HighlightSections, AssetError> {
    let reply = ask(provider, config, prompt::highlight_sections(brief)).await?;
    let map = extract::parse_json_object(&reply)
        .ok_or(AssetError::Unparseable("highlight sections reply held no JSON object"))?;

    let coverage = extract::field(&map, "coverage").and_then(Value::as_object);
    let phone = extract::field(&map, "phoneCompatibility").and_then(Value::as_object);
    if coverage.is_none() && phone.is_none() {
        return Err(AssetError::Unparseable("highlight sections missing from reply"));
    }

    Ok(HighlightSections {
        coverage: section(coverage),
        phone_compatibility: section(phone),
    })
}

fn section(map: Option<&Map<String, Value>>) -> HighlightSection {
    HighlightSection {
        title: extract::string_or_sentinel(map.and_then(|m| extract::field(m, "title"))),
        subtitle: extract::string_or_sentinel(map.and_then(|m| extract::field(m, "subtitle"))),
        image_url: None,
    }
}

/// Four subscription-plan titles, one per fixed tier.
#[tracing::instrument(name = "branch.subscription_plans", skip_all, fields(brand = %brief.name()))]
pub async fn subscription_titles(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    brief: &BrandBrief,
) -> Result<Vec<String>, AssetError> {
    let reply = ask(provider, config, prompt::subscription_titles(brief)).await?;
    let titles = extract::parse_json_reply(&reply)
        .as_ref()
        .and_then(extract::string_list)
        .ok_or(AssetError::Unparseable("plan titles reply held no string list"))?;

    if titles.len() < prompt::PLAN_TIERS.len() {
        return Err(AssetError::Unparseable("fewer plan titles than tiers"));
    }
    Ok(titles.into_iter().take(prompt::PLAN_TIERS.len()).collect())
}

/// Hero, coverage and phone compatibility illustrations.
///
/// Images are requested one after another, `spacing` apart. Each image
/// settles on its own; the branch only fails when none were produced.
#[tracing::instrument(name = "branch.ai_images", skip_all, fields(brand = %brief.name(), model = %config.model))]
pub async fn ai_images<G: ImageGenerator>(
    generator: &G,
    config: &ImageConfig,
    brief: &BrandBrief,
    spacing: Duration,
) -> Result<AiImages, AssetError> {
    let prompts = prompt::ai_image_prompts(brief);
    let mut urls: Vec<Option<String>> = Vec::with_capacity(prompts.len());
    let mut last_error = None;

    for (index, prompt) in prompts.into_iter().enumerate() {
        if index > 0 && !spacing.is_zero() {
            tokio::time::sleep(spacing).await;
        }
        let request = ImageRequest {
            prompt,
            count: 1,
            size: config.size.clone(),
        };
        match generator.generate(&request).await {
            Ok(images) => urls.push(images.into_iter().next().map(|image| image.url)),
            Err(e) => {
                tracing::warn!(index, error = %e, "image generation failed");
                urls.push(None);
                last_error = Some(e);
            }
        }
    }

    let mut urls = urls.into_iter();
    let images = AiImages {
        hero: urls.next().flatten(),
        coverage: urls.next().flatten(),
        phone_compatibility: urls.next().flatten(),
    };

    match (images.is_empty(), last_error) {
        (true, Some(e)) => Err(e.into()),
        (true, None) => Err(ServiceError::Empty {
            service: "image generation",
        }
        .into()),
        (false, _) => Ok(images),
    }
}

/// Wordmark logo URL.
#[tracing::instrument(name = "branch.logo", skip_all, fields(brand = %request.brand_name))]
pub async fn logo<L: LogoGenerator>(generator: &L, request: &LogoRequest) -> Result<String, AssetError> {
    Ok(generator.generate_logo(request).await?)
}

fn sized(url: Option<&str>, size: (u32, u32)) -> Option<String> {
    url.filter(|u| !u.is_empty()).map(|u| with_size(u, size))
}

/// Append `w`/`h` sizing parameters to a photo URL.
fn with_size(url: &str, (width, height): (u32, u32)) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}w={width}&h={height}")
}
