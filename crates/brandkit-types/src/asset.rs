//! Asset bundle types produced by the generation pipeline.
//!
//! Every generated field is independently optional: a failed branch leaves its
//! field `None` and records a [`BranchReport`] instead. A bundle with many absent
//! fields is still a valid, presentable result.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brand::BrandBrief;

/// One independent external call within the asset pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetBranch {
    BrandProfile,
    ImageSearch,
    HighlightSections,
    SubscriptionPlans,
    AiImages,
    Logo,
}

impl AssetBranch {
    /// The five branches every pipeline run settles, in their canonical order.
    pub const CORE: [AssetBranch; 5] = [
        AssetBranch::BrandProfile,
        AssetBranch::ImageSearch,
        AssetBranch::HighlightSections,
        AssetBranch::SubscriptionPlans,
        AssetBranch::AiImages,
    ];
}

impl fmt::Display for AssetBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetBranch::BrandProfile => write!(f, "brand_profile"),
            AssetBranch::ImageSearch => write!(f, "image_search"),
            AssetBranch::HighlightSections => write!(f, "highlight_sections"),
            AssetBranch::SubscriptionPlans => write!(f, "subscription_plans"),
            AssetBranch::AiImages => write!(f, "ai_images"),
            AssetBranch::Logo => write!(f, "logo"),
        }
    }
}

/// Tagline, keywords and site address derived from the brand brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub brand_name: String,
    pub brand_description: String,
    pub tagline: String,
    pub keywords: String,
    pub website_url: String,
}

/// Stock photos found for the brand, already sized for their slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchedImages {
    /// The word the search ran on (brand name or industry keyword).
    pub search_word: String,
    pub cover: Option<String>,
    pub coverage: Option<String>,
    pub phone_compatibility: Option<String>,
}

/// One marketing section on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSection {
    pub title: String,
    pub subtitle: String,
    /// Filled from the image search; absent when that branch failed.
    pub image_url: Option<String>,
}

/// The Coverage and Phone Compatibility sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSections {
    pub coverage: HighlightSection,
    pub phone_compatibility: HighlightSection,
}

/// Generated illustrations. Each image settles independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiImages {
    pub hero: Option<String>,
    pub coverage: Option<String>,
    pub phone_compatibility: Option<String>,
}

impl AiImages {
    pub fn is_empty(&self) -> bool {
        self.hero.is_none() && self.coverage.is_none() && self.phone_compatibility.is_none()
    }
}

/// How a branch settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchOutcome {
    Succeeded,
    Failed,
    Skipped,
}

/// Settlement record for one branch of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchReport {
    pub branch: AssetBranch,
    pub outcome: BranchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// The accumulated set of generated marketing assets for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBundle {
    pub id: Uuid,
    pub brand_name: String,
    pub brand_description: String,
    pub profile: Option<BrandProfile>,
    pub cover_image: Option<String>,
    pub highlights: Option<HighlightSections>,
    pub subscription_titles: Option<Vec<String>>,
    pub ai_images: Option<AiImages>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub reports: Vec<BranchReport>,
    pub created_at: DateTime<Utc>,
}

impl AssetBundle {
    /// An empty bundle for `brief`. Every run gets a fresh id.
    pub fn new(brief: &BrandBrief) -> Self {
        Self {
            id: Uuid::now_v7(),
            brand_name: brief.name().to_string(),
            brand_description: brief.description().to_string(),
            profile: None,
            cover_image: None,
            highlights: None,
            subscription_titles: None,
            ai_images: None,
            logo_url: None,
            reports: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn report_for(&self, branch: AssetBranch) -> Option<&BranchReport> {
        self.reports.iter().find(|r| r.branch == branch)
    }

    pub fn failed_branches(&self) -> Vec<AssetBranch> {
        self.reports
            .iter()
            .filter(|r| r.outcome == BranchOutcome::Failed)
            .map(|r| r.branch)
            .collect()
    }

    /// Whether every one of the five core branches has a report.
    pub fn is_settled(&self) -> bool {
        AssetBranch::CORE
            .iter()
            .all(|branch| self.report_for(*branch).is_some())
    }
}

/// A single property pulled out of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyExtraction {
    pub property: String,
    pub value: String,
    /// Only populated when the property is `brandDescription`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<DescriptionEnhancement>,
}

/// Extra copy generated alongside an extracted brand description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionEnhancement {
    pub enhanced_description: String,
    pub tagline: String,
    pub logo_concept: String,
}

/// Refined landing-page copy for a known audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingCopy {
    pub brand_name: String,
    pub keywords: String,
    pub audience: String,
    pub description: String,
    pub tagline: String,
}
