//! Standalone copywriting calls that sit outside the wizard flow.

use brandkit_types::asset::{DescriptionEnhancement, LandingCopy, PropertyExtraction};
use brandkit_types::config::CompletionConfig;
use brandkit_types::error::{AssetError, PipelineError};
use brandkit_types::llm::Message;

use crate::extract::{self, UNABLE_TO_EXTRACT};
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::request::complete_text;
use crate::prompt;

/// Property whose extraction also yields a rewrite, tagline and logo concept.
pub const DESCRIPTION_PROPERTY: &str = "brandDescription";

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, PipelineError> {
    let value = value.trim();
    if value.is_empty() {
        Err(PipelineError::MissingField(name))
    } else {
        Ok(value)
    }
}

/// Pull a single named property out of free text.
///
/// When the reply cannot be read, the value is the "unable to extract"
/// sentinel. Blank input is rejected before any call is made.
#[tracing::instrument(skip(provider, config, text, instructions))]
pub async fn extract_property(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    text: &str,
    property: &str,
    instructions: Option<&str>,
) -> Result<PropertyExtraction, AssetError> {
    let text = required(text, "text")?;
    let property = required(property, "property")?;
    let instructions = instructions.map(str::trim).filter(|i| !i.is_empty());

    let pair = prompt::property_extraction(text, property, instructions);
    let reply = complete_text(provider, config, &pair.system, vec![Message::user(pair.user)]).await?;

    let Some(map) = extract::parse_json_object(&reply) else {
        tracing::warn!(property, "extraction reply held no JSON object");
        return Ok(PropertyExtraction {
            property: property.to_string(),
            value: extract::extract_string_field(&reply, property)
                .unwrap_or_else(|| UNABLE_TO_EXTRACT.to_string()),
            enhancement: None,
        });
    };

    let value = extract::string_or_sentinel(extract::field(&map, property));
    let enhancement = (property == DESCRIPTION_PROPERTY).then(|| {
        let text_of = |key: &str| extract::non_blank(extract::field(&map, key)).unwrap_or_default();
        DescriptionEnhancement {
            enhanced_description: text_of("enhancedDescription"),
            tagline: text_of("tagline"),
            logo_concept: text_of("logoConcept"),
        }
    });

    Ok(PropertyExtraction {
        property: property.to_string(),
        value,
        enhancement,
    })
}

/// Refined four-line description and tagline for a landing page.
#[tracing::instrument(skip_all, fields(brand = %name))]
pub async fn landing_copy(
    provider: &BoxLlmProvider,
    config: &CompletionConfig,
    name: &str,
    description: &str,
    keywords: &str,
    audience: &str,
) -> Result<LandingCopy, AssetError> {
    let name = required(name, "brandName")?;
    let description = required(description, "brandDescription")?;
    let keywords = required(keywords, "keywords")?;
    let audience = required(audience, "audience")?;

    let pair = prompt::landing_copy(name, description, keywords, audience);
    let reply = complete_text(provider, config, &pair.system, vec![Message::user(pair.user)]).await?;
    let map = extract::parse_json_object(&reply).ok_or(AssetError::Unparseable("landing copy"))?;

    let description = extract::non_blank(extract::field(&map, "description"))
        .ok_or(AssetError::Unparseable("landing copy"))?;

    Ok(LandingCopy {
        brand_name: name.to_string(),
        keywords: keywords.to_string(),
        audience: audience.to_string(),
        description,
        tagline: extract::string_or_sentinel(extract::field(&map, "tagline")),
    })
}
