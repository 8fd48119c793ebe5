//! Prompt templates for every completion the system makes.
//!
//! All builders are pure: the same inputs always produce the same prompt.
//! Brand text is embedded verbatim; no validation or truncation happens here.

use brandkit_types::brand::BrandBrief;

/// A system + user prompt pair for a single-shot completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// System prompt for the brand-name conversation.
pub const BRAND_NAME_SYSTEM_PROMPT: &str = r#"You are a branding expert helping the user settle on a unique brand name. Keep replies short, warm and engaging.

<process>
1. If the user gives a brand name directly, acknowledge it and confirm it.
2. If the name is a well-known brand, confirm it with the user before finalizing.
3. If the user is unsure or asks for ideas, ask 2-3 short branding questions (10-12 words each at most).
4. From their answers, suggest 3 strong names.
5. Keep offering alternatives until the user is satisfied.
6. As soon as the user confirms or strongly prefers a name, finalize it.
</process>

<finalize>
When a name is final, include exactly this JSON in your reply:
{"brandName": "Finalized Name"}
Never include the JSON before the user has settled on a name.
</finalize>

<example>
User: I am BMW.
Assistant: Welcome, BMW! {"brandName": "BMW"}
</example>

<example>
User: I want a modern tech brand.
Assistant: Would you prefer a futuristic or a simple name?
User: Futuristic.
Assistant: Here are some ideas: TechNova, ByteForge, NeuralEdge. Which one do you like best?
User: TechNova.
Assistant: Great choice! {"brandName": "TechNova"}
</example>"#;

/// System prompt for the brand-description conversation.
pub const BRAND_DESCRIPTION_SYSTEM_PROMPT: &str = r#"You are a branding strategist helping the user write a compelling description for the brand they just named. Use the earlier conversation for context.

<process>
1. Ask about the brand's vision if you do not know it yet.
2. If the user is unsure, ask 1-2 short questions about audience and values.
3. Draft a concise, engaging description of 8-10 sentences that highlights what makes the brand unique.
4. Revise the draft when the user asks for changes.
5. When the user is satisfied, finalize it.
</process>

<finalize>
When the description is final, include exactly this JSON in your reply:
{"brandDescription": "The full finalized description."}
</finalize>"#;

const BRAND_PROFILE_SYSTEM_PROMPT: &str = "You extract keywords and write a tagline from a brand description. Do not use the phrase 'telecom provider'. Reply only with JSON using the keys tagline, keywords and websiteUrl.";

const POPULARITY_SYSTEM_PROMPT: &str = "You decide whether a brand name is widely recognized. Reply with exactly \"Yes\" if it is a popular brand and exactly \"No\" if it is not.";

const INDUSTRY_SYSTEM_PROMPT: &str = "You read a brand description and name the industry it belongs to. Reply with a single keyword and nothing else.";

const HIGHLIGHT_SYSTEM_PROMPT: &str = "You are a marketing expert writing promotional copy for a mobile network brand. Stay on-brand and within the character limits you are given. Reply only with JSON.";

const PLAN_SYSTEM_PROMPT: &str = "You are an expert in branding and creative writing. Name subscription plans so they match the brand's identity. Reply only with JSON.";

const LANDING_COPY_SYSTEM_PROMPT: &str = "You are a brand strategist and copywriter. Write a four-line brand description and a short, memorable tagline. Reply only with JSON.";

/// The four fixed subscription tiers: (monthly price, data allowance).
pub const PLAN_TIERS: [(&str, &str); 4] = [
    ("$20/m", "3GB"),
    ("$25/m", "5GB"),
    ("$30/m", "30GB+"),
    ("$40/m", "50GB+"),
];

/// Maximum characters for a highlight section title.
pub const HIGHLIGHT_TITLE_MAX: usize = 60;

/// Maximum characters for a highlight section subtitle.
pub const HIGHLIGHT_SUBTITLE_MAX: usize = 120;

/// Tagline, keywords and website for a brand.
pub fn brand_profile(brief: &BrandBrief) -> PromptPair {
    let name = brief.name();
    PromptPair {
        system: BRAND_PROFILE_SYSTEM_PROMPT.to_string(),
        user: format!(
            r#"Based on the brand name '{name}' and the description below, produce:

1. A one-line tagline that captures the brand's identity and value. Keep it catchy and relevant without saying 'telecom provider'.
2. Comma-separated keywords covering the brand's core themes, services and unique offerings.
3. The official website URL for '{name}' if one exists; prefer the most recognized domain.

If a field cannot be determined, use "Enter valid data, I am unable to extract" for it.

Reply in this JSON shape:
{{"tagline": "string", "keywords": "string", "websiteUrl": "string"}}

<description>
{description}
</description>"#,
            description = brief.description(),
        ),
    }
}

/// Yes/No check for whether the brand is widely known.
pub fn popularity_check(brief: &BrandBrief) -> PromptPair {
    PromptPair {
        system: POPULARITY_SYSTEM_PROMPT.to_string(),
        user: format!("Brand Name: {}", brief.name()),
    }
}

/// One-word industry keyword for a lesser-known brand.
pub fn industry_keyword(brief: &BrandBrief) -> PromptPair {
    PromptPair {
        system: INDUSTRY_SYSTEM_PROMPT.to_string(),
        user: format!("Brand Description: {}", brief.description()),
    }
}

/// Stock-photo search query for a search word.
pub fn image_search_query(search_word: &str) -> String {
    format!("{} header image", search_word.trim())
}

/// Coverage and Phone Compatibility section copy.
pub fn highlight_sections(brief: &BrandBrief) -> PromptPair {
    PromptPair {
        system: HIGHLIGHT_SYSTEM_PROMPT.to_string(),
        user: format!(
            r#"Write copy for two landing-page sections for this brand.

<brand>
Brand Name: {name}
Description: {description}
</brand>

<sections>
coverage: a headline about coverage, connectivity or reliability (max {title_max} characters) and a subtitle about seamless, accessible service (max {subtitle_max} characters).
phoneCompatibility: a headline inviting users to bring their own device (max {title_max} characters) and a subtitle reassuring them they can switch and keep their phone and number (max {subtitle_max} characters).
</sections>

Reply in this JSON shape:
{{"coverage": {{"title": "string", "subtitle": "string"}}, "phoneCompatibility": {{"title": "string", "subtitle": "string"}}}}

<example brand="Flight Mobile">
{{"coverage": {{"title": "Unbeatable 4G and 5G coverage across America", "subtitle": "Stay connected with seamless coast-to-coast service no matter where you are."}}, "phoneCompatibility": {{"title": "Love your phone and digits? Bring 'em along!", "subtitle": "Your number and phone can make the switch to Flight Mobile too."}}}}
</example>"#,
            name = brief.name(),
            description = brief.description(),
            title_max = HIGHLIGHT_TITLE_MAX,
            subtitle_max = HIGHLIGHT_SUBTITLE_MAX,
        ),
    }
}

/// Four two-word subscription plan titles.
pub fn subscription_titles(brief: &BrandBrief) -> PromptPair {
    let tiers = PLAN_TIERS
        .iter()
        .map(|(price, data)| format!("{price} for {data}"))
        .collect::<Vec<_>>()
        .join(", ");
    PromptPair {
        system: PLAN_SYSTEM_PROMPT.to_string(),
        user: format!(
            r#"I am launching a mobile network brand with four subscription tiers: {tiers}.
Give me one two-word title per tier, in the same order, aligned with the brand {name}, described as: {description}

Reply in this JSON shape:
{{"subscriptionTitles": ["Title One", "Title Two", "Title Three", "Title Four"]}}"#,
            name = brief.name(),
            description = brief.description(),
        ),
    }
}

/// Image-generation prompts: hero, coverage, phone compatibility.
pub fn ai_image_prompts(brief: &BrandBrief) -> [String; 3] {
    let name = brief.name();
    [
        format!(
            "A professional and inviting hero section image for {name}, an MVNO provider. The image should showcase affordability, seamless mobile connectivity, and customer trust. No futuristic effects or abstract visuals."
        ),
        format!(
            "A realistic image representing strong network coverage for {name}. Show people using mobile phones in different locations (urban, suburban, and rural) to emphasize reliable connectivity."
        ),
        format!(
            "A welcoming image for phone compatibility, showing people happily using their own phones after switching to {name}. Emphasize an easy transition and keeping their number."
        ),
    ]
}

/// Extract one named property from free text.
///
/// `brandDescription` additionally asks for an enhanced description, a
/// tagline and a logo concept.
pub fn property_extraction(text: &str, property: &str, instructions: Option<&str>) -> PromptPair {
    if property == "brandDescription" {
        return PromptPair {
            system: r#"You extract and enhance brand descriptions. Reply only with JSON using the keys "brandDescription", "enhancedDescription", "tagline" and "logoConcept"."#.to_string(),
            user: format!(
                r#"The text below contains brand information.
1. Extract the value for "brandDescription".
2. Rewrite it to be more compelling.
3. Write a creative tagline from the rewritten description.
4. If possible, propose a logo concept using the brand's name and primary colors.
If "brandDescription" is not present, use exactly "Enter valid data, I am unable to extract" as its value.

<text>
{text}
</text>"#
            ),
        };
    }

    let extra = instructions
        .map(|i| format!("Additional instructions: {i}\n"))
        .unwrap_or_default();
    PromptPair {
        system: format!(
            r#"You extract the "{property}" from the given text and correct its English if needed. Reply only with JSON using the key "{property}"."#
        ),
        user: format!(
            r#"The text below contains brand information. Extract the value for "{property}".
{extra}Keep short values if they make sense as a {property}.
If "{property}" is not present, use exactly "Enter valid data, I am unable to extract" as its value.

<text>
{text}
</text>"#
        ),
    }
}

/// Refined four-line description and tagline for a target audience.
pub fn landing_copy(name: &str, description: &str, keywords: &str, audience: &str) -> PromptPair {
    PromptPair {
        system: LANDING_COPY_SYSTEM_PROMPT.to_string(),
        user: format!(
            r#"Write a refined four-line business description and a catchy tagline from:
- Brand Name: {name}
- Original Description: {description}
- Keywords: {keywords}
- Target Audience: {audience}

The description must be engaging, clear and show the brand's value. The tagline must be short, powerful and memorable.

Reply in this JSON shape:
{{"brandName": "{name}", "keywords": "{keywords}", "audience": "{audience}", "description": "string", "tagline": "string"}}"#
        ),
    }
}
