//! Static HTML rendering of a finished asset bundle.
//!
//! Every interpolated value is escaped. Fields a branch could not produce are
//! left out of the page entirely.

use std::fmt::{self, Write};

use brandkit_types::asset::{AssetBundle, HighlightSection};

/// File name offered when the snapshot is downloaded.
pub const SNAPSHOT_FILE_NAME: &str = "landing_page.html";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn image(out: &mut impl Write, class: &str, url: &str, alt: &str) -> fmt::Result {
    writeln!(
        out,
        r#"    <img class="{class}" src="{}" alt="{}">"#,
        escape_html(url),
        escape_html(alt)
    )
}

fn section(
    out: &mut impl Write,
    id: &str,
    section: &HighlightSection,
    fallback_image: Option<&str>,
) -> fmt::Result {
    writeln!(out, r#"  <section id="{id}">"#)?;
    writeln!(out, "    <h2>{}</h2>", escape_html(&section.title))?;
    writeln!(out, "    <p>{}</p>", escape_html(&section.subtitle))?;
    if let Some(url) = section.image_url.as_deref().or(fallback_image) {
        image(out, "section-image", url, &section.title)?;
    }
    out.write_str("  </section>\n")
}

/// A bundle rendered as a standalone landing page.
pub struct Snapshot<'a>(pub &'a AssetBundle);

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bundle = self.0;
        let name = escape_html(&bundle.brand_name);

        out.write_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n")?;
        out.write_str("  <meta charset=\"utf-8\">\n")?;
        writeln!(out, "  <title>{name}</title>")?;
        if let Some(profile) = &bundle.profile {
            writeln!(
                out,
                r#"  <meta name="keywords" content="{}">"#,
                escape_html(&profile.keywords)
            )?;
        }
        out.write_str("</head>\n<body>\n")?;

        out.write_str("  <header>\n")?;
        if let Some(logo) = &bundle.logo_url {
            image(out, "logo", logo, &bundle.brand_name)?;
        }
        writeln!(out, "    <h1>{name}</h1>")?;
        if let Some(profile) = &bundle.profile {
            writeln!(out, r#"    <p class="tagline">{}</p>"#, escape_html(&profile.tagline))?;
        }
        if let Some(cover) = &bundle.cover_image {
            image(out, "cover", cover, &bundle.brand_name)?;
        }
        out.write_str("  </header>\n")?;

        writeln!(
            out,
            r#"  <p class="description">{}</p>"#,
            escape_html(&bundle.brand_description)
        )?;

        if let Some(hero) = bundle.ai_images.as_ref().and_then(|a| a.hero.as_deref()) {
            image(out, "hero", hero, &bundle.brand_name)?;
        }

        if let Some(highlights) = &bundle.highlights {
            let ai = bundle.ai_images.as_ref();
            section(
                out,
                "coverage",
                &highlights.coverage,
                ai.and_then(|a| a.coverage.as_deref()),
            )?;
            section(
                out,
                "phone-compatibility",
                &highlights.phone_compatibility,
                ai.and_then(|a| a.phone_compatibility.as_deref()),
            )?;
        }

        if let Some(titles) = &bundle.subscription_titles {
            out.write_str("  <section id=\"plans\">\n    <ul>\n")?;
            for title in titles {
                writeln!(out, "      <li>{}</li>", escape_html(title))?;
            }
            out.write_str("    </ul>\n  </section>\n")?;
        }

        if let Some(profile) = &bundle.profile {
            let url = escape_html(&profile.website_url);
            writeln!(out, r#"  <footer><a href="{url}">{url}</a></footer>"#)?;
        }

        out.write_str("</body>\n</html>\n")
    }
}

/// Render the bundle as a standalone landing page.
pub fn render_snapshot(bundle: &AssetBundle) -> String {
    Snapshot(bundle).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_types::asset::{AiImages, BrandProfile, HighlightSections};
    use brandkit_types::brand::BrandBrief;

    fn bundle() -> AssetBundle {
        let brief = BrandBrief::new("Flight <Mobile>", "Prepaid & simple").unwrap();
        AssetBundle::new(&brief)
    }

    #[test]
    fn escapes_every_value() {
        let html = render_snapshot(&bundle());
        assert!(html.contains("<h1>Flight &lt;Mobile&gt;</h1>"));
        assert!(html.contains("Prepaid &amp; simple"));
        assert!(!html.contains("<Mobile>"));
    }

    #[test]
    fn omits_absent_fields() {
        let html = render_snapshot(&bundle());
        assert!(!html.contains("class=\"cover\""));
        assert!(!html.contains("id=\"plans\""));
        assert!(!html.contains("<footer>"));
        assert!(!html.contains("tagline"));
    }

    #[test]
    fn renders_full_bundle() {
        let mut b = bundle();
        b.profile = Some(BrandProfile {
            brand_name: b.brand_name.clone(),
            brand_description: b.brand_description.clone(),
            tagline: "Fly \"connected\"".into(),
            keywords: "travel, prepaid".into(),
            website_url: "https://www.flightmobile.com".into(),
        });
        b.cover_image = Some("https://img/1/raw?ixid=1&w=1440&h=500".into());
        b.highlights = Some(HighlightSections {
            coverage: HighlightSection {
                title: "Coverage".into(),
                subtitle: "Everywhere".into(),
                image_url: None,
            },
            phone_compatibility: HighlightSection {
                title: "Bring your phone".into(),
                subtitle: "Keep your number".into(),
                image_url: Some("https://img/2/small".into()),
            },
        });
        b.ai_images = Some(AiImages {
            hero: Some("https://images.example/0.png".into()),
            coverage: Some("https://images.example/1.png".into()),
            phone_compatibility: None,
        });
        b.subscription_titles = Some(vec!["$20/m 3GB".into(), "$25/m 5GB".into()]);
        b.logo_url = Some("https://logos.example/flight.png".into());

        let html = render_snapshot(&b);
        assert!(html.contains("Fly &quot;connected&quot;"));
        assert!(html.contains("ixid=1&amp;w=1440&amp;h=500"));
        // Coverage falls back to the generated image.
        assert!(html.contains("https://images.example/1.png"));
        assert!(html.contains("https://img/2/small"));
        assert!(html.contains("<li>$25/m 5GB</li>"));
        assert!(html.contains("class=\"logo\""));
        assert!(html.contains("<footer><a href=\"https://www.flightmobile.com\">"));
    }

    #[test]
    fn snapshot_display_matches_render() {
        let b = bundle();
        let html = format!("{}", Snapshot(&b));
        assert_eq!(html, render_snapshot(&b));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
    }
}
