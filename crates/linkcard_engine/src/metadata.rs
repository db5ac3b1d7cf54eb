use scraper::{Html, Selector};
use url::Url;

use crate::PageMetadata;

/// Scrape link-card metadata from a page: Open Graph tags first, Twitter
/// card tags second, plain `<title>`/`<meta name=description>` last.
/// A relative `og:image` is resolved against the final URL.
pub fn extract_metadata(html: &str, final_url: &str) -> PageMetadata {
    let doc = Html::parse_document(html);

    let title = meta_property(&doc, "og:title")
        .or_else(|| meta_name(&doc, "twitter:title"))
        .or_else(|| title_tag(&doc));
    let description = meta_property(&doc, "og:description")
        .or_else(|| meta_name(&doc, "twitter:description"))
        .or_else(|| meta_name(&doc, "description"));
    let image_url = meta_property(&doc, "og:image")
        .or_else(|| meta_name(&doc, "twitter:image"))
        .and_then(|raw| resolve_image_url(&raw, final_url));
    let site_name = meta_property(&doc, "og:site_name");

    PageMetadata {
        title,
        description,
        image_url,
        site_name,
        final_url: final_url.to_string(),
    }
}

fn meta_property(doc: &Html, property: &str) -> Option<String> {
    meta_content(doc, &format!(r#"meta[property="{property}"]"#))
}

fn meta_name(doc: &Html, name: &str) -> Option<String> {
    meta_content(doc, &format!(r#"meta[name="{name}"]"#))
}

fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector)
        .find_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn title_tag(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn resolve_image_url(raw: &str, final_url: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(absolute) => Some(absolute.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(final_url)
            .ok()?
            .join(raw)
            .ok()
            .map(Url::into),
        Err(_) => None,
    }
}
