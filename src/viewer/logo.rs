// src/viewer/logo.rs

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

// Any <img> carrying a src is a candidate; the regex decides whether the
// src is an embeddable base64 image data URI.
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img[src]").expect("Failed to compile IMG_SELECTOR")
});

static DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,").expect("Failed to compile DATA_URI_RE")
});

/// Best-effort logo lookup: pulls the first embedded base64 image out of a
/// companion CAP HTML export and rebuilds an `<img>` tag for the viewer
/// header. Any failure (no path, unreadable file, no matching image) yields
/// an empty tag, never an error.
pub fn extract_logo_tag(cap_html_path: Option<&Path>) -> String {
    let path = match cap_html_path {
        Some(path) => path,
        None => return String::new(),
    };

    let html = match fs::read_to_string(path) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Could not read CAP html {}: {}", path.display(), e);
            return String::new();
        }
    };

    let tag = logo_tag_from_html(&html);
    if tag.is_empty() {
        tracing::warn!("No embedded logo found in {}", path.display());
    }
    tag
}

/// Scans the document for the first `<img>` whose src is an image data URI.
pub fn logo_tag_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    for img in document.select(&IMG_SELECTOR) {
        if let Some(src) = img.value().attr("src") {
            let src = src.trim();
            if DATA_URI_RE.is_match(src) {
                return format!(r#"<img src="{}" alt="Logo" />"#, src);
            }
        }
    }

    String::new()
}
