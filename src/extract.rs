use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::ExtractedItem;

// ── Lazy static selectors ────────────────────────────────────────────────────

static BODY_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static FIGURE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("figure").unwrap());
static IMG_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static CAPTION_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("figcaption").unwrap());

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid base_url: {0}")]
    InvalidBaseUrl(String),
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Entry point for the HTTP handler: a missing body is the empty document,
/// an unparseable `base_url` is the only rejectable input.
pub fn extract_for_request(
    html: Option<&str>,
    base_url: Option<&str>,
) -> Result<Vec<ExtractedItem>, RequestError> {
    let html = html.unwrap_or("");
    match base_url {
        Some(raw) => {
            let base = Url::parse(raw).map_err(|e| RequestError::InvalidBaseUrl(e.to_string()))?;
            Ok(extract_items_with_base(html, &base))
        }
        None => Ok(extract_items(html)),
    }
}

/// Derive an ordered avatar list from editor-authored HTML.
///
/// Each direct child of `<body>` yields at most one item: the first
/// `<figcaption>` of its figure (or of the child itself) names it, the
/// first `<img>` illustrates it, and children whose resolved name is
/// empty are dropped. Names are whitespace-normalized: trimmed, with
/// internal runs (including newlines) collapsed to single spaces.
/// Malformed markup is repaired by the parser, so this never fails; it
/// only ever returns fewer items.
pub fn extract_items(html: &str) -> Vec<ExtractedItem> {
    let document = Html::parse_document(html);

    let body = match document.select(&BODY_SEL).next() {
        Some(body) => body,
        None => return Vec::new(),
    };

    let mut items = Vec::new();
    for child in body.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if let Some(item) = item_from_block(el) {
                items.push(item);
            }
        }
    }
    items
}

/// Like [`extract_items`], but resolves each `image_url` against `base`
/// so relative editor-inserted paths point at the public asset origin.
/// A src that cannot be joined is kept verbatim.
pub fn extract_items_with_base(html: &str, base: &Url) -> Vec<ExtractedItem> {
    let mut items = extract_items(html);
    for item in &mut items {
        if let Some(src) = item.image_url.take() {
            let resolved = base.join(&src).map(|u| u.to_string()).unwrap_or(src);
            item.image_url = Some(resolved);
        }
    }
    items
}

// ── Per-block extraction ─────────────────────────────────────────────────────

fn item_from_block(el: ElementRef<'_>) -> Option<ExtractedItem> {
    // The figure-like scope: the block itself if it is a figure, else its
    // first descendant figure, else the whole block.
    let scope = if el.value().name() == "figure" {
        el
    } else {
        el.select(&FIGURE_SEL).next().unwrap_or(el)
    };

    let image_url = scope
        .select(&IMG_SEL)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|s| s.to_string());

    // Caption text wins; a block without one falls back to its own full
    // text content, whatever that happens to contain.
    let display_name = scope
        .select(&CAPTION_SEL)
        .next()
        .map(normalized_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| normalized_text(el));

    if display_name.is_empty() {
        return None;
    }

    Some(ExtractedItem {
        image_url,
        display_name,
    })
}

// ── Text helpers ─────────────────────────────────────────────────────────────

/// Collapse whitespace runs and trim, over the element's full text content.
fn normalized_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ────────────────────────────────────────────────────────────────────
