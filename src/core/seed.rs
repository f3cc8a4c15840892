//! One-time content seeding from the static resource pages.
//!
//! The portal ships with hand-written HTML pages listing books and videos per
//! exam. On a fresh install those pages are the source of truth, so startup
//! scans them once and loads the entries into the store. The scan is best
//! effort: unreadable pages are logged and skipped, never fatal.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::models::{ContentKind, NewContent};

/// Book listings live on one fixed page per exam; the exam tag comes from the
/// page's `<body id>`.
pub const RESOURCE_PAGES: [&str; 4] = [
    "upsc-resources.html",
    "cds-resources.html",
    "ssc-resources.html",
    "capf-resources.html",
];

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").expect("static selector"));
static BOOK_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#books .doc-link").expect("static selector"));
static VIDEO_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".video-grid .doc-link").expect("static selector"));
static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").expect("static selector"));
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("static selector"));

/// Scans the pages directory and returns every seedable content entry:
/// books from the fixed resource pages, videos from every `*-videos.html`
/// page found.
pub fn scan_pages(dir: &Path) -> Vec<NewContent> {
    let mut items = Vec::new();

    for file_name in RESOURCE_PAGES {
        let path = dir.join(file_name);
        match fs::read_to_string(&path) {
            Ok(html) => items.extend(scan_resource_page(&html)),
            Err(err) => warn!(page = file_name, %err, "skipping unreadable resource page"),
        }
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), %err, "pages directory not readable; no video pages scanned");
            return items;
        }
    };
    for entry in entries.flatten() {
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(stem) = file_name.strip_suffix("-videos.html") else {
            continue;
        };
        match fs::read_to_string(entry.path()) {
            Ok(html) => items.extend(scan_video_page(&html, stem)),
            Err(err) => warn!(page = %file_name, %err, "skipping unreadable video page"),
        }
    }

    debug!(count = items.len(), "scanned static pages for seedable content");
    items
}

/// Books: `#books .doc-link` entries, titled `"<h3> - <p>"`. Placeholder
/// `path/to/…` links on unfinished pages are skipped.
fn scan_resource_page(html: &str) -> Vec<NewContent> {
    let document = Html::parse_document(html);
    let Some(exam) = document
        .select(&BODY)
        .next()
        .and_then(|body| body.value().attr("id"))
        .map(str::to_string)
    else {
        warn!("resource page has no <body id>; cannot tag an exam, skipping");
        return Vec::new();
    };

    document
        .select(&BOOK_LINKS)
        .filter_map(|link| {
            let url = link.value().attr("data-doc-url")?;
            if url.starts_with("path/to/") {
                return None;
            }
            let title = text_of(&link, &H3)?;
            let author = text_of(&link, &P)?;
            Some(NewContent {
                title: format!("{title} - {author}"),
                kind: ContentKind::Book,
                exam: exam.clone(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Videos: `.video-grid .doc-link` entries on a page named like
/// `upsc-polity-videos.html`; the stem supplies both the exam tag and the
/// subject used in the title.
fn scan_video_page(html: &str, stem: &str) -> Vec<NewContent> {
    let mut parts = stem.split('-');
    let Some(exam) = parts.next().filter(|e| !e.is_empty()).map(str::to_string) else {
        return Vec::new();
    };
    let subject = parts.map(capitalize).collect::<Vec<_>>().join(" ");

    let document = Html::parse_document(html);
    document
        .select(&VIDEO_LINKS)
        .filter_map(|link| {
            let url = link.value().attr("data-doc-url")?;
            let label = text_of(&link, &P)?;
            Some(NewContent {
                title: format!("{subject} - {label}"),
                kind: ContentKind::Video,
                exam: exam.clone(),
                url: url.to_string(),
            })
        })
        .collect()
}

fn text_of(link: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text: String = link.select(selector).next()?.text().collect();
    let text = text.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
