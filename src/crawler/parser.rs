//! HTML extraction of page text and raw links
//!
//! This module turns fetched content into:
//! - Plain text for the index (script and style contents excluded)
//! - The raw `href` values of `<a>` elements, in document order

use crate::crawler::error::ExtractError;
use scraper::{Html, Selector};

/// Elements whose text never reaches the index
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Text and links pulled out of a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Visible text with runs of whitespace collapsed to single spaces
    pub text: String,

    /// Raw href values in document order, before any resolution
    pub links: Vec<String>,
}

/// Capability to turn fetched content into text and links
pub trait Extract: Send + Sync {
    fn extract(&self, content: &str) -> Result<ExtractedPage, ExtractError>;
}

/// [`Extract`] implementation for HTML documents
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` contributes its attribute value untouched,
/// including empty values and bare `#` anchors. Deciding which of those to
/// follow belongs to the crawl engine.
///
/// # Example
///
/// ```
/// use sitegrep::crawler::{Extract, HtmlExtractor};
///
/// let html = r#"<html><body><p>Hello</p><a href="/page">Link</a></body></html>"#;
/// let page = HtmlExtractor.extract(html).unwrap();
/// assert_eq!(page.text, "Hello Link");
/// assert_eq!(page.links, vec!["/page".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl Extract for HtmlExtractor {
    fn extract(&self, content: &str) -> Result<ExtractedPage, ExtractError> {
        let document = Html::parse_document(content);

        Ok(ExtractedPage {
            text: extract_text(&document),
            links: extract_links(&document)?,
        })
    }
}

/// Collects the document's text nodes outside of skipped elements
fn extract_text(document: &Html) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });

        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    words.join(" ")
}

/// Collects raw href values of anchor elements in document order
fn extract_links(document: &Html) -> Result<Vec<String>, ExtractError> {
    let selector =
        Selector::parse("a[href]").map_err(|e| ExtractError::Selector(e.to_string()))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}
