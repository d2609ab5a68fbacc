//! Readable text extraction from web pages.

use async_trait::async_trait;
use lumina_error::{GenerationError, GenerationErrorKind, HttpError, LuminaResult};
use lumina_interface::ContentExtractor;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument};

/// Elements whose whole subtree is boilerplate.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "template", "noscript", "svg", "nav", "header", "footer", "aside", "form",
];

const USER_AGENT: &str = "Mozilla/5.0 (compatible; lumina/0.1; +https://example.org/bot)";

struct RootSelectors {
    article: Selector,
    main: Selector,
    body: Selector,
}

static ROOTS: LazyLock<RootSelectors> = LazyLock::new(|| RootSelectors {
    article: Selector::parse("article").expect("article selector"),
    main: Selector::parse("main").expect("main selector"),
    body: Selector::parse("body").expect("body selector"),
});

fn pick_root(document: &Html) -> ElementRef<'_> {
    document
        .select(&ROOTS.article)
        .next()
        .or_else(|| document.select(&ROOTS.main).next())
        .or_else(|| document.select(&ROOTS.body).next())
        .unwrap_or_else(|| document.root_element())
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim().to_string()
}

/// Extract readable text from an HTML document.
///
/// The most specific content root (`article`, then `main`, then `body`) is
/// used, boilerplate subtrees are dropped, and each text run becomes one
/// whitespace-collapsed line.
///
/// # Examples
///
/// ```
/// use lumina_models::extract_text;
///
/// let html = "<html><body><nav>Menu</nav><article><h1>Golpes</h1>\
///             <p>Nunca  compartilhe\n o código.</p><script>x()</script></article></body></html>";
/// assert_eq!(extract_text(html), "Golpes\nNunca compartilhe o código.");
/// ```
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = pick_root(&document);

    let mut lines = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_TAGS.contains(&element.name()))
        });
        if skipped {
            continue;
        }
        let line = collapse_whitespace(text);
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Fetches pages over HTTP and extracts their text.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    client: Client,
}

impl HtmlExtractor {
    /// Create an extractor with a request timeout.
    pub fn new(timeout: Duration) -> LuminaResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentExtractor for HtmlExtractor {
    #[instrument(skip(self))]
    async fn extract(&self, url: &str) -> LuminaResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(HttpError::new(format!("{}: HTTP {}", url, response.status())).into());
        }

        let html = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("{}: {}", url, e)))?;
        let text = extract_text(&html);
        if text.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::Extraction(format!(
                "{}: no readable text",
                url
            )))
            .into());
        }

        debug!(url, chars = text.chars().count(), "Extracted page text");
        Ok(text)
    }
}
