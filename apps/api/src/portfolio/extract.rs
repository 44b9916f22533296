//! Pulls the HTML document, stylesheet and script out of raw model output.
//!
//! Best-effort regex heuristic, not an HTML parser: nested or malformed
//! markup (a `</style>` inside a string, several documents in one reply)
//! can be split in the wrong place.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::artifact::{GeneratedArtifact, CSS_PLACEHOLDER, JS_PLACEHOLDER};

/// First `<!doctype html ...>` through the first `</html>` after it.
static DOCUMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!doctype\s+html\b.*?</html\s*>").expect("valid regex"));

static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").expect("valid regex"));

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script\s*>").expect("valid regex"));

static HTML_ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<html\b.*</html\s*>").expect("valid regex"));

/// Turns model output into an artifact. Never fails.
pub fn parse_response(text: &str) -> GeneratedArtifact {
    let html = match DOCUMENT_RE.find(text) {
        Some(m) => m.as_str().to_string(),
        None => ensure_document(text),
    };

    let css = join_blocks(&STYLE_RE, &html).unwrap_or_else(|| CSS_PLACEHOLDER.to_string());
    let js = join_blocks(&SCRIPT_RE, &html).unwrap_or_else(|| JS_PLACEHOLDER.to_string());

    GeneratedArtifact::new(html, css, js)
}

/// Inner text of every non-empty block, separated by a blank line.
fn join_blocks(re: &Regex, html: &str) -> Option<String> {
    let blocks: Vec<&str> = re
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|b| !b.is_empty())
        .collect();

    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join("\n\n"))
    }
}

/// Output without a doctype span: keep an `<html>` element and add the doctype,
/// otherwise wrap the raw text as the body of a minimal document.
fn ensure_document(text: &str) -> String {
    let text = strip_code_fences(text);

    if let Some(m) = HTML_ELEMENT_RE.find(text) {
        return format!("<!DOCTYPE html>\n{}", m.as_str());
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Portfolio</title>\n</head>\n<body>\n{text}\n</body>\n</html>"
    )
}

/// Strips ```html ... ``` or ``` ... ``` fences from model output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("html").unwrap_or(rest);
    rest.trim_start()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or_else(|| rest.trim_start())
}
