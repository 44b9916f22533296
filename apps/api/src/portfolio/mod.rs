// Portfolio generation pipeline.
// Prompt building, the single LLM round-trip, extraction and the fail-soft
// diagnostic page. All LLM calls go through llm_client.

pub mod extract;
pub mod failure;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod highlight;
pub mod package;
pub mod prompt_builder;
pub mod prompts;
pub mod validation;
pub mod workspace;

/// Escapes text for safe inclusion in HTML element content or attributes.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
