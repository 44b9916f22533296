//! Display-only syntax coloring for the code view.
//!
//! Input is HTML-escaped and token matches are wrapped in inline-styled
//! spans. Works on borrowed text and never touches the stored artifact.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::models::artifact::GeneratedArtifact;
use crate::portfolio::escape_html;

const TAG_COLOR: &str = "#e06c75";
const ATTR_COLOR: &str = "#d19a66";
const STRING_COLOR: &str = "#98c379";
const COMMENT_COLOR: &str = "#7f848e";
const PROPERTY_COLOR: &str = "#61afef";
const SELECTOR_COLOR: &str = "#e5c07b";
const KEYWORD_COLOR: &str = "#c678dd";
const LITERAL_COLOR: &str = "#56b6c2";

static HTML_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(?P<comment><!--.*?-->)|(?P<tag><[^>]*>)").expect("valid regex"));

static HTML_TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(</?)([!A-Za-z][\w:-]*)").expect("valid regex"));

static HTML_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<string>"[^"]*"|'[^']*')|(?P<attr>[A-Za-z_:@][\w:.-]*)"#).expect("valid regex")
});

static CSS_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)(?P<comment>/\*.*?\*/)",
        r#"|(?P<string>"[^"\n]*"|'[^'\n]*')"#,
        r"|(?P<color>#[0-9a-fA-F]{3,8}\b|(?:rgb|hsl)a?\([^)]*\))",
        r#"|(?P<selector>[^{}/;"'\s][^{}/;"']*?)\s*\{"#,
        r"|(?P<property>-{0,2}[A-Za-z][\w-]*)\s*:",
    ))
    .expect("valid regex")
});

static JS_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)(?P<comment>//[^\n]*|/\*.*?\*/)",
        r#"|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`)"#,
        r"|(?P<keyword>\b(?:async|await|break|case|catch|class|const|continue|default|delete|do|else|export|extends|finally|for|from|function|if|import|in|instanceof|let|new|of|return|switch|this|throw|try|typeof|var|void|while|yield)\b)",
        r"|(?P<literal>\b(?:true|false|null|undefined|NaN|Infinity)\b|\b\d+(?:\.\d+)?\b)",
    ))
    .expect("valid regex")
});

/// Colored, escaped renditions of an artifact's three code views.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightedCode {
    pub html: String,
    pub css: String,
    pub js: String,
}

pub fn highlight_artifact(artifact: &GeneratedArtifact) -> HighlightedCode {
    HighlightedCode {
        html: highlight_html(artifact.html()),
        css: highlight_css(artifact.css()),
        js: highlight_js(artifact.js()),
    }
}

/// Colors tag names, attribute names, quoted values and comments.
pub fn highlight_html(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut last = 0;

    for caps in HTML_TOKEN_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_html(&source[last..whole.start()]));

        if let Some(comment) = caps.name("comment") {
            out.push_str(&span(COMMENT_COLOR, comment.as_str()));
        } else {
            out.push_str(&highlight_tag(whole.as_str()));
        }
        last = whole.end();
    }

    out.push_str(&escape_html(&source[last..]));
    out
}

fn highlight_tag(tag: &str) -> String {
    let Some(caps) = HTML_TAG_NAME_RE.captures(tag) else {
        return escape_html(tag);
    };
    let (Some(opener), Some(name)) = (caps.get(1), caps.get(2)) else {
        return escape_html(tag);
    };

    let mut out = escape_html(opener.as_str());
    out.push_str(&span(TAG_COLOR, name.as_str()));
    out.push_str(&colorize(&tag[name.end()..], &HTML_ATTR_RE, |group| match group {
        "string" => STRING_COLOR,
        _ => ATTR_COLOR,
    }));
    out
}

/// Colors selectors, property names, color literals, strings and comments.
pub fn highlight_css(source: &str) -> String {
    colorize(source, &CSS_TOKEN_RE, |group| match group {
        "comment" => COMMENT_COLOR,
        "string" => STRING_COLOR,
        "color" => LITERAL_COLOR,
        "selector" => SELECTOR_COLOR,
        _ => PROPERTY_COLOR,
    })
}

/// Colors reserved words, literals, strings and comments.
pub fn highlight_js(source: &str) -> String {
    colorize(source, &JS_TOKEN_RE, |group| match group {
        "comment" => COMMENT_COLOR,
        "string" => STRING_COLOR,
        "keyword" => KEYWORD_COLOR,
        _ => LITERAL_COLOR,
    })
}

/// Escapes `source`, wrapping the first named group of each match in a span.
/// Text of the match outside that group (e.g. a trailing `{`) stays plain.
fn colorize(source: &str, re: &Regex, color_for: impl Fn(&str) -> &'static str) -> String {
    let group_names: Vec<&str> = re.capture_names().flatten().collect();
    let mut out = String::with_capacity(source.len() * 2);
    let mut last = 0;

    for caps in re.captures_iter(source) {
        let Some((group, m)) = first_named_match(&caps, &group_names) else {
            continue;
        };
        let Some(whole) = caps.get(0) else { continue };

        out.push_str(&escape_html(&source[last..m.start()]));
        out.push_str(&span(color_for(group), m.as_str()));
        out.push_str(&escape_html(&source[m.end()..whole.end()]));
        last = whole.end();
    }

    out.push_str(&escape_html(&source[last..]));
    out
}

fn first_named_match<'h, 'n>(
    caps: &Captures<'h>,
    names: &[&'n str],
) -> Option<(&'n str, regex::Match<'h>)> {
    names
        .iter()
        .find_map(|name| caps.name(name).map(|m| (*name, m)))
}

fn span(color: &str, text: &str) -> String {
    format!("<span style=\"color:{color}\">{}</span>", escape_html(text))
}
