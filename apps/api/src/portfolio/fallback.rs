//! Diagnostic page substituted for the portfolio when generation fails.
//!
//! Styled with inline attributes only, so running it back through
//! `extract::parse_response` returns the same document with placeholder
//! CSS and JS.

use crate::models::artifact::GeneratedArtifact;
use crate::models::profile::UserProfile;
use crate::portfolio::escape_html;
use crate::portfolio::extract::parse_response;
use crate::portfolio::failure::GenerationFailure;
use crate::portfolio::prompt_builder::unique_skills;

const PAGE_STYLE: &str = "margin:0;padding:48px 16px;background:#f5f5f7;color:#1d1d1f;\
    font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;line-height:1.6";
const CARD_STYLE: &str = "max-width:720px;margin:0 auto;background:#fff;border-radius:12px;\
    padding:32px;box-shadow:0 4px 24px rgba(0,0,0,0.08)";
const DETAIL_STYLE: &str = "white-space:pre-wrap;background:#f0f0f3;border-radius:8px;\
    padding:12px;font-size:13px;color:#6e6e73";

/// Builds the diagnostic artifact for a failed request.
pub fn diagnostic_artifact(failure: &GenerationFailure, profile: &UserProfile) -> GeneratedArtifact {
    parse_response(&diagnostic_document(failure, profile))
}

/// Renders a complete, self-contained HTML page explaining the failure and
/// echoing what was about to be sent.
pub fn diagnostic_document(failure: &GenerationFailure, profile: &UserProfile) -> String {
    let name = display_or(&profile.name, "(no name provided)");
    let title = display_or(&profile.title, "(no title provided)");

    let summary_rows = [
        ("Name", name.clone()),
        ("Title", title),
        ("Skills", unique_skills(&profile.skills).len().to_string()),
        ("Work experience entries", profile.experience.len().to_string()),
        ("Projects", profile.projects.len().to_string()),
        ("Education entries", profile.education.len().to_string()),
        ("Media files", profile.media.len().to_string()),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "<tr><th style=\"text-align:left;padding:4px 16px 4px 0\">{label}</th>\
             <td style=\"padding:4px 0\">{value}</td></tr>"
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Portfolio generation failed - {name}</title>
</head>
<body style="{PAGE_STYLE}">
<main style="{CARD_STYLE}">
<h1 style="margin-top:0;color:#c0392b">Portfolio generation failed</h1>
<p>{explanation}</p>
<p style="color:#6e6e73">Failure type: {kind}</p>
<pre style="{DETAIL_STYLE}">{detail}</pre>
<h2>Your information was received</h2>
<p>This is the profile that was ready to be sent. Once the problem above is fixed, choose Regenerate to try again.</p>
<table>
{summary_rows}
</table>
</main>
</body>
</html>"#,
        explanation = failure.explanation(),
        kind = failure.kind(),
        detail = escape_html(failure.detail()),
    )
}

fn display_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        escape_html(value)
    }
}
