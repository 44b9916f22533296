//! Renders a `UserProfile` into the instruction string sent to the model.
//!
//! Pure and deterministic: the same profile always yields the same prompt.
//! Missing values render as `none provided` or are omitted, never as
//! `undefined`/`null`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::llm_client::prompts::SINGLE_FILE_INSTRUCTION;
use crate::models::profile::{non_blank, Education, MediaFile, Project, UserProfile, WorkExperience};
use crate::portfolio::prompts::{
    DEFAULT_DESIGN_DIRECTION, NONE_PROVIDED, PORTFOLIO_PROMPT_TEMPLATE, REFERENCE_SITE_DIRECTION,
};

/// Builds the full generation prompt for a profile.
pub fn build_portfolio_prompt(profile: &UserProfile) -> String {
    let design_direction = match non_blank(&profile.reference_site) {
        Some(url) => REFERENCE_SITE_DIRECTION.replace("{reference_site}", url),
        None => DEFAULT_DESIGN_DIRECTION.to_string(),
    };

    fill_template(
        PORTFOLIO_PROMPT_TEMPLATE,
        &[
            ("design_direction", design_direction.as_str()),
            ("single_file_instruction", SINGLE_FILE_INSTRUCTION),
            ("profile_details", render_profile(profile).as_str()),
        ],
    )
}

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid regex"));

/// Fills `{name}` placeholders in one pass, so inserted text is never
/// scanned again. Unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn render_profile(profile: &UserProfile) -> String {
    let sections = [
        render_personal(profile),
        render_list("SKILLS", &unique_skills(&profile.skills), |s| format!("- {s}")),
        render_list("WORK EXPERIENCE", &profile.experience, render_experience),
        render_list("PROJECTS", &profile.projects, render_project),
        render_education(profile),
        render_list("MEDIA FILES", &profile.media, render_media),
    ];
    sections.join("\n\n")
}

fn render_personal(profile: &UserProfile) -> String {
    let name = profile.name.trim();
    let title = profile.title.trim();
    let bio = non_blank(&profile.bio);

    [
        "PERSONAL INFORMATION:".to_string(),
        format!("- Name: {}", or_none(name)),
        format!("- Title: {}", or_none(title)),
        format!("- Bio: {}", bio.unwrap_or(NONE_PROVIDED)),
    ]
    .join("\n")
}

fn render_list<T>(heading: &str, items: &[T], render: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return format!("{heading}:\n- {NONE_PROVIDED}");
    }
    let body: Vec<String> = items.iter().map(render).collect();
    format!("{heading}:\n{}", body.join("\n"))
}

fn render_experience(job: &WorkExperience) -> String {
    let mut lines = vec![format!(
        "- {} at {}",
        or_none(job.position.trim()),
        or_none(job.company.trim())
    )];

    if let Some(period) = job.period.as_ref().map(|p| p.display()) {
        if !period.is_empty() {
            lines.push(format!("  Period: {period}"));
        }
    }

    lines.extend(
        job.achievements
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(|a| format!("  • {a}")),
    );
    lines.join("\n")
}

fn render_project(project: &Project) -> String {
    let mut lines = vec![format!("- {}", or_none(project.title.trim()))];

    let description = project.description.trim();
    if !description.is_empty() {
        lines.push(format!("  Description: {description}"));
    }

    let stack: Vec<&str> = project
        .tech_stack
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    lines.push(format!(
        "  Tech stack: {}",
        if stack.is_empty() {
            NONE_PROVIDED.to_string()
        } else {
            stack.join(", ")
        }
    ));

    if let Some(url) = non_blank(&project.live_url) {
        lines.push(format!("  Live URL: {url}"));
    }
    if let Some(url) = non_blank(&project.repo_url) {
        lines.push(format!("  Source code: {url}"));
    }
    lines.join("\n")
}

fn render_education(profile: &UserProfile) -> String {
    if profile.education.is_empty() {
        if let Some(summary) = non_blank(&profile.education_summary) {
            return format!("EDUCATION:\n{summary}");
        }
    }
    render_list("EDUCATION", &profile.education, render_school)
}

fn render_school(entry: &Education) -> String {
    let mut line = format!(
        "- {}, {}",
        or_none(entry.degree.trim()),
        or_none(entry.school.trim())
    );

    if let Some(period) = entry.dates.as_ref().map(|d| d.display()) {
        if !period.is_empty() {
            line.push_str(&format!(" ({period})"));
        }
    }
    if let Some(grade) = non_blank(&entry.grade) {
        line.push_str(&format!(" — Grade: {grade}"));
    }
    line
}

fn render_media(media: &MediaFile) -> String {
    match non_blank(&media.url) {
        Some(url) => format!("- {} ({}): {url}", media.name.trim(), media.kind.as_str()),
        None => format!("- {} ({})", media.name.trim(), media.kind.as_str()),
    }
}

/// Drops blank and repeated skills (case-insensitive), keeping first spelling and order.
/// Trimmed, non-blank skills with case-insensitive duplicates removed.
pub(crate) fn unique_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        NONE_PROVIDED
    } else {
        value
    }
}
