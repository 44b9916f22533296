//! Résumé data collected by the form wizard.
//!
//! A `UserProfile` is handed over complete for each generation request and
//! is never edited by the pipeline; regeneration reuses a stored copy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Missing names reach validation, which reports them as a 400.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Treated as a set: duplicates are dropped when the prompt is rendered.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    /// Free-text education block used by forms without structured entries.
    #[serde(default)]
    pub education_summary: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaFile>,
    #[serde(default)]
    pub reference_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub dates: Option<DateRange>,
}

/// Either a structured date range or whatever the user typed ("2019 - 2021").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Period {
    Range(DateRange),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start_month: String,
    #[serde(default)]
    pub start_year: String,
    #[serde(default)]
    pub end_month: Option<String>,
    #[serde(default)]
    pub end_year: Option<String>,
    /// Suppresses the end fields.
    #[serde(default)]
    pub is_present: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Document,
    #[default]
    Other,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Other => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub url: Option<String>,
}

impl Period {
    /// Human-readable form, e.g. `Jan 2020 – Present`.
    pub fn display(&self) -> String {
        match self {
            Period::Range(range) => range.display(),
            Period::Text(text) => text.trim().to_string(),
        }
    }
}

impl DateRange {
    pub fn display(&self) -> String {
        let start = join_month_year(&self.start_month, &self.start_year);
        let end = if self.is_present {
            "Present".to_string()
        } else {
            join_month_year(
                self.end_month.as_deref().unwrap_or_default(),
                self.end_year.as_deref().unwrap_or_default(),
            )
        };

        match (start.is_empty(), end.is_empty()) {
            (true, true) => String::new(),
            (false, true) => start,
            (true, false) => format!("until {end}"),
            (false, false) => format!("{start} – {end}"),
        }
    }
}

fn join_month_year(month: &str, year: &str) -> String {
    format!("{} {}", month.trim(), year.trim()).trim().to_string()
}

/// Returns the trimmed value when it carries any text.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
