//! Minimal checks on a submitted profile before it is sent for generation.

use crate::models::profile::UserProfile;

#[derive(Debug, Clone)]
pub struct ProfileValidation {
    pub passed: bool,
    pub issues: Vec<String>,
}

/// Requires a name, at least one achievement per job and at least one
/// technology per project. Everything else degrades gracefully in the prompt.
pub fn validate_profile(profile: &UserProfile) -> ProfileValidation {
    let mut issues = Vec::new();

    if profile.name.trim().is_empty() {
        issues.push("name is required".to_string());
    }

    for (i, job) in profile.experience.iter().enumerate() {
        if job.achievements.iter().all(|a| a.trim().is_empty()) {
            issues.push(format!(
                "experience[{i}] ({}) needs at least one achievement",
                label(&job.position, "untitled position")
            ));
        }
    }

    for (i, project) in profile.projects.iter().enumerate() {
        if project.tech_stack.iter().all(|t| t.trim().is_empty()) {
            issues.push(format!(
                "projects[{i}] ({}) needs at least one technology in tech_stack",
                label(&project.title, "untitled project")
            ));
        }
    }

    ProfileValidation {
        passed: issues.is_empty(),
        issues,
    }
}

fn label<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Project, WorkExperience};

    #[test]
    fn test_minimal_profile_passes() {
        let profile = UserProfile {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        let result = validate_profile(&profile);
        assert!(result.passed);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_blank_name_fails() {
        let profile = UserProfile {
            name: "   ".to_string(),
            ..Default::default()
        };
        let result = validate_profile(&profile);
        assert!(!result.passed);
        assert_eq!(result.issues, vec!["name is required".to_string()]);
    }

    #[test]
    fn test_collects_every_issue() {
        let profile = UserProfile {
            name: String::new(),
            experience: vec![WorkExperience {
                position: "Engineer".to_string(),
                company: "Acme".to_string(),
                period: None,
                achievements: vec![" ".to_string()],
            }],
            projects: vec![Project {
                title: String::new(),
                description: "A thing".to_string(),
                tech_stack: vec![],
                live_url: None,
                repo_url: None,
            }],
            ..Default::default()
        };

        let result = validate_profile(&profile);

        assert!(!result.passed);
        assert_eq!(result.issues.len(), 3);
        assert!(result.issues[1].contains("experience[0] (Engineer)"));
        assert!(result.issues[2].contains("projects[0] (untitled project)"));
    }
}
