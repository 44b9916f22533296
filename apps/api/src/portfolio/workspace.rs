//! The current profile and artifact, owned by the page-level coordinator.
//!
//! Both are replaced together after every generation (success or
//! diagnostic) and never edited in place.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::artifact::GeneratedArtifact;
use crate::models::profile::UserProfile;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub profile: UserProfile,
    pub artifact: GeneratedArtifact,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Workspace {
    current: RwLock<Option<Snapshot>>,
}

impl Workspace {
    pub async fn replace(&self, profile: UserProfile, artifact: GeneratedArtifact) -> Snapshot {
        let snapshot = Snapshot {
            profile,
            artifact,
            generated_at: Utc::now(),
        };
        *self.current.write().await = Some(snapshot.clone());
        snapshot
    }

    pub async fn current(&self) -> Option<Snapshot> {
        self.current.read().await.clone()
    }

    /// The profile of the last generation, used by regenerate.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.current.read().await.as_ref().map(|s| s.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(body: &str) -> GeneratedArtifact {
        GeneratedArtifact::new(
            format!("<!DOCTYPE html><html><body>{body}</body></html>"),
            String::new(),
            String::new(),
        )
    }

    #[tokio::test]
    async fn test_empty_workspace_has_nothing() {
        let workspace = Workspace::default();
        assert!(workspace.current().await.is_none());
        assert!(workspace.profile().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_swaps_profile_and_artifact_together() {
        let workspace = Workspace::default();
        let first = UserProfile {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        let second = UserProfile {
            name: "John Roe".to_string(),
            ..Default::default()
        };

        workspace.replace(first, artifact("one")).await;
        workspace.replace(second.clone(), artifact("two")).await;

        let current = workspace.current().await.unwrap();
        assert_eq!(current.profile, second);
        assert!(current.artifact.html().contains("two"));
        assert_eq!(workspace.profile().await.unwrap().name, "John Roe");
    }
}
