//! Project domain models.
//!
//! Projects form an ordered collection: each row carries a `display_order`
//! sort key that is neither unique nor contiguous.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: Uuid,
    /// Project title.
    pub title: String,
    /// Short description of the project.
    pub summary: String,
    /// Technologies used, in display order.
    pub tech_stack: Vec<String>,
    /// Optional source repository URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Optional live deployment URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Optional screenshot/cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the project is highlighted on the landing page.
    pub featured: bool,
    /// Sort key for display ordering (ascending).
    pub display_order: i64,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project from a draft, assigning an id and timestamps.
    pub fn from_draft(draft: &ProjectDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            summary: draft.summary.clone(),
            tech_stack: draft.tech_stack.clone(),
            repo_url: draft.repo_url.clone(),
            live_url: draft.live_url.clone(),
            image_url: draft.image_url.clone(),
            featured: draft.featured,
            display_order: draft.display_order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The field set accepted when creating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i64,
}

/// A partial project update: only `Some` fields are applied.
///
/// Absent (`None`) fields leave the stored value untouched, so a patch
/// cannot clear an optional column back to NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_copies_fields() {
        let draft = ProjectDraft {
            title: "CLI Tool".to_string(),
            summary: "A small terminal utility".to_string(),
            tech_stack: vec!["rust".to_string(), "clap".to_string()],
            repo_url: Some("https://github.com/me/cli-tool".to_string()),
            live_url: None,
            image_url: None,
            featured: true,
            display_order: 3,
        };

        let project = Project::from_draft(&draft);
        assert_eq!(project.title, draft.title);
        assert_eq!(project.tech_stack, draft.tech_stack);
        assert_eq!(project.display_order, 3);
        assert!(project.featured);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_from_draft_assigns_unique_ids() {
        let draft = ProjectDraft {
            title: "A".to_string(),
            summary: "B".to_string(),
            tech_stack: vec![],
            repo_url: None,
            live_url: None,
            image_url: None,
            featured: false,
            display_order: 0,
        };

        let a = Project::from_draft(&draft);
        let b = Project::from_draft(&draft);
        assert_ne!(a.id, b.id);
    }
}
