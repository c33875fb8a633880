//! Database models for the portfolio persistence layer.
//!
//! These are the row types returned by SQLx queries.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{Profile, Project};

/// Database row for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub name: String,
    pub headline: String,
    pub bio: String,
    pub email: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub links: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = crate::error::StoreError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| crate::error::StoreError::Internal(e.to_string()))?,
            name: row.name,
            headline: row.headline,
            bio: row.bio,
            email: row.email,
            location: row.location,
            avatar_url: row.avatar_url,
            links: serde_json::from_str(&row.links)?,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| crate::error::StoreError::Internal(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| crate::error::StoreError::Internal(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

/// Database row for the projects table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub tech_stack: String,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: i64,
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = crate::error::StoreError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| crate::error::StoreError::Internal(e.to_string()))?,
            title: row.title,
            summary: row.summary,
            tech_stack: serde_json::from_str(&row.tech_stack)?,
            repo_url: row.repo_url,
            live_url: row.live_url,
            image_url: row.image_url,
            featured: row.featured != 0,
            display_order: row.display_order,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| crate::error::StoreError::Internal(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| crate::error::StoreError::Internal(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}
