//! Profile domain models.
//!
//! The profile is a singleton: the store holds at most one row, created on
//! the first upsert and replaced in place on every subsequent one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The site owner's profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier, assigned when the row is first created.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Short tagline shown under the name.
    pub headline: String,
    /// Longer free-form biography.
    pub bio: String,
    /// Contact email.
    pub email: String,
    /// Optional location string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Optional avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// External links (GitHub, LinkedIn, ...).
    pub links: Vec<ProfileLink>,
    /// When the profile was first created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last replaced.
    pub updated_at: DateTime<Utc>,
}

/// A labelled external link on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLink {
    /// Display label, e.g. "GitHub".
    pub label: String,
    /// Target URL.
    pub url: String,
}

/// The full replacement field set accepted by the profile upsert.
///
/// The upsert applies every field; there is no partial profile update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub headline: String,
    pub bio: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}
