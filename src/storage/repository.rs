//! Repository layer for database operations.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Profile, ProfileDraft, Project, ProjectDraft, ProjectPatch};
use crate::error::{StoreError, StoreResult};
use crate::storage::models::{ProfileRow, ProjectRow};

/// Repository for all portfolio database operations.
///
/// Holds no state besides the injected connection pool; every operation is
/// one statement against the store, with failures propagated unchanged.
#[derive(Clone)]
pub struct PortfolioRepository {
    pool: SqlitePool,
}

impl PortfolioRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the database schema.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn init_schema(&self) -> StoreResult<()> {
        // The fixed-value slot column caps the table at one row and gives
        // the profile upsert its conflict target.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                slot INTEGER NOT NULL DEFAULT 0 CHECK (slot = 0),
                name TEXT NOT NULL,
                headline TEXT NOT NULL,
                bio TEXT NOT NULL,
                email TEXT NOT NULL,
                location TEXT,
                avatar_url TEXT,
                links TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(slot)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                summary TEXT NOT NULL,
                tech_stack TEXT NOT NULL,
                repo_url TEXT,
                live_url TEXT,
                image_url TEXT,
                featured INTEGER NOT NULL DEFAULT 0,
                display_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_projects_display_order
                ON projects(display_order);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== Profile ====================

    /// Get the profile, if one has been created yet.
    pub async fn get_profile(&self) -> StoreResult<Option<Profile>> {
        let row: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Create or replace the profile in a single atomic statement.
    ///
    /// The insert path assigns a fresh id; the conflict path keeps the
    /// existing row's id and created_at and replaces every other field.
    pub async fn upsert_profile(&self, draft: &ProfileDraft) -> StoreResult<Profile> {
        debug!(name = %draft.name, "Upserting profile");

        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, slot, name, headline, bio, email, location, avatar_url,
                links, created_at, updated_at
            ) VALUES (?, 0, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(slot) DO UPDATE SET
                name = excluded.name,
                headline = excluded.headline,
                bio = excluded.bio,
                email = excluded.email,
                location = excluded.location,
                avatar_url = excluded.avatar_url,
                links = excluded.links,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&draft.name)
        .bind(&draft.headline)
        .bind(&draft.bio)
        .bind(&draft.email)
        .bind(&draft.location)
        .bind(&draft.avatar_url)
        .bind(serde_json::to_string(&draft.links)?)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_profile()
            .await?
            .ok_or_else(|| StoreError::Internal("Profile missing after upsert".to_string()))
    }

    // ==================== Projects ====================

    /// List all projects, ascending by display order.
    pub async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let rows: Vec<ProjectRow> =
            sqlx::query_as("SELECT * FROM projects ORDER BY display_order ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Get a project by ID.
    pub async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let row: Option<ProjectRow> = sqlx::query_as("SELECT * FROM projects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Create a new project, assigning its id and timestamps.
    pub async fn create_project(&self, draft: &ProjectDraft) -> StoreResult<Project> {
        let project = Project::from_draft(draft);

        debug!(id = %project.id, title = %project.title, "Creating project");

        sqlx::query(
            r#"
            INSERT INTO projects (
                id, title, summary, tech_stack, repo_url, live_url, image_url,
                featured, display_order, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id.to_string())
        .bind(&project.title)
        .bind(&project.summary)
        .bind(serde_json::to_string(&project.tech_stack)?)
        .bind(&project.repo_url)
        .bind(&project.live_url)
        .bind(&project.image_url)
        .bind(if project.featured { 1 } else { 0 })
        .bind(project.display_order)
        .bind(project.created_at.to_rfc3339())
        .bind(project.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(project)
    }

    /// Apply a partial update to a project and return the updated row.
    ///
    /// Only the patch's `Some` fields are changed. A non-matching id is a
    /// [`StoreError::NotFound`].
    pub async fn update_project(&self, id: Uuid, patch: &ProjectPatch) -> StoreResult<Project> {
        debug!(id = %id, "Updating project");

        let updated_at = Utc::now().to_rfc3339();
        let tech_stack = patch
            .tech_stack
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE projects SET
                title = COALESCE(?, title),
                summary = COALESCE(?, summary),
                tech_stack = COALESCE(?, tech_stack),
                repo_url = COALESCE(?, repo_url),
                live_url = COALESCE(?, live_url),
                image_url = COALESCE(?, image_url),
                featured = COALESCE(?, featured),
                display_order = COALESCE(?, display_order),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.summary)
        .bind(tech_stack)
        .bind(&patch.repo_url)
        .bind(&patch.live_url)
        .bind(&patch.image_url)
        .bind(patch.featured.map(|f| if f { 1 } else { 0 }))
        .bind(patch.display_order)
        .bind(&updated_at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Project {} not found", id)));
        }

        self.get_project(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Project {} not found", id)))
    }

    /// Delete a project.
    ///
    /// Deleting an id with no matching row is a silent no-op.
    pub async fn delete_project(&self, id: Uuid) -> StoreResult<()> {
        debug!(id = %id, "Deleting project");

        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProfileLink;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> PortfolioRepository {
        // In-memory SQLite is per-connection, so the test pool is capped
        // at a single connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        let repo = PortfolioRepository::new(pool);
        repo.init_schema().await.expect("Failed to init schema");
        repo
    }

    fn sample_profile(name: &str) -> ProfileDraft {
        ProfileDraft {
            name: name.to_string(),
            headline: "Systems programmer".to_string(),
            bio: "I build storage engines and CLIs.".to_string(),
            email: "dev@example.com".to_string(),
            location: Some("Berlin".to_string()),
            avatar_url: None,
            links: vec![ProfileLink {
                label: "GitHub".to_string(),
                url: "https://github.com/dev".to_string(),
            }],
        }
    }

    fn sample_project(title: &str, display_order: i64) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            summary: format!("Summary of {}", title),
            tech_stack: vec!["rust".to_string(), "sqlite".to_string()],
            repo_url: Some(format!("https://github.com/dev/{}", title)),
            live_url: None,
            image_url: None,
            featured: false,
            display_order,
        }
    }

    async fn count_profiles(repo: &PortfolioRepository) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(repo.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_profile_on_empty_store_returns_none() {
        let repo = setup_test_db().await;
        assert!(repo.get_profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_profile_creates_then_replaces() {
        let repo = setup_test_db().await;

        let first = repo.upsert_profile(&sample_profile("Alex")).await.unwrap();
        assert_eq!(first.name, "Alex");
        assert_eq!(first.location.as_deref(), Some("Berlin"));
        assert_eq!(count_profiles(&repo).await, 1);

        let mut draft = sample_profile("Sam");
        draft.headline = "Backend engineer".to_string();
        let second = repo.upsert_profile(&draft).await.unwrap();

        // Replacement keeps the original identity and creation time.
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.name, "Sam");
        assert_eq!(second.headline, "Backend engineer");
        assert_eq!(count_profiles(&repo).await, 1);
    }

    #[tokio::test]
    async fn test_upsert_profile_round_trips_links() {
        let repo = setup_test_db().await;

        let draft = sample_profile("Alex");
        repo.upsert_profile(&draft).await.unwrap();

        let stored = repo.get_profile().await.unwrap().unwrap();
        assert_eq!(stored.links, draft.links);
        assert_eq!(stored.bio, draft.bio);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_leave_at_most_one_profile() {
        let repo = setup_test_db().await;

        let first = sample_profile("Alex");
        let second = sample_profile("Sam");
        let (ra, rb) = tokio::join!(repo.upsert_profile(&first), repo.upsert_profile(&second));

        ra.unwrap();
        rb.unwrap();
        assert_eq!(count_profiles(&repo).await, 1);
    }

    #[tokio::test]
    async fn test_list_projects_ordered_by_display_order() {
        let repo = setup_test_db().await;

        repo.create_project(&sample_project("third", 30)).await.unwrap();
        repo.create_project(&sample_project("first", 10)).await.unwrap();
        repo.create_project(&sample_project("also-second", 20))
            .await
            .unwrap();
        repo.create_project(&sample_project("second", 20)).await.unwrap();

        let projects = repo.list_projects().await.unwrap();
        assert_eq!(projects.len(), 4);

        let orders: Vec<i64> = projects.iter().map(|p| p.display_order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);

        let mut titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["also-second", "first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_list_projects_on_empty_store_returns_empty() {
        let repo = setup_test_db().await;
        assert!(repo.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_project_absent_and_present() {
        let repo = setup_test_db().await;

        assert!(repo.get_project(Uuid::new_v4()).await.unwrap().is_none());

        let created = repo.create_project(&sample_project("demo", 1)).await.unwrap();
        let fetched = repo.get_project(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_update_project_patches_only_present_fields() {
        let repo = setup_test_db().await;

        let created = repo.create_project(&sample_project("demo", 5)).await.unwrap();

        let patch = ProjectPatch {
            summary: Some("Rewritten summary".to_string()),
            featured: Some(true),
            ..Default::default()
        };
        let updated = repo.update_project(created.id, &patch).await.unwrap();

        assert_eq!(updated.summary, "Rewritten summary");
        assert!(updated.featured);
        // Untouched fields keep their stored values.
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.tech_stack, created.tech_stack);
        assert_eq!(updated.repo_url, created.repo_url);
        assert_eq!(updated.display_order, created.display_order);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_project_with_unknown_id_is_not_found() {
        let repo = setup_test_db().await;

        let patch = ProjectPatch {
            title: Some("renamed".to_string()),
            ..Default::default()
        };
        let err = repo.update_project(Uuid::new_v4(), &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_project_is_silent_and_idempotent() {
        let repo = setup_test_db().await;

        let created = repo.create_project(&sample_project("gone", 1)).await.unwrap();

        repo.delete_project(created.id).await.unwrap();
        assert!(repo.get_project(created.id).await.unwrap().is_none());

        // Second delete of the same id must not error.
        repo.delete_project(created.id).await.unwrap();
    }
}
