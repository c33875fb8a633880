//! Persistence layer for a portfolio site.
//!
//! Stores a singleton profile record and an ordered collection of project
//! records in SQLite, exposing typed CRUD operations over both. Consumers
//! inject a connection pool and call [`PortfolioRepository`] directly;
//! there is no HTTP surface in this crate.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::{Config, DatabaseConfig};
pub use domain::{Profile, ProfileDraft, ProfileLink, Project, ProjectDraft, ProjectPatch};
pub use error::{StoreError, StoreResult};
pub use storage::{connect_pool, PortfolioRepository};
