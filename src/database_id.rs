use serde::{Deserialize, Serialize};
use std::fmt;

/// Database id used when a project has only the one database.
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Identifies a database: the project it lives in, and its id within that project.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatabaseId {
    project_id: String,
    database_id: String,
}

impl DatabaseId {
    /// Neither id is checked here. An id containing a `/` gives resource names that
    /// [`Serializer::decode_key`](crate::Serializer::decode_key) rejects rather than misreads:
    /// ids parsed out of a name never contain a `/`, so they can't match. Use
    /// [`is_valid`](Self::is_valid) to check ahead of time.
    pub fn new(project_id: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: database_id.into(),
        }
    }

    /// The project's default database.
    pub fn with_default_database(project_id: impl Into<String>) -> Self {
        Self::new(project_id, DEFAULT_DATABASE_ID)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn is_default_database(&self) -> bool {
        self.database_id == DEFAULT_DATABASE_ID
    }

    /// Whether both ids are non-empty and free of `/`, so they survive a trip through a resource
    /// name.
    pub fn is_valid(&self) -> bool {
        [&self.project_id, &self.database_id]
            .iter()
            .all(|id| !id.is_empty() && !id.contains('/'))
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "projects/{}/databases/{}",
            self.project_id, self.database_id
        )
    }
}
