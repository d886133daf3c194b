//! Fully qualified resource names of the form
//! `projects/{project}/databases/{database}/documents/{path...}`.

use crate::{
    error::{Error, Result},
    DatabaseId, ResourcePath,
};

const PROJECTS: &str = "projects";
const DATABASES: &str = "databases";
const DOCUMENTS: &str = "documents";

/// The prefix naming a database, without anything after it: `projects/{p}/databases/{d}`.
pub fn encode_database_id(database_id: &DatabaseId) -> ResourcePath {
    ResourcePath::new([
        PROJECTS,
        database_id.project_id(),
        DATABASES,
        database_id.database_id(),
    ])
}

/// Name a path under a database's document root.
pub fn encode_resource_name(database_id: &DatabaseId, path: &ResourcePath) -> String {
    encode_database_id(database_id)
        .append(DOCUMENTS)
        .append_path(path)
        .canonical_string()
}

/// Whether a path starts with something shaped like an encoded database id.
pub fn is_valid_resource_name(path: &ResourcePath) -> bool {
    path.len() >= 4 && &path[0] == PROJECTS && &path[2] == DATABASES
}

/// Parse a resource name and check that it names a project and database. Says nothing about
/// whether there's a document path after them.
pub fn decode_resource_name(encoded: &str) -> Result<ResourcePath> {
    let resource = ResourcePath::from_string(encoded);
    if !is_valid_resource_name(&resource) {
        return Err(Error::BadResourceName(encoded.to_string()));
    }
    Ok(resource)
}

/// The database id a valid resource name refers to.
pub fn database_id_of(resource: &ResourcePath) -> Result<DatabaseId> {
    if !is_valid_resource_name(resource) {
        return Err(Error::BadResourceName(resource.canonical_string()));
    }
    Ok(DatabaseId::new(&resource[1], &resource[3]))
}

/// Strip the `projects/{p}/databases/{d}/documents` prefix off a resource name, leaving the path
/// relative to the document root.
pub fn extract_local_path(resource: &ResourcePath) -> Result<ResourcePath> {
    if resource.len() <= 4 || &resource[4] != DOCUMENTS {
        return Err(Error::BadResourceName(resource.canonical_string()));
    }
    Ok(resource.pop_first(5))
}
