use crate::{
    error::{Error, Result},
    ResourcePath,
};
use std::fmt;

/// Where a document lives, relative to its database's document root. The path alternates
/// collection and document ids, so it always has an even number of segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey {
    path: ResourcePath,
}

impl DocumentKey {
    /// Fails if the path has an odd number of segments, which would make it name a collection, or
    /// if any segment is empty or contains a `/`. Such a segment can't survive being written into
    /// a resource name and parsed back.
    pub fn from_path(path: ResourcePath) -> Result<Self> {
        if !Self::is_document_key(&path) {
            return Err(Error::BadResourceName(format!(
                "{:?} is not a document path: it has an odd number of segments",
                path.canonical_string()
            )));
        }
        if let Some(segment) = path
            .segments()
            .iter()
            .find(|s| s.is_empty() || s.contains('/'))
        {
            return Err(Error::BadResourceName(format!(
                "{:?} is not a valid path segment",
                segment
            )));
        }
        Ok(Self { path })
    }

    /// Parse a slash-separated document path.
    pub fn from_path_string(path: &str) -> Result<Self> {
        Self::from_path(ResourcePath::from_string(path))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_path(ResourcePath::new(segments))
    }

    pub fn is_document_key(path: &ResourcePath) -> bool {
        path.len() % 2 == 0
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn into_path(self) -> ResourcePath {
        self.path
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}
