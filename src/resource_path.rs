use std::fmt;
use std::ops::Index;

/// A slash-separated path of segments, like `projects/p/databases/d/documents/rooms/a`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a path on `/`. Empty segments are dropped, so leading, trailing, and doubled slashes
    /// are all tolerated.
    pub fn from_string(path: &str) -> Self {
        Self::new(path.split('/').filter(|s| !s.is_empty()))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// A new path with one more segment on the end.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// A new path with all of `other`'s segments on the end.
    pub fn append_path(&self, other: &ResourcePath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend_from_slice(&other.segments);
        Self { segments }
    }

    /// A new path without the first `n` segments. Removing more segments than the path has
    /// leaves it empty.
    pub fn pop_first(&self, n: usize) -> Self {
        Self {
            segments: self.segments.iter().skip(n).cloned().collect(),
        }
    }

    pub fn is_prefix_of(&self, other: &ResourcePath) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Segments joined with `/`, no leading slash.
    pub fn canonical_string(&self) -> String {
        self.segments.join("/")
    }
}

impl Index<usize> for ResourcePath {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.segments[index]
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}
