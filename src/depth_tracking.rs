use crate::error::{Error, Result};

/// Counts how many objects deep a stream currently is. Readers and writers hand a copy to each
/// nested stream they open, so leaving a nested message needs no bookkeeping.
#[derive(Clone, Copy, Debug)]
pub struct DepthTracker {
    depth: usize,
    max: usize,
}

impl DepthTracker {
    /// Create a new depth tracker
    pub fn new(max: usize) -> Self {
        Self { depth: 0, max }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record entry into one more level of object nesting. Fails once the nesting limit is
    /// exceeded.
    pub fn enter_object(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max {
            return Err(Error::ParseLimit(format!(
                "Depth limit of {} exceeded",
                self.max
            )));
        }
        Ok(())
    }
}
