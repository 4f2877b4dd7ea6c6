//! Storage collaborator trait for the batch resetter.

use crate::error::Result;
use crate::store::records::{ScoreUpdate, UserRecord};

/// Document-collection interface the batch resetter runs against.
///
/// `commit_batch` must apply every update in one atomic unit: either all
/// updates land or none do.
pub trait UserDirectory {
    /// Enumerate every user record in the collection.
    fn enumerate(&self) -> Result<Vec<UserRecord>>;

    /// Commit a batch of score updates atomically, returning the number of
    /// records updated.
    fn commit_batch(&mut self, updates: &[ScoreUpdate]) -> Result<usize>;
}
