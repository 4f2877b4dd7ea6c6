//! Batch resetter - zeroes every user's scores in one atomic batch.

use crate::error::{RescoreError, Result};
use crate::store::records::ScoreUpdate;
use crate::store::traits::UserDirectory;
use log::{debug, info};

/// Collection name used in log lines and errors.
pub const USERS_COLLECTION: &str = "users";

/// Reset all three score fields to zero on every record in the collection.
///
/// Enumerates the full record set, builds one batch covering it, and
/// commits the batch atomically. Returns the number of records updated.
///
/// Fails with [`RescoreError::NoRecords`] when the collection is empty and
/// performs no writes in that case.
pub fn reset_all<D: UserDirectory + ?Sized>(directory: &mut D) -> Result<usize> {
    let users = directory.enumerate()?;
    if users.is_empty() {
        return Err(RescoreError::NoRecords(USERS_COLLECTION.to_string()));
    }

    let updates: Vec<ScoreUpdate> = users
        .iter()
        .map(|user| {
            debug!("Resetting scores for user: {}", user.id);
            ScoreUpdate::reset(&user.id)
        })
        .collect();

    let count = directory.commit_batch(&updates)?;
    info!("All scores reset to 0 ({count} users)");
    Ok(count)
}
