//! User record and score mutation types.

use serde::{Deserialize, Serialize};

/// A user document with its three score fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user identifier
    pub id: String,
    /// Overall score
    pub score_global: i64,
    /// ENEM exam score
    pub score_enem: i64,
    /// OBMEP olympiad score
    pub score_obmep: i64,
}

impl UserRecord {
    /// Create a user record with all scores at zero.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score_global: 0,
            score_enem: 0,
            score_obmep: 0,
        }
    }

    /// Create a user record with explicit scores.
    pub fn with_scores(id: impl Into<String>, global: i64, enem: i64, obmep: i64) -> Self {
        Self {
            id: id.into(),
            score_global: global,
            score_enem: enem,
            score_obmep: obmep,
        }
    }
}

/// A single field update destined for a batch commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreUpdate {
    /// Target user record
    pub user_id: String,
    pub score_global: i64,
    pub score_enem: i64,
    pub score_obmep: i64,
}

impl ScoreUpdate {
    /// The reset mutation: all three score fields set to zero.
    pub fn reset(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            score_global: 0,
            score_enem: 0,
            score_obmep: 0,
        }
    }
}
