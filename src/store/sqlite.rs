//! Sqlite-backed score store.
//!
//! One database file holds both collaborator surfaces:
//! - **users table**: the document collection the batch resetter mutates
//! - **meta table**: key/value state, including the persisted next reset
//!   date consumed by the recurrence tracker
//!
//! Batch commits run inside a single transaction, which is what gives the
//! resetter its all-or-nothing guarantee.

use crate::error::{RescoreError, Result};
use crate::state::StateStore;
use crate::store::records::{ScoreUpdate, UserRecord};
use crate::store::traits::UserDirectory;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

/// Default database file name inside the data directory.
pub const DB_FILE: &str = "rescore.db";

/// Score store backed by a sqlite database.
pub struct ScoreStore {
    db: Connection,
    path: Option<PathBuf>,
}

impl ScoreStore {
    /// Open or create the store inside the given data directory.
    pub fn open_at(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let db_path = data_dir.join(DB_FILE);
        let db = Connection::open(&db_path)?;
        Self::init_schema(&db)?;
        Ok(Self {
            db,
            path: Some(db_path),
        })
    }

    /// Open an in-memory store, useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory()?;
        Self::init_schema(&db)?;
        Ok(Self { db, path: None })
    }

    fn init_schema(db: &Connection) -> Result<()> {
        db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                score_global INTEGER NOT NULL DEFAULT 0,
                score_enem INTEGER NOT NULL DEFAULT 0,
                score_obmep INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Path to the database file, if file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert or replace a user record.
    pub fn upsert_user(&mut self, user: &UserRecord) -> Result<()> {
        self.db.execute(
            r#"
            INSERT OR REPLACE INTO users (id, score_global, score_enem, score_obmep)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![user.id, user.score_global, user.score_enem, user.score_obmep],
        )?;
        Ok(())
    }

    /// Get a user record by ID.
    pub fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        let result = self.db.query_row(
            "SELECT id, score_global, score_enem, score_obmep FROM users WHERE id = ?1",
            [id],
            |row| {
                Ok(UserRecord {
                    id: row.get(0)?,
                    score_global: row.get(1)?,
                    score_enem: row.get(2)?,
                    score_obmep: row.get(3)?,
                })
            },
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of user records in the collection.
    pub fn count_users(&self) -> Result<usize> {
        let count: i64 = self.db.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl UserDirectory for ScoreStore {
    fn enumerate(&self) -> Result<Vec<UserRecord>> {
        let mut stmt = self
            .db
            .prepare("SELECT id, score_global, score_enem, score_obmep FROM users ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                score_global: row.get(1)?,
                score_enem: row.get(2)?,
                score_obmep: row.get(3)?,
            })
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    fn commit_batch(&mut self, updates: &[ScoreUpdate]) -> Result<usize> {
        let tx = self.db.transaction()?;
        {
            let mut stmt = tx.prepare(
                "UPDATE users SET score_global = ?1, score_enem = ?2, score_obmep = ?3 WHERE id = ?4",
            )?;
            for update in updates {
                stmt.execute(params![
                    update.score_global,
                    update.score_enem,
                    update.score_obmep,
                    update.user_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(updates.len())
    }
}

impl StateStore for ScoreStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .db
            .query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| row.get(0));

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(RescoreError::from(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .execute("INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)", [key, value])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ScoreStore::open_at(temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(DB_FILE).exists());
        assert_eq!(store.path(), Some(temp_dir.path().join(DB_FILE).as_path()));
    }

    #[test]
    fn test_upsert_and_get_user() {
        let mut store = ScoreStore::open_in_memory().unwrap();
        store.upsert_user(&UserRecord::with_scores("alice", 10, 20, 30)).unwrap();

        let user = store.get_user("alice").unwrap().unwrap();
        assert_eq!(user, UserRecord::with_scores("alice", 10, 20, 30));
    }

    #[test]
    fn test_upsert_replaces_existing_user() {
        let mut store = ScoreStore::open_in_memory().unwrap();
        store.upsert_user(&UserRecord::with_scores("alice", 10, 20, 30)).unwrap();
        store.upsert_user(&UserRecord::with_scores("alice", 11, 21, 31)).unwrap();

        let user = store.get_user("alice").unwrap().unwrap();
        assert_eq!(user.score_global, 11);
        assert_eq!(store.count_users().unwrap(), 1);
    }

    #[test]
    fn test_get_nonexistent_user() {
        let store = ScoreStore::open_in_memory().unwrap();
        assert!(store.get_user("ghost").unwrap().is_none());
    }

    #[test]
    fn test_enumerate_empty_collection() {
        let store = ScoreStore::open_in_memory().unwrap();
        assert!(store.enumerate().unwrap().is_empty());
    }

    #[test]
    fn test_enumerate_orders_by_id() {
        let mut store = ScoreStore::open_in_memory().unwrap();
        store.upsert_user(&UserRecord::new("charlie")).unwrap();
        store.upsert_user(&UserRecord::new("alice")).unwrap();
        store.upsert_user(&UserRecord::new("bob")).unwrap();

        let ids: Vec<String> = store.enumerate().unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_commit_batch_updates_all_records() {
        let mut store = ScoreStore::open_in_memory().unwrap();
        store.upsert_user(&UserRecord::with_scores("alice", 10, 20, 30)).unwrap();
        store.upsert_user(&UserRecord::with_scores("bob", 40, 50, 60)).unwrap();

        let updates = vec![ScoreUpdate::reset("alice"), ScoreUpdate::reset("bob")];
        let count = store.commit_batch(&updates).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.get_user("alice").unwrap().unwrap(), UserRecord::new("alice"));
        assert_eq!(store.get_user("bob").unwrap().unwrap(), UserRecord::new("bob"));
    }

    #[test]
    fn test_commit_empty_batch() {
        let mut store = ScoreStore::open_in_memory().unwrap();
        assert_eq!(store.commit_batch(&[]).unwrap(), 0);
    }

    #[test]
    fn test_state_store_get_missing() {
        let store = ScoreStore::open_in_memory().unwrap();
        assert_eq!(store.get("next_reset_date").unwrap(), None);
    }

    #[test]
    fn test_state_store_set_and_get() {
        let store = ScoreStore::open_in_memory().unwrap();
        store.set("next_reset_date", "2024-09-01T00:00:00Z").unwrap();
        assert_eq!(
            store.get("next_reset_date").unwrap(),
            Some("2024-09-01T00:00:00Z".to_string())
        );
    }

    #[test]
    fn test_state_store_replaces_value() {
        let store = ScoreStore::open_in_memory().unwrap();
        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_persistence_across_reopen() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = ScoreStore::open_at(temp_dir.path()).unwrap();
            store.upsert_user(&UserRecord::with_scores("alice", 5, 6, 7)).unwrap();
            store.set("next_reset_date", "2024-10-31T00:00:00Z").unwrap();
        }

        {
            let store = ScoreStore::open_at(temp_dir.path()).unwrap();
            assert_eq!(
                store.get_user("alice").unwrap().unwrap(),
                UserRecord::with_scores("alice", 5, 6, 7)
            );
            assert_eq!(
                store.get("next_reset_date").unwrap(),
                Some("2024-10-31T00:00:00Z".to_string())
            );
        }
    }
}
