//! User record storage - trait definitions and sqlite implementation.

pub mod records;
pub mod sqlite;
pub mod traits;

pub use records::{ScoreUpdate, UserRecord};
pub use sqlite::ScoreStore;
pub use traits::UserDirectory;
