//! Notification surface with timed auto-hide.
//!
//! Holds at most one user-visible message at a time. A posted message
//! stays visible for a fixed duration (6 seconds by default) and then
//! disappears on the next read.

use chrono::{DateTime, TimeDelta, Utc};

/// Default time a notification stays visible.
pub const DEFAULT_SHOW_DURATION_MS: u64 = 6_000;

/// Single-slot notification board with expiry.
#[derive(Debug)]
pub struct NoticeBoard {
    show_for: TimeDelta,
    current: Option<(String, DateTime<Utc>)>,
}

impl NoticeBoard {
    /// Create a board whose messages stay visible for `show_for`.
    pub fn new(show_for: TimeDelta) -> Self {
        Self {
            show_for,
            current: None,
        }
    }

    /// Post a message, replacing any message still showing.
    pub fn post(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.current = Some((message.into(), now + self.show_for));
    }

    /// The currently visible message, if its show window has not passed.
    /// Expired messages are cleared on read.
    pub fn current(&mut self, now: DateTime<Utc>) -> Option<&str> {
        if let Some((_, deadline)) = &self.current
            && *deadline <= now
        {
            self.current = None;
        }
        self.current.as_ref().map(|(message, _)| message.as_str())
    }

    /// Drop any visible message immediately.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(DEFAULT_SHOW_DURATION_MS as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_725_148_800 + secs, 0).unwrap()
    }

    #[test]
    fn test_empty_board() {
        let mut board = NoticeBoard::default();
        assert_eq!(board.current(at(0)), None);
    }

    #[test]
    fn test_posted_message_is_visible() {
        let mut board = NoticeBoard::default();
        board.post("Scores reset to 0", at(0));
        assert_eq!(board.current(at(1)), Some("Scores reset to 0"));
    }

    #[test]
    fn test_message_expires_after_show_duration() {
        let mut board = NoticeBoard::default();
        board.post("Scores reset to 0", at(0));
        assert_eq!(board.current(at(5)), Some("Scores reset to 0"));
        assert_eq!(board.current(at(6)), None);
    }

    #[test]
    fn test_post_replaces_visible_message() {
        let mut board = NoticeBoard::default();
        board.post("first", at(0));
        board.post("second", at(2));
        assert_eq!(board.current(at(3)), Some("second"));
        // Replacement restarts the show window
        assert_eq!(board.current(at(7)), Some("second"));
        assert_eq!(board.current(at(8)), None);
    }

    #[test]
    fn test_clear() {
        let mut board = NoticeBoard::default();
        board.post("message", at(0));
        board.clear();
        assert_eq!(board.current(at(1)), None);
    }

    #[test]
    fn test_custom_show_duration() {
        let mut board = NoticeBoard::new(TimeDelta::seconds(1));
        board.post("quick", at(0));
        assert_eq!(board.current(at(0)), Some("quick"));
        assert_eq!(board.current(at(1)), None);
    }
}
