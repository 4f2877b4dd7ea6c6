//! Human-readable countdown formatting.

use chrono::TimeDelta;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// Format remaining time as `"{d}d {h}h {m}m {s}s"`.
///
/// Zero or negative remaining time renders as `"Time's up!"`.
pub fn format_remaining(remaining: TimeDelta) -> String {
    if remaining <= TimeDelta::zero() {
        return "Time's up!".to_string();
    }

    let total = remaining.num_seconds();
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    format!("{days}d {hours}h {minutes}m {seconds}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_remaining() {
        assert_eq!(format_remaining(TimeDelta::zero()), "Time's up!");
    }

    #[test]
    fn test_negative_remaining() {
        assert_eq!(format_remaining(TimeDelta::seconds(-5)), "Time's up!");
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(format_remaining(TimeDelta::seconds(42)), "0d 0h 0m 42s");
    }

    #[test]
    fn test_full_breakdown() {
        let remaining = TimeDelta::days(12) + TimeDelta::hours(3) + TimeDelta::minutes(4) + TimeDelta::seconds(5);
        assert_eq!(format_remaining(remaining), "12d 3h 4m 5s");
    }

    #[test]
    fn test_sub_second_rounds_down_to_times_up_boundary() {
        // 59.9 seconds truncates to 59s
        assert_eq!(format_remaining(TimeDelta::milliseconds(59_900)), "0d 0h 0m 59s");
    }

    #[test]
    fn test_sixty_days() {
        assert_eq!(format_remaining(TimeDelta::days(60)), "60d 0h 0m 0s");
    }
}
