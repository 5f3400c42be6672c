use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Zero out the time-of-day, keeping the calendar day.
pub fn truncate_to_day(t: NaiveDateTime) -> NaiveDateTime {
    t.date().and_time(NaiveTime::MIN)
}

/// Round the minute-of-hour to the nearest multiple of `quantum_minutes`,
/// zeroing seconds and subseconds. Ties round up, and a rounded minute of
/// 60 rolls over into the next hour.
pub fn round_to_quantum(t: NaiveDateTime, quantum_minutes: u32) -> NaiveDateTime {
    let hour_start =
        t.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(t.time().hour()));

    if quantum_minutes == 0 {
        return hour_start + Duration::minutes(i64::from(t.time().minute()));
    }

    let minute = t.time().minute();
    let rem = minute % quantum_minutes;
    let rounded = if rem * 2 >= quantum_minutes {
        minute - rem + quantum_minutes
    } else {
        minute - rem
    };

    hour_start + Duration::minutes(i64::from(rounded))
}

/// Whole calendar days from `a` to `b` (negative when `b` is earlier).
/// Both endpoints are truncated to their day first, so the time-of-day
/// never contributes a fractional day.
pub fn days_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    b.date().signed_duration_since(a.date()).num_days()
}

pub fn add_days(t: NaiveDateTime, n: i64) -> NaiveDateTime {
    t + Duration::days(n)
}

pub fn add_minutes(t: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    t + Duration::minutes(minutes)
}

pub fn add_millis(t: NaiveDateTime, ms: i64) -> NaiveDateTime {
    t + Duration::milliseconds(ms)
}

/// First day of the month `d` falls in.
pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d - Duration::days(i64::from(d.day0()))
}

/// Number of days in the month `d` falls in.
pub fn days_in_month(d: NaiveDate) -> u32 {
    let first = first_of_month(d);
    let next = first + Months::new(1);
    next.signed_duration_since(first).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn truncate_zeroes_time_of_day() {
        let t = dt(2024, 3, 5, 9, 42).with_second(13).unwrap();
        assert_eq!(truncate_to_day(t), dt(2024, 3, 5, 0, 0));
    }

    #[test]
    fn quantum_rounds_down_below_half() {
        assert_eq!(round_to_quantum(dt(2024, 3, 5, 9, 7), 15), dt(2024, 3, 5, 9, 0));
    }

    #[test]
    fn quantum_rounds_up_above_half() {
        assert_eq!(round_to_quantum(dt(2024, 3, 5, 9, 8), 15), dt(2024, 3, 5, 9, 15));
        assert_eq!(
            round_to_quantum(dt(2024, 3, 5, 9, 53), 15),
            dt(2024, 3, 5, 10, 0)
        );
    }

    #[test]
    fn quantum_tie_rounds_up() {
        // 30 min quantum, minute 15 is exactly halfway
        assert_eq!(
            round_to_quantum(dt(2024, 3, 5, 9, 15), 30),
            dt(2024, 3, 5, 9, 30)
        );
    }

    #[test]
    fn quantum_rollover_into_next_day() {
        assert_eq!(
            round_to_quantum(dt(2024, 3, 5, 23, 55), 15),
            dt(2024, 3, 6, 0, 0)
        );
    }

    #[test]
    fn quantum_zero_only_zeroes_seconds() {
        let t = dt(2024, 3, 5, 9, 42).with_second(59).unwrap();
        assert_eq!(round_to_quantum(t, 0), dt(2024, 3, 5, 9, 42));
    }

    #[test]
    fn days_between_ignores_time_of_day() {
        assert_eq!(days_between(dt(2024, 3, 5, 23, 0), dt(2024, 3, 6, 1, 0)), 1);
        assert_eq!(days_between(dt(2024, 3, 5, 9, 0), dt(2024, 3, 8, 9, 0)), 3);
    }

    #[test]
    fn days_between_can_be_negative() {
        assert_eq!(days_between(dt(2024, 3, 8, 0, 0), dt(2024, 3, 5, 12, 0)), -3);
    }

    #[test]
    fn add_days_crosses_month_boundary() {
        assert_eq!(add_days(dt(2024, 2, 28, 10, 0), 2), dt(2024, 3, 1, 10, 0));
    }

    #[test]
    fn add_millis_is_exact() {
        assert_eq!(
            add_millis(dt(2024, 3, 5, 9, 0), 60 * 60 * 1000),
            dt(2024, 3, 5, 10, 0)
        );
    }

    #[test]
    fn first_of_month_keeps_month() {
        assert_eq!(first_of_month(date(2024, 6, 15)), date(2024, 6, 1));
        assert_eq!(first_of_month(date(2024, 6, 1)), date(2024, 6, 1));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2023, 2, 10)), 28);
        assert_eq!(days_in_month(date(2024, 12, 31)), 31);
    }
}
