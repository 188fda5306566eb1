//! Date helpers for case records.
//!
//! The backend sends case dates either as plain `YYYY-MM-DD` or as full
//! RFC 3339 timestamps. Everything shown to the user is resolved to the
//! calendar day in Asia/Jakarta (UTC+7, no DST) and rendered in Indonesian.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike, Utc,
};
use std::cmp::Ordering;

/// Asia/Jakarta offset from UTC, in seconds.
const JAKARTA_OFFSET_SECS: i32 = 7 * 3600;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

// chrono numbers weekdays from Monday.
const WEEKDAYS: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

// =========================================================
// Parsing
// =========================================================

/// Resolves a backend date string to a Jakarta calendar day.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_case_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(jakarta_date(instant));
    }

    // Offset-less timestamps are taken as already local.
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(local.date());
    }

    raw.split_once('T')
        .and_then(|(day, _)| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

/// UTC+7, no DST.
pub fn jakarta() -> FixedOffset {
    FixedOffset::east_opt(JAKARTA_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Calendar day of an instant as seen in Jakarta.
pub fn jakarta_date<Tz: TimeZone>(instant: DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&jakarta()).date_naive()
}

/// Wall-clock time in Jakarta.
pub fn now_in_jakarta() -> NaiveDateTime {
    Utc::now().with_timezone(&jakarta()).naive_local()
}

pub fn today_in_jakarta() -> NaiveDate {
    now_in_jakarta().date()
}

// =========================================================
// Formatting
// =========================================================

/// `1 Januari 2024`
pub fn format_long(day: NaiveDate) -> String {
    format!(
        "{} {} {}",
        day.day(),
        MONTHS[day.month0() as usize],
        day.year()
    )
}

/// `Senin, 1 Januari 2024`
pub fn format_with_weekday(day: NaiveDate) -> String {
    format!(
        "{}, {}",
        WEEKDAYS[day.weekday().num_days_from_monday() as usize],
        format_long(day)
    )
}

/// Display form of a case date. Unparseable input is shown as-is.
pub fn format_case_date(raw: &str) -> String {
    match parse_case_date(raw) {
        Some(day) => format_long(day),
        None => raw.trim().to_string(),
    }
}

/// Value for an `<input type="date">`.
pub fn date_for_input(raw: &str) -> String {
    match parse_case_date(raw) {
        Some(day) => day.format("%Y-%m-%d").to_string(),
        None => raw.split('T').next().unwrap_or_default().to_string(),
    }
}

/// `14.05.09`, the clock style used by the schedule board.
pub fn format_clock(time: NaiveTime) -> String {
    format!(
        "{:02}.{:02}.{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

// =========================================================
// Schedule
// =========================================================

/// Where a hearing sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleStatus {
    Finished,
    Today,
    Upcoming,
}

impl ScheduleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleStatus::Finished => "Selesai",
            ScheduleStatus::Today => "Hari Ini",
            ScheduleStatus::Upcoming => "Mendatang",
        }
    }

    /// daisyUI badge class.
    pub fn badge_class(&self) -> &'static str {
        match self {
            ScheduleStatus::Finished => "badge badge-ghost",
            ScheduleStatus::Today => "badge badge-success",
            ScheduleStatus::Upcoming => "badge badge-info",
        }
    }
}

/// Status of a hearing date. Unparseable dates count as upcoming.
pub fn schedule_status(raw: &str, today: NaiveDate) -> ScheduleStatus {
    match parse_case_date(raw) {
        Some(day) => match day.cmp(&today) {
            Ordering::Less => ScheduleStatus::Finished,
            Ordering::Equal => ScheduleStatus::Today,
            Ordering::Greater => ScheduleStatus::Upcoming,
        },
        None => ScheduleStatus::Upcoming,
    }
}

/// Stable ascending sort by date; records without a usable date go last.
pub fn sort_by_date<T>(items: &mut [T], date_of: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| match parse_case_date(date_of(item)) {
        Some(day) => (false, day),
        None => (true, NaiveDate::MIN),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_in_indonesian() {
        assert_eq!(format_long(day(2024, 1, 1)), "1 Januari 2024");
        assert_eq!(format_long(day(2023, 12, 25)), "25 Desember 2023");
        assert_eq!(format_with_weekday(day(2024, 1, 1)), "Senin, 1 Januari 2024");
        assert_eq!(format_with_weekday(day(2024, 3, 17)), "Minggu, 17 Maret 2024");
    }

    #[test]
    fn utc_timestamps_resolve_to_the_jakarta_day() {
        // 18:30 UTC is already the next morning in Jakarta.
        assert_eq!(parse_case_date("2024-01-01T18:30:00Z"), Some(day(2024, 1, 2)));
        assert_eq!(parse_case_date("2024-01-01T10:00:00.000Z"), Some(day(2024, 1, 1)));
        assert_eq!(parse_case_date("2024-01-01"), Some(day(2024, 1, 1)));
        assert_eq!(parse_case_date("2024-01-01T08:00:00"), Some(day(2024, 1, 1)));
    }

    #[test]
    fn jakarta_is_seven_hours_ahead() {
        assert_eq!(jakarta().local_minus_utc(), 7 * 3600);

        let before_midnight = Utc.with_ymd_and_hms(2023, 12, 31, 16, 59, 59).unwrap();
        assert_eq!(jakarta_date(before_midnight), day(2023, 12, 31));
        let midnight = Utc.with_ymd_and_hms(2023, 12, 31, 17, 0, 0).unwrap();
        assert_eq!(jakarta_date(midnight), day(2024, 1, 1));

        // Offsets other than UTC go through the same conversion.
        let tokyo = DateTime::parse_from_rfc3339("2024-01-02T00:30:00+09:00").unwrap();
        assert_eq!(jakarta_date(tokyo), day(2024, 1, 1));
        assert_eq!(parse_case_date("2024-01-02T00:30:00+09:00"), Some(day(2024, 1, 1)));
    }

    #[test]
    fn unparseable_dates_are_echoed() {
        assert_eq!(format_case_date("besok"), "besok");
        assert_eq!(format_case_date(""), "");
        assert_eq!(format_case_date("2024-01-01"), "1 Januari 2024");
    }

    #[test]
    fn input_value_drops_time_component() {
        assert_eq!(date_for_input("2024-05-06T17:00:00.000Z"), "2024-05-07");
        assert_eq!(date_for_input("2024-05-06"), "2024-05-06");
        assert_eq!(date_for_input("xx-yyTzz"), "xx-yy");
        assert_eq!(date_for_input(""), "");
    }

    #[test]
    fn schedule_status_is_relative_to_today() {
        let today = day(2024, 6, 10);
        assert_eq!(schedule_status("2024-06-09", today), ScheduleStatus::Finished);
        assert_eq!(schedule_status("2024-06-10", today), ScheduleStatus::Today);
        assert_eq!(schedule_status("2024-06-11", today), ScheduleStatus::Upcoming);
        assert_eq!(ScheduleStatus::Today.label(), "Hari Ini");
    }

    #[test]
    fn sort_puts_undated_rows_last() {
        let mut rows = vec!["2024-03-01", "", "2024-01-15", "2024-02-01T00:00:00Z"];
        sort_by_date(&mut rows, |r| *r);
        assert_eq!(rows, vec!["2024-01-15", "2024-02-01T00:00:00Z", "2024-03-01", ""]);
    }

    #[test]
    fn clock_uses_dotted_separators() {
        let t = NaiveTime::from_hms_opt(14, 5, 9).unwrap();
        assert_eq!(format_clock(t), "14.05.09");
    }
}
