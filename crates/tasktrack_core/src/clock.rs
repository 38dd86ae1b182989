use crate::error::AppError;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Stored timestamp shape, second precision: `2025-07-01T12:00:00`.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().to_offset(local_offset()).date()
}

pub fn now_timestamp() -> String {
    let now = OffsetDateTime::now_utc().to_offset(local_offset());
    format_timestamp(PrimitiveDateTime::new(now.date(), now.time()))
}

pub fn format_timestamp(value: PrimitiveDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        value.year(),
        u8::from(value.month()),
        value.day(),
        value.hour(),
        value.minute(),
        value.second()
    )
}

/// Parse a due date given as an ISO-8601 datetime or bare date, and
/// normalize it to the stored second-precision shape. A bare date
/// becomes midnight of that day; missing seconds become `:00`;
/// fractional seconds are truncated.
pub fn parse_due_date(raw: &str) -> Result<String, AppError> {
    let trimmed = strip_fractional_seconds(raw.trim());
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, TIMESTAMP_FORMAT) {
        return Ok(format_timestamp(parsed));
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(&format!("{trimmed}:00"), TIMESTAMP_FORMAT) {
        return Ok(format_timestamp(parsed));
    }
    if let Ok(parsed) = Date::parse(trimmed, DATE_FORMAT) {
        return Ok(format_timestamp(PrimitiveDateTime::new(parsed, Time::MIDNIGHT)));
    }
    Err(AppError::InvalidDate)
}

fn strip_fractional_seconds(raw: &str) -> &str {
    match raw.split_once('.') {
        Some((head, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => raw,
    }
}

/// The calendar day a stored due date falls on. `None` when the value
/// does not parse; callers treat that as "not overdue".
pub fn due_date_day(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, TIMESTAMP_FORMAT) {
        return Some(parsed.date());
    }
    Date::parse(trimmed, DATE_FORMAT).ok()
}

/// Strictly-before comparison on calendar days; time of day is ignored,
/// so a value due today is never in the past.
pub fn is_past_day(due_date: &str, today: Date) -> bool {
    due_date_day(due_date).is_some_and(|day| day < today)
}
