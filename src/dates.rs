use std::iter::successors;
use time::{
    format_description::FormatItem, macros::format_description, Date, Duration, Month,
    OffsetDateTime, UtcOffset,
};

/// The `YYYY-MM-DD` format used for display and on the wire
pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Source of "today".
///
/// The local UTC offset has to be captured before any other thread is
/// spawned, as `time` refuses to look it up in a multithreaded process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Clock {
    Fixed(Date),
    Local(UtcOffset),
}

impl Clock {
    pub(crate) fn local() -> Result<Clock, time::error::IndeterminateOffset> {
        UtcOffset::current_local_offset().map(Clock::Local)
    }

    pub(crate) fn today(&self) -> Date {
        match self {
            Clock::Fixed(date) => *date,
            Clock::Local(offset) => OffsetDateTime::now_utc().to_offset(*offset).date(),
        }
    }
}

pub(crate) fn format_ymd(date: Date) -> String {
    // Formatting into a String can't fail for a four-digit year
    date.format(YMD_FMT).unwrap_or_else(|_| date.to_string())
}

pub(crate) fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, YMD_FMT)
}

/// Returns the date `months` calendar months before `date`.  If the target
/// month is too short to contain `date`'s day, the last day of that month is
/// used instead (March 31 minus one month is February 28 or 29).
///
/// Returns `None` if the result would precede the earliest representable
/// date.
pub(crate) fn months_before(date: Date, months: u32) -> Option<Date> {
    let total = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1
        - i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u8::try_from(total.rem_euclid(12)).ok()?;
    let month = Month::January.nth_next(month0);
    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
}

pub(crate) fn days_before(date: Date, days: u16) -> Option<Date> {
    date.checked_sub(Duration::days(i64::from(days)))
}

pub(crate) fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

/// Returns the day in the month of `target` with the same day-of-month as
/// `date`, clamped to the length of that month
pub(crate) fn same_day_in_month(date: Date, target: Date) -> Date {
    (1..=date.day())
        .rev()
        .find_map(|day| target.replace_day(day).ok())
        .unwrap_or(target)
}

pub(crate) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
