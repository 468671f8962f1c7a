use super::CalendarMonth;
use crate::dates::iter_days_before;
use crate::period::DateRange;
use std::iter::FusedIterator;
use time::Date;

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Six weeks of seven days, enough to show any month starting on any weekday
pub(crate) const GRID_CELLS: usize = 6 * DAYS_IN_WEEK;

/// One cell of a rendered month grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) date: Date,
    /// The day belongs to the previous or next month and is only shown to
    /// pad out the grid
    pub(crate) is_outside_current_month: bool,
    pub(crate) is_today: bool,
    pub(crate) is_selected: bool,
    pub(crate) is_in_range: bool,
}

/// Lazily produces the [`GRID_CELLS`] days of a month grid, row by row,
/// starting on the Sunday on or before the first of the month.  Clone it to
/// walk the grid again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    month: CalendarMonth,
    today: Date,
    selected: Option<Date>,
    highlighted: Option<DateRange>,
    next_date: Option<Date>,
    remaining: usize,
}

impl MonthGrid {
    pub(crate) fn new(
        month: CalendarMonth,
        today: Date,
        selected: Option<Date>,
        highlighted: Option<DateRange>,
    ) -> MonthGrid {
        let first = month.first_day();
        let lead = usize::from(first.weekday().number_days_from_sunday());
        let next_date = if lead == 0 {
            Some(first)
        } else {
            iter_days_before(first).nth(lead - 1)
        };
        MonthGrid {
            month,
            today,
            selected,
            highlighted,
            next_date,
            remaining: if next_date.is_some() { GRID_CELLS } else { 0 },
        }
    }

    fn day(&self, date: Date) -> CalendarDay {
        let is_outside_current_month = !self.month.contains(date);
        let is_bound = self.highlighted.is_some_and(|r| r.is_bound(date));
        CalendarDay {
            date,
            is_outside_current_month,
            is_today: !is_outside_current_month && date == self.today,
            is_selected: is_bound || self.selected == Some(date),
            is_in_range: self.highlighted.is_some_and(|r| r.strictly_contains(date)),
        }
    }
}

impl Iterator for MonthGrid {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<CalendarDay> {
        if self.remaining == 0 {
            return None;
        }
        let date = self.next_date?;
        self.remaining -= 1;
        self.next_date = date.next_day();
        if self.next_date.is_none() {
            // Ran into the end of time
            self.remaining = 0;
        }
        Some(self.day(date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for MonthGrid {}
