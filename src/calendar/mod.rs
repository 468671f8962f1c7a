mod grid;
mod widget;
pub(crate) use self::grid::{CalendarDay, MonthGrid};
pub(crate) use self::widget::{MonthCalendar, MAIN_HEIGHT, MAIN_WIDTH};
use crate::dates::{first_of_month, format_ymd, iter_days_before, Clock};
use crate::events::{DashboardEvent, EventSender};
use crate::period::DateRange;
use std::fmt;
use std::iter::successors;
use time::{Date, Month};
use tracing::{debug, info};

/// Number of months in the calendar's window
pub(crate) const WINDOW_MONTHS: usize = 12;

/// A calendar month, identified by its year and month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarMonth {
    // Always the first day of the month
    first: Date,
}

impl CalendarMonth {
    pub(crate) fn containing(date: Date) -> CalendarMonth {
        CalendarMonth {
            first: first_of_month(date),
        }
    }

    pub(crate) fn year(&self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first.month()
    }

    pub(crate) fn first_day(&self) -> Date {
        self.first
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub(crate) fn previous(&self) -> Option<CalendarMonth> {
        iter_days_before(self.first)
            .next()
            .map(CalendarMonth::containing)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Previous,
    Next,
}

/// State of the month calendar: a fixed window of the twelve months ending
/// with the current one, which of them is on display, the single selected
/// date, and the highlighted period.
#[derive(Clone, Debug)]
pub(crate) struct CalendarView {
    clock: Clock,
    events: EventSender,
    // Invariant: nonempty, consecutive, and ends with the month that was
    // current at construction.  Only shorter than WINDOW_MONTHS at the
    // beginning of time.
    months: Vec<CalendarMonth>,
    displayed: usize,
    selected_date: Option<Date>,
    highlighted: Option<DateRange>,
}

impl CalendarView {
    /// Builds the window ending at the current month and displays the
    /// current month
    pub(crate) fn new(clock: Clock, events: EventSender) -> CalendarView {
        let current = CalendarMonth::containing(clock.today());
        let mut months = successors(Some(current), CalendarMonth::previous)
            .take(WINDOW_MONTHS)
            .collect::<Vec<_>>();
        months.reverse();
        let displayed = months.len() - 1;
        debug!(
            first = %months[0],
            last = %current,
            "initialized calendar window"
        );
        CalendarView {
            clock,
            events,
            months,
            displayed,
            selected_date: None,
            highlighted: None,
        }
    }

    pub(crate) fn months(&self) -> &[CalendarMonth] {
        &self.months
    }

    pub(crate) fn today(&self) -> Date {
        self.clock.today()
    }

    pub(crate) fn displayed_index(&self) -> usize {
        self.displayed
    }

    pub(crate) fn displayed_month(&self) -> CalendarMonth {
        self.months[self.displayed]
    }

    pub(crate) fn can_navigate(&self, direction: Direction) -> bool {
        match direction {
            Direction::Previous => self.displayed > 0,
            Direction::Next => self.displayed + 1 < self.months.len(),
        }
    }

    /// Renders the grid for the month at `index` in the window, or `None` if
    /// `index` is out of bounds
    pub(crate) fn render(&self, index: usize) -> Option<MonthGrid> {
        let month = *self.months.get(index)?;
        Some(MonthGrid::new(
            month,
            self.clock.today(),
            self.selected_date,
            self.highlighted,
        ))
    }

    /// Moves one month within the window.  Returns `false`, leaving the
    /// display unchanged, if already at that end of the window.
    pub(crate) fn navigate(&mut self, direction: Direction) -> bool {
        if !self.can_navigate(direction) {
            return false;
        }
        match direction {
            Direction::Previous => self.displayed -= 1,
            Direction::Next => self.displayed += 1,
        }
        debug!(month = %self.displayed_month(), "navigated calendar");
        true
    }

    pub(crate) fn jump_to_current_month(&mut self) {
        self.displayed = self.months.len() - 1;
    }

    /// Returns the position in the window of the month containing `date`
    pub(crate) fn index_of(&self, date: Date) -> Option<usize> {
        self.months.iter().position(|m| m.contains(date))
    }

    /// Displays the month containing `date`.  Returns `false` if that month
    /// is outside the window.
    pub(crate) fn show_month_containing(&mut self, date: Date) -> bool {
        match self.index_of(date) {
            Some(i) => {
                self.displayed = i;
                true
            }
            None => false,
        }
    }

    pub(crate) fn select_date(&mut self, date: Date) {
        let formatted = format_ymd(date);
        info!(date = %formatted, "date selected");
        self.selected_date = Some(date);
        self.events
            .emit(DashboardEvent::DateSelected { date, formatted });
    }

    pub(crate) fn selected_date(&self) -> Option<Date> {
        self.selected_date
    }

    /// Highlights `range`, or removes all highlighting if `None`.  Like a
    /// fresh paint of the grid, this also drops the single-date selection.
    pub(crate) fn highlight_range(&mut self, range: Option<DateRange>) {
        self.selected_date = None;
        self.highlighted = range;
    }

    pub(crate) fn highlighted_range(&self) -> Option<DateRange> {
        self.highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel;
    use std::sync::mpsc::Receiver;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 15);

    fn view() -> (CalendarView, Receiver<DashboardEvent>) {
        let (tx, rx) = event_channel();
        (CalendarView::new(Clock::Fixed(TODAY), tx), rx)
    }

    #[test]
    fn test_window() {
        let (view, _rx) = view();
        let months = view
            .months()
            .iter()
            .map(|m| (m.year(), m.month()))
            .collect::<Vec<_>>();
        assert_eq!(
            months,
            [
                (2023, Month::April),
                (2023, Month::May),
                (2023, Month::June),
                (2023, Month::July),
                (2023, Month::August),
                (2023, Month::September),
                (2023, Month::October),
                (2023, Month::November),
                (2023, Month::December),
                (2024, Month::January),
                (2024, Month::February),
                (2024, Month::March),
            ]
        );
        assert_eq!(view.displayed_index(), 11);
        assert_eq!(view.displayed_month().to_string(), "March 2024");
    }

    #[test]
    fn test_window_in_january() {
        let (tx, _rx) = event_channel();
        let view = CalendarView::new(Clock::Fixed(date!(2025 - 01 - 22)), tx);
        assert_eq!(view.months().len(), WINDOW_MONTHS);
        assert_eq!(view.months()[0].to_string(), "February 2024");
        assert_eq!(view.months()[11].to_string(), "January 2025");
    }

    #[test]
    fn test_render_every_month() {
        let (view, _rx) = view();
        for i in 0..WINDOW_MONTHS {
            let days = view.render(i).unwrap().collect::<Vec<_>>();
            assert_eq!(days.len(), 42);
            let todays = days.iter().filter(|d| d.is_today).count();
            assert_eq!(todays, usize::from(i == 11), "today count for month {i}");
        }
        assert!(view.render(WINDOW_MONTHS).is_none());
    }

    #[test]
    fn test_navigate_bounds() {
        let (mut view, _rx) = view();
        assert!(!view.navigate(Direction::Next));
        assert_eq!(view.displayed_index(), 11);
        for i in (0..11).rev() {
            assert!(view.navigate(Direction::Previous));
            assert_eq!(view.displayed_index(), i);
        }
        assert!(!view.navigate(Direction::Previous));
        assert!(!view.navigate(Direction::Previous));
        assert_eq!(view.displayed_index(), 0);
        assert_eq!(view.displayed_month().to_string(), "April 2023");
        assert!(view.navigate(Direction::Next));
        assert_eq!(view.displayed_index(), 1);
        view.jump_to_current_month();
        assert_eq!(view.displayed_index(), 11);
    }

    #[test]
    fn test_show_month_containing() {
        let (mut view, _rx) = view();
        assert!(view.show_month_containing(date!(2023 - 12 - 25)));
        assert_eq!(view.displayed_index(), 8);
        assert!(!view.show_month_containing(date!(2023 - 03 - 31)));
        assert!(!view.show_month_containing(date!(2024 - 04 - 01)));
        assert_eq!(view.displayed_index(), 8);
    }

    #[test]
    fn test_select_date() {
        let (mut view, rx) = view();
        let range = DateRange::new(date!(2024 - 03 - 09), TODAY).unwrap();
        view.highlight_range(Some(range));
        view.select_date(date!(2024 - 03 - 02));
        view.select_date(date!(2024 - 03 - 04));
        assert_eq!(view.selected_date(), Some(date!(2024 - 03 - 04)));
        assert_eq!(view.highlighted_range(), Some(range));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            [
                DashboardEvent::DateSelected {
                    date: date!(2024 - 03 - 02),
                    formatted: String::from("2024-03-02"),
                },
                DashboardEvent::DateSelected {
                    date: date!(2024 - 03 - 04),
                    formatted: String::from("2024-03-04"),
                },
            ]
        );
        let selected = view
            .render(view.displayed_index())
            .unwrap()
            .filter(|d| d.is_selected)
            .map(|d| d.date)
            .collect::<Vec<_>>();
        assert_eq!(
            selected,
            [date!(2024 - 03 - 04), date!(2024 - 03 - 09), TODAY]
        );
    }

    #[test]
    fn test_highlight_then_clear() {
        let (mut view, _rx) = view();
        view.select_date(date!(2024 - 03 - 20));
        view.highlight_range(Some(
            DateRange::new(date!(2024 - 02 - 15), TODAY).unwrap(),
        ));
        let days = view.render(11).unwrap().collect::<Vec<_>>();
        assert!(days.iter().any(|d| d.is_in_range));
        assert!(!days[0].is_selected);
        view.highlight_range(None);
        assert_eq!(view.selected_date(), None);
        for i in 0..WINDOW_MONTHS {
            assert!(view
                .render(i)
                .unwrap()
                .all(|d| !d.is_in_range && !d.is_selected));
        }
    }

    #[test]
    fn test_highlight_spans_months() {
        let (mut view, _rx) = view();
        view.highlight_range(Some(
            DateRange::new(date!(2024 - 02 - 15), TODAY).unwrap(),
        ));
        let feb = view.render(10).unwrap().collect::<Vec<_>>();
        let bound = feb
            .iter()
            .find(|d| d.date == date!(2024 - 02 - 15))
            .unwrap();
        assert!(bound.is_selected);
        assert!(feb
            .iter()
            .filter(|d| d.date > date!(2024 - 02 - 15))
            .all(|d| d.is_in_range));
    }
}
