use super::{CalendarDay, CalendarView, Direction};
use crate::theme::{
    calendar::{
        CURSOR_MODIFIER, OUTSIDE_STYLE, RANGE_STYLE, SELECTED_STYLE, TODAY_MODIFIER,
    },
    BASE_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use time::Date;

static HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa ";

/// Number of columns per day of week, including the gap after it
const DAY_WIDTH: u16 = 5;

const DAYS_PER_ROW: u16 = 7;

/// Width of the calendar in columns
pub(crate) const MAIN_WIDTH: u16 = 34;

/// Lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

const WEEK_ROWS: u16 = 6;

/// Total height of the calendar in lines
pub(crate) const MAIN_HEIGHT: u16 = HEADER_LINES + WEEK_ROWS;

const ACS_HLINE: char = '─';
const PREV_ARROW: &str = "◀";
const NEXT_ARROW: &str = "▶";

/// Draws the displayed month of a [`CalendarView`], marking the keyboard
/// cursor if there is one
#[derive(Clone, Copy, Debug)]
pub(crate) struct MonthCalendar<'a> {
    view: &'a CalendarView,
    cursor: Option<Date>,
}

impl<'a> MonthCalendar<'a> {
    pub(crate) fn new(view: &'a CalendarView) -> Self {
        MonthCalendar { view, cursor: None }
    }

    pub(crate) fn cursor(mut self, date: Date) -> Self {
        self.cursor = Some(date);
        self
    }

    fn day_style(&self, day: &CalendarDay) -> Style {
        let mut style = BASE_STYLE;
        if day.is_outside_current_month {
            style = style.patch(OUTSIDE_STYLE);
        }
        if day.is_in_range {
            style = style.patch(RANGE_STYLE);
        }
        if day.is_selected {
            style = style.patch(SELECTED_STYLE);
        }
        if day.is_today {
            style = style.add_modifier(TODAY_MODIFIER);
        }
        if self.cursor == Some(day.date) {
            style = style.add_modifier(CURSOR_MODIFIER);
        }
        style
    }
}

impl Widget for MonthCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: area.width.saturating_sub(left).min(MAIN_WIDTH),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(
            &self.view.displayed_month().to_string(),
            self.view.can_navigate(Direction::Previous),
            self.view.can_navigate(Direction::Next),
        );
        canvas.draw_header();
        let grid = self.view.render(self.view.displayed_index());
        for (i, day) in std::iter::zip(0u16.., grid.into_iter().flatten()) {
            let week_no = i / DAYS_PER_ROW;
            let col = i % DAYS_PER_ROW;
            let s = if day.is_today {
                format!("[{:2}]", day.date.day())
            } else {
                format!(" {:2} ", day.date.day())
            };
            canvas.draw_day(week_no, col, s, self.day_style(&day));
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str, has_prev: bool, has_next: bool) {
        let width = u16::try_from(title.chars().count()).unwrap_or(MAIN_WIDTH);
        self.mvprint(0, MAIN_WIDTH.saturating_sub(width) / 2, title, TITLE_STYLE);
        if has_prev {
            self.mvprint(0, 0, PREV_ARROW, TITLE_STYLE);
        }
        if has_next {
            self.mvprint(0, MAIN_WIDTH - 1, NEXT_ARROW, TITLE_STYLE);
        }
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, WEEKDAY_STYLE);
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, s: String, style: Style) {
        self.mvprint(HEADER_LINES + week_no, DAY_WIDTH * col, s, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}
