use crate::api::{FetchPayload, FetchRequest, Fetcher};
use crate::calendar::{CalendarView, Direction, MonthCalendar, MAIN_HEIGHT, MAIN_WIDTH};
use crate::custom::{CustomRange, CustomRangeInput, CustomRangeOutput, CustomRangeState};
use crate::dates::{format_ymd, same_day_in_month, Clock};
use crate::events::{event_channel, DashboardEvent};
use crate::help::Help;
use crate::period::{PeriodResolver, PeriodToken, TokenOutcome};
use crate::summary::{SummaryPanel, SummaryState};
use crate::theme::{
    periods::{ACTIVE_STYLE, KEY_STYLE},
    BASE_STYLE, ERROR_STYLE, STATUS_STYLE,
};
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;
use time::{Date, Duration as DateDuration};
use tracing::{debug, warn};

/// How long to wait for input before checking for finished fetches
const TICK: Duration = Duration::from_millis(100);

const CONNECTED: &str = "Connected to server";

/// Lines in the period panel: one per token, the highlighted range, and the
/// selected date, inside a border
const PERIOD_PANEL_HEIGHT: u16 = 12;

#[derive(Debug)]
pub(crate) struct App {
    resolver: PeriodResolver,
    calendar: CalendarView,
    events: Receiver<DashboardEvent>,
    fetcher: Fetcher,
    cursor: Date,
    summary: SummaryState,
    // The most recent summary request and its heading, for refreshing
    last_request: Option<(FetchRequest, String)>,
    status: Status,
    state: AppState,
}

impl App {
    pub(crate) fn new(clock: Clock, fetcher: Fetcher, initial_period: PeriodToken) -> App {
        let (tx, rx) = event_channel();
        let resolver = PeriodResolver::new(clock, tx.clone());
        let calendar = CalendarView::new(clock, tx);
        let online = fetcher.is_online();
        let mut app = App {
            resolver,
            calendar,
            events: rx,
            fetcher,
            cursor: clock.today(),
            summary: SummaryState::Offline,
            last_request: None,
            status: Status::info(if online {
                "Checking server…"
            } else {
                "Offline"
            }),
            state: AppState::Dashboard,
        };
        app.fetcher.request(FetchRequest::Health);
        if app.resolver.select_token(initial_period) == TokenOutcome::AwaitingCustomBounds {
            // Configuration validation should rule this out
            warn!("initial period cannot be custom; using today");
            app.resolver.select_token(PeriodToken::Today);
        }
        app.process_events();
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            if poll(TICK)? {
                self.handle_input()?;
            }
            self.process_events();
            self.poll_fetcher();
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Dashboard => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Char('p' | '[') | KeyCode::PageUp => self.navigate(Direction::Previous),
                KeyCode::Char('n' | ']') | KeyCode::PageDown => self.navigate(Direction::Next),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.calendar.jump_to_current_month();
                    self.cursor = self.calendar.today();
                    true
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.calendar.select_date(self.cursor);
                    true
                }
                KeyCode::Char(c @ '1'..='7') => {
                    let Some(token) = c
                        .to_digit(10)
                        .and_then(|d| usize::try_from(d).ok())
                        .and_then(|d| PeriodToken::ALL.get(d - 1).copied())
                    else {
                        return false;
                    };
                    self.resolver.select_token(token);
                    true
                }
                KeyCode::Char('8' | 'c') => self.open_custom(),
                KeyCode::Char('r') => self.refresh(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Dashboard;
                true
            }
            AppState::Custom(state) => {
                if key == KeyCode::Esc {
                    self.resolver.cancel_custom();
                    self.state = AppState::Dashboard;
                    return true;
                }
                let output = match key {
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => state.handle_input(CustomRangeInput::Digit(d)),
                        None => CustomRangeOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(CustomRangeInput::Backspace)
                    }
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        state.handle_input(CustomRangeInput::SwitchField)
                    }
                    KeyCode::Enter => state.handle_input(CustomRangeInput::Enter),
                    _ => CustomRangeOutput::Invalid,
                };
                match output {
                    CustomRangeOutput::Ok => true,
                    CustomRangeOutput::Invalid => false,
                    CustomRangeOutput::Submit { start, end } => {
                        match self.resolver.confirm_custom(start, end) {
                            Ok(_) => {
                                self.state = AppState::Dashboard;
                                true
                            }
                            Err(e) => {
                                debug!(error = %e, "rejected custom period");
                                state.set_error(e.to_string());
                                false
                            }
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    /// Moves the cursor by `days`, following it to another month if needed.
    /// Fails if the cursor would leave the calendar's window.
    fn move_cursor(&mut self, days: i64) -> bool {
        let Some(date) = self.cursor.checked_add(DateDuration::days(days)) else {
            return false;
        };
        if self.calendar.show_month_containing(date) {
            self.cursor = date;
            true
        } else {
            false
        }
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        if self.calendar.navigate(direction) {
            self.cursor =
                same_day_in_month(self.cursor, self.calendar.displayed_month().first_day());
            true
        } else {
            false
        }
    }

    fn open_custom(&mut self) -> bool {
        match self.resolver.select_token(PeriodToken::Custom) {
            TokenOutcome::AwaitingCustomBounds => {
                self.state = AppState::Custom(CustomRangeState::new(self.resolver.custom_prefill()));
                true
            }
            TokenOutcome::Resolved(_) => false,
        }
    }

    fn refresh(&mut self) -> bool {
        match self.last_request.clone() {
            Some((request, heading)) => self.fetch(request, heading),
            None => false,
        }
    }

    /// Reacts to selections made by the period resolver and the calendar
    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                DashboardEvent::PeriodSelected(selection) => {
                    self.calendar.highlight_range(Some(selection.range));
                    self.fetch(
                        FetchRequest::Period(selection),
                        format!("{}: {}", selection.label(), selection.range),
                    );
                }
                DashboardEvent::DateSelected { date, formatted } => {
                    self.fetch(FetchRequest::Date(date), formatted);
                }
            }
        }
    }

    fn fetch(&mut self, request: FetchRequest, heading: String) -> bool {
        self.last_request = Some((request, heading.clone()));
        if self.fetcher.request(request).is_some() {
            self.summary = SummaryState::Loading { heading };
            true
        } else {
            false
        }
    }

    fn poll_fetcher(&mut self) {
        while let Some(outcome) = self.fetcher.poll() {
            match (outcome.request, outcome.result) {
                (_, Ok(FetchPayload::Health)) => {
                    // A late health check doesn't hide a failed fetch
                    if !self.status.is_error {
                        self.status = Status::info(CONNECTED);
                    }
                }
                (FetchRequest::Health, Err(e)) => {
                    warn!(error = %e, "health check failed");
                    self.status = Status::error(format!("Server unavailable: {e}"));
                }
                (_, Ok(FetchPayload::Date(report))) => {
                    self.status = Status::info(CONNECTED);
                    self.summary = SummaryState::Date(report);
                }
                (_, Ok(FetchPayload::Period(report))) => {
                    self.status = Status::info(CONNECTED);
                    self.summary = SummaryState::Period(report);
                }
                (request, Err(e)) => {
                    warn!(?request, error = %e, "fetch failed");
                    let heading = self
                        .last_request
                        .as_ref()
                        .map(|(_, h)| h.clone())
                        .unwrap_or_default();
                    self.status = Status::error(format!("Failed to load summary: {e}"));
                    self.summary = SummaryState::Failed {
                        heading,
                        message: e.to_string(),
                    };
                }
            }
        }
    }

    fn period_lines(&self) -> Vec<Line<'static>> {
        let active = self.resolver.active_selection();
        let mut lines = std::iter::zip(1.., PeriodToken::ALL)
            .map(|(key, token)| {
                let is_active = if self.resolver.awaiting_custom() {
                    token == PeriodToken::Custom
                } else {
                    token == active.token
                };
                let marker = if is_active { "▸ " } else { "  " };
                let style = if is_active { ACTIVE_STYLE } else { BASE_STYLE };
                Line::from(vec![
                    Span::styled(format!("{key}"), KEY_STYLE),
                    Span::styled(format!(" {marker}{}", token.label()), style),
                ])
            })
            .collect::<Vec<_>>();
        if let Some(range) = self.calendar.highlighted_range() {
            lines.push(Line::styled(format!("  {range}"), STATUS_STYLE));
        }
        if let Some(date) = self.calendar.selected_date() {
            lines.push(Line::styled(
                format!("  Date: {}", format_ymd(date)),
                STATUS_STYLE,
            ));
        }
        lines
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [cal_area, side_area] =
            Layout::horizontal([Constraint::Length(MAIN_WIDTH + 2), Constraint::Min(0)])
                .areas(main_area);
        let [cal_area, _] =
            Layout::vertical([Constraint::Length(MAIN_HEIGHT + 2), Constraint::Min(0)])
                .areas(cal_area);
        let cal_block = Block::bordered().title(format!(
            " Calendar {}/{} ",
            self.calendar.displayed_index() + 1,
            self.calendar.months().len()
        ));
        let cal_inner = cal_block.inner(cal_area);
        cal_block.render(cal_area, buf);
        MonthCalendar::new(&self.calendar)
            .cursor(self.cursor)
            .render(cal_inner, buf);

        let [period_area, summary_area] = Layout::vertical([
            Constraint::Length(PERIOD_PANEL_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(side_area);
        Paragraph::new(self.period_lines())
            .block(Block::bordered().title(" Period "))
            .render(period_area, buf);
        SummaryPanel(&self.summary).render(summary_area, buf);

        let status_style = if self.status.is_error {
            ERROR_STYLE
        } else {
            STATUS_STYLE
        };
        Line::from(vec![
            Span::styled(self.status.text.clone(), status_style),
            Span::styled("   ? for help", STATUS_STYLE),
        ])
        .render(status_area, buf);

        match self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Custom(ref mut state) => CustomRange.render(area, buf, state),
            AppState::Dashboard | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Status {
    text: String,
    is_error: bool,
}

impl Status {
    fn info<S: Into<String>>(text: S) -> Status {
        Status {
            text: text.into(),
            is_error: false,
        }
    }

    fn error<S: Into<String>>(text: S) -> Status {
        Status {
            text: text.into(),
            is_error: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Dashboard,
    Helping,
    Custom(CustomRangeState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FakeSource;
    use crate::period::DateRange;
    use std::sync::Arc;
    use std::thread::sleep;
    use std::time::Instant;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 15);

    fn offline_app() -> App {
        App::new(Clock::Fixed(TODAY), Fetcher::offline(), PeriodToken::Today)
    }

    fn online_app() -> App {
        App::new(
            Clock::Fixed(TODAY),
            Fetcher::new(Arc::new(FakeSource)),
            PeriodToken::Today,
        )
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        let r = app.handle_key(key);
        app.process_events();
        r
    }

    fn type_keys(app: &mut App, s: &str) {
        for c in s.chars() {
            assert!(press(app, KeyCode::Char(c)), "key {c:?} was rejected");
        }
    }

    /// Polls the fetcher until the summary satisfies `pred`
    fn wait_for_summary<F: Fn(&SummaryState) -> bool>(app: &mut App, pred: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.poll_fetcher();
            if pred(&app.summary) {
                return;
            }
            assert!(Instant::now() < deadline, "summary never arrived: {:?}", app.summary);
            sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_initial_state() {
        let app = offline_app();
        assert_eq!(app.cursor, TODAY);
        assert_eq!(app.resolver.active_selection().token, PeriodToken::Today);
        assert_eq!(
            app.calendar.highlighted_range(),
            Some(DateRange::single(TODAY))
        );
        assert_eq!(app.summary, SummaryState::Offline);
        assert_eq!(app.status, Status::info("Offline"));
    }

    #[test]
    fn test_number_keys_select_presets() {
        let mut app = offline_app();
        let expected = [
            (KeyCode::Char('1'), PeriodToken::Today, TODAY),
            (KeyCode::Char('2'), PeriodToken::Week, date!(2024 - 03 - 09)),
            (KeyCode::Char('3'), PeriodToken::Month, date!(2024 - 02 - 15)),
            (KeyCode::Char('4'), PeriodToken::Quarter, date!(2023 - 12 - 15)),
            (KeyCode::Char('5'), PeriodToken::HalfYear, date!(2023 - 09 - 15)),
            (KeyCode::Char('6'), PeriodToken::NineMonths, date!(2023 - 06 - 15)),
            (KeyCode::Char('7'), PeriodToken::Year, date!(2023 - 03 - 15)),
        ];
        for (key, token, start) in expected {
            assert!(press(&mut app, key));
            let active = app.resolver.active_selection();
            assert_eq!(active.token, token);
            assert_eq!(active.range, DateRange::new(start, TODAY).unwrap());
            assert_eq!(app.calendar.highlighted_range(), Some(active.range));
        }
        assert!(!press(&mut app, KeyCode::Char('9')));
    }

    #[test]
    fn test_custom_confirm() {
        let mut app = offline_app();
        assert!(press(&mut app, KeyCode::Char('c')));
        assert!(matches!(app.state, AppState::Custom(_)));
        assert!(app.resolver.awaiting_custom());
        // Pre-filled with today; typing replaces each date in turn
        type_keys(&mut app, "2024030120240310");
        assert!(press(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Dashboard);
        let active = app.resolver.active_selection();
        assert_eq!(active.token, PeriodToken::Custom);
        let range = DateRange::new(date!(2024 - 03 - 01), date!(2024 - 03 - 10)).unwrap();
        assert_eq!(active.range, range);
        assert_eq!(app.calendar.highlighted_range(), Some(range));
        // Reopening starts from the last custom range
        assert!(press(&mut app, KeyCode::Char('8')));
        let AppState::Custom(ref state) = app.state else {
            panic!("custom dialog should be open");
        };
        assert_eq!(*state, CustomRangeState::new(range));
    }

    #[test]
    fn test_custom_inverted_is_rejected() {
        let mut app = offline_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('c'));
        type_keys(&mut app, "2024031020240301");
        assert!(!press(&mut app, KeyCode::Enter));
        assert!(matches!(app.state, AppState::Custom(_)));
        assert_eq!(app.resolver.active_selection().token, PeriodToken::Week);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let shown = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol())
            .collect::<String>();
        // The message is wrapped to fit the dialog
        assert!(
            shown.contains("start date 2024-03-10 is after"),
            "error message should be shown in the dialog"
        );
        assert!(
            shown.contains("end date 2024-03-01"),
            "error message should be shown in the dialog"
        );
    }

    #[test]
    fn test_custom_escape_cancels_and_reemits() {
        let mut app = online_app();
        press(&mut app, KeyCode::Char('2'));
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Period(_)));
        press(&mut app, KeyCode::Char('c'));
        assert!(press(&mut app, KeyCode::Esc));
        assert_eq!(app.state, AppState::Dashboard);
        assert!(!app.resolver.awaiting_custom());
        assert_eq!(app.resolver.active_selection().token, PeriodToken::Week);
        // The re-announced week triggered a fresh fetch
        assert_eq!(
            app.summary,
            SummaryState::Loading {
                heading: String::from("1 Week: 2024-03-09 ~ 2024-03-15")
            }
        );
    }

    #[test]
    fn test_cursor_movement() {
        let mut app = offline_app();
        assert!(press(&mut app, KeyCode::Left));
        assert_eq!(app.cursor, date!(2024 - 03 - 14));
        assert!(press(&mut app, KeyCode::Char('k')));
        assert!(press(&mut app, KeyCode::Char('k')));
        assert_eq!(app.cursor, date!(2024 - 02 - 29));
        assert_eq!(app.calendar.displayed_month().to_string(), "February 2024");
        assert!(press(&mut app, KeyCode::PageDown));
        assert_eq!(app.cursor, date!(2024 - 03 - 29));
        assert!(!press(&mut app, KeyCode::PageDown));
        assert!(press(&mut app, KeyCode::Home));
        assert_eq!(app.cursor, TODAY);
        assert_eq!(app.calendar.displayed_index(), 11);
    }

    #[test]
    fn test_cursor_stays_in_window() {
        let mut app = offline_app();
        while press(&mut app, KeyCode::PageUp) {}
        assert_eq!(app.calendar.displayed_month().to_string(), "April 2023");
        assert_eq!(app.cursor, date!(2023 - 04 - 15));
        while press(&mut app, KeyCode::Up) {}
        assert_eq!(app.cursor, date!(2023 - 04 - 01));
        assert!(!press(&mut app, KeyCode::Left));
        assert_eq!(app.cursor, date!(2023 - 04 - 01));
    }

    #[test]
    fn test_select_date_fetches_summary() {
        let mut app = online_app();
        press(&mut app, KeyCode::Left);
        assert!(press(&mut app, KeyCode::Enter));
        assert_eq!(app.calendar.selected_date(), Some(date!(2024 - 03 - 14)));
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Date(_)));
        let SummaryState::Date(ref report) = app.summary else {
            unreachable!();
        };
        assert_eq!(report.date, date!(2024 - 03 - 14));
    }

    #[test]
    fn test_stale_fetch_ignored() {
        let mut app = online_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Period(_)));
        // Whenever the date summary finishes, it must not replace the
        // newer period summary
        sleep(Duration::from_millis(50));
        app.poll_fetcher();
        let SummaryState::Period(ref report) = app.summary else {
            panic!("period summary was replaced: {:?}", app.summary);
        };
        assert_eq!(report.label, "1 Month");
    }

    #[test]
    fn test_fetch_failure_shown() {
        let mut app = App::new(
            Clock::Fixed(date!(1999 - 12 - 31)),
            Fetcher::new(Arc::new(FakeSource)),
            PeriodToken::Today,
        );
        press(&mut app, KeyCode::Enter);
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Failed { .. }));
        let SummaryState::Failed { ref heading, .. } = app.summary else {
            unreachable!();
        };
        assert_eq!(heading, "1999-12-31");
    }

    #[test]
    fn test_success_clears_failure_status() {
        let mut app = App::new(
            Clock::Fixed(date!(1999 - 12 - 31)),
            Fetcher::new(Arc::new(FakeSource)),
            PeriodToken::Today,
        );
        // Let the startup fetches land first
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.status != Status::info(CONNECTED)
            || !matches!(app.summary, SummaryState::Period(_))
        {
            assert!(Instant::now() < deadline, "startup fetches never finished");
            sleep(Duration::from_millis(5));
            app.poll_fetcher();
        }
        press(&mut app, KeyCode::Enter);
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Failed { .. }));
        assert!(app.status.is_error);
        press(&mut app, KeyCode::Char('2'));
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Period(_)));
        assert_eq!(app.status, Status::info("Connected to server"));
    }

    #[test]
    fn test_refresh() {
        let mut app = offline_app();
        assert!(!press(&mut app, KeyCode::Char('r')));
        let mut app = online_app();
        wait_for_summary(&mut app, |s| matches!(s, SummaryState::Period(_)));
        assert!(press(&mut app, KeyCode::Char('r')));
        assert!(matches!(app.summary, SummaryState::Loading { .. }));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = offline_app();
        assert!(press(&mut app, KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(press(&mut app, KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Dashboard);
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_render() {
        let mut app = offline_app();
        press(&mut app, KeyCode::Char('2'));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert!(rows[0].starts_with("┌ Calendar 12/12 "));
        assert!(rows[0].contains("┌ Period "));
        assert!(rows[1].contains("March 2024"));
        assert!(rows[2].contains("2 ▸ 1 Week"));
        assert!(rows[9].contains("2024-03-09 ~ 2024-03-15"));
        assert!(rows[12].contains("┌ Summary "));
        assert!(rows[13].contains("Offline"));
        assert!(rows[23].starts_with("Offline   ? for help"));
    }
}
