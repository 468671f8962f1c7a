use crate::dates::{days_before, format_ymd, months_before, Clock};
use crate::events::{DashboardEvent, EventSender};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Date;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PeriodToken {
    Today,
    Week,
    Month,
    Quarter,
    HalfYear,
    NineMonths,
    Year,
    Custom,
}

/// How far before "today" a preset period begins
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Lookback {
    Days(u16),
    Months(u32),
}

impl PeriodToken {
    pub(crate) const ALL: [PeriodToken; 8] = [
        PeriodToken::Today,
        PeriodToken::Week,
        PeriodToken::Month,
        PeriodToken::Quarter,
        PeriodToken::HalfYear,
        PeriodToken::NineMonths,
        PeriodToken::Year,
        PeriodToken::Custom,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            PeriodToken::Today => "today",
            PeriodToken::Week => "week",
            PeriodToken::Month => "month",
            PeriodToken::Quarter => "quarter",
            PeriodToken::HalfYear => "half-year",
            PeriodToken::NineMonths => "nine-months",
            PeriodToken::Year => "year",
            PeriodToken::Custom => "custom",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            PeriodToken::Today => "Today",
            PeriodToken::Week => "1 Week",
            PeriodToken::Month => "1 Month",
            PeriodToken::Quarter => "3 Months",
            PeriodToken::HalfYear => "6 Months",
            PeriodToken::NineMonths => "9 Months",
            PeriodToken::Year => "1 Year",
            PeriodToken::Custom => "Custom",
        }
    }

    fn lookback(self) -> Option<Lookback> {
        match self {
            PeriodToken::Today => Some(Lookback::Days(0)),
            PeriodToken::Week => Some(Lookback::Days(6)),
            PeriodToken::Month => Some(Lookback::Months(1)),
            PeriodToken::Quarter => Some(Lookback::Months(3)),
            PeriodToken::HalfYear => Some(Lookback::Months(6)),
            PeriodToken::NineMonths => Some(Lookback::Months(9)),
            PeriodToken::Year => Some(Lookback::Months(12)),
            PeriodToken::Custom => None,
        }
    }

    /// Resolves a preset token against `today`.  Returns `None` for
    /// [`PeriodToken::Custom`], which has no bounds of its own.
    pub(crate) fn resolve(self, today: Date) -> Option<PeriodSelection> {
        let start = match self.lookback()? {
            Lookback::Days(n) => days_before(today, n),
            Lookback::Months(n) => months_before(today, n),
        }
        // Saturate at the beginning of time
        .unwrap_or(Date::MIN);
        Some(PeriodSelection {
            token: self,
            range: DateRange { start, end: today },
        })
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodToken {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<PeriodToken, ParseTokenError> {
        PeriodToken::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseTokenError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown period {0:?}")]
pub(crate) struct ParseTokenError(String);

/// An inclusive range of calendar dates with `start <= end`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub(crate) fn new(start: Date, end: Date) -> Result<DateRange, InvalidRangeError> {
        if start > end {
            Err(InvalidRangeError::Inverted { start, end })
        } else {
            Ok(DateRange { start, end })
        }
    }

    pub(crate) fn single(date: Date) -> DateRange {
        DateRange {
            start: date,
            end: date,
        }
    }

    pub(crate) fn start(&self) -> Date {
        self.start
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub(crate) fn is_bound(&self, date: Date) -> bool {
        date == self.start || date == self.end
    }

    /// True if `date` lies within the range but is neither endpoint
    pub(crate) fn strictly_contains(&self, date: Date) -> bool {
        self.contains(date) && !self.is_bound(date)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", format_ymd(self.start))
        } else {
            write!(f, "{} ~ {}", format_ymd(self.start), format_ymd(self.end))
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidRangeError {
    #[error("a start date is required")]
    MissingStart,
    #[error("an end date is required")]
    MissingEnd,
    #[error("start date {start} is after end date {end}")]
    Inverted { start: Date, end: Date },
}

/// A resolved period: the token that produced it and its concrete bounds
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PeriodSelection {
    pub(crate) token: PeriodToken,
    pub(crate) range: DateRange,
}

impl PeriodSelection {
    pub(crate) fn label(&self) -> &'static str {
        self.token.label()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TokenOutcome {
    Resolved(PeriodSelection),
    /// `custom` was picked; nothing happens until bounds are confirmed or
    /// the entry is cancelled
    AwaitingCustomBounds,
}

/// Turns period tokens and custom bounds into [`PeriodSelection`]s and keeps
/// track of the active one.  Every new selection is also published as a
/// [`DashboardEvent::PeriodSelected`].
#[derive(Clone, Debug)]
pub(crate) struct PeriodResolver {
    clock: Clock,
    events: EventSender,
    active: PeriodSelection,
    // The preset to fall back to when custom entry is cancelled
    last_preset: PeriodToken,
    custom: Option<DateRange>,
    awaiting_custom: bool,
}

impl PeriodResolver {
    /// Creates a resolver with "today" active.  No event is emitted for this
    /// initial state.
    pub(crate) fn new(clock: Clock, events: EventSender) -> PeriodResolver {
        let today = clock.today();
        PeriodResolver {
            clock,
            events,
            active: PeriodSelection {
                token: PeriodToken::Today,
                range: DateRange::single(today),
            },
            last_preset: PeriodToken::Today,
            custom: None,
            awaiting_custom: false,
        }
    }

    pub(crate) fn select_token(&mut self, token: PeriodToken) -> TokenOutcome {
        match token.resolve(self.clock.today()) {
            Some(selection) => {
                self.awaiting_custom = false;
                self.last_preset = token;
                self.activate(selection);
                TokenOutcome::Resolved(selection)
            }
            None => {
                debug!("awaiting custom period bounds");
                self.awaiting_custom = true;
                TokenOutcome::AwaitingCustomBounds
            }
        }
    }

    /// Validates and applies user-supplied bounds.  On failure, nothing
    /// changes.
    pub(crate) fn confirm_custom(
        &mut self,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<PeriodSelection, InvalidRangeError> {
        let start = start.ok_or(InvalidRangeError::MissingStart)?;
        let end = end.ok_or(InvalidRangeError::MissingEnd)?;
        let range = DateRange::new(start, end)?;
        self.custom = Some(range);
        self.awaiting_custom = false;
        let selection = PeriodSelection {
            token: PeriodToken::Custom,
            range,
        };
        self.activate(selection);
        Ok(selection)
    }

    /// Abandons custom entry and goes back to the most recent preset.  The
    /// preset is resolved afresh and re-announced so that listeners end up
    /// in sync with what is displayed.
    pub(crate) fn cancel_custom(&mut self) -> PeriodSelection {
        self.awaiting_custom = false;
        let selection = self
            .last_preset
            .resolve(self.clock.today())
            .expect("last preset should never be the custom token");
        self.activate(selection);
        selection
    }

    pub(crate) fn active_selection(&self) -> &PeriodSelection {
        &self.active
    }

    pub(crate) fn awaiting_custom(&self) -> bool {
        self.awaiting_custom
    }

    /// The bounds to pre-fill custom entry with: the last confirmed custom
    /// range, or just today
    pub(crate) fn custom_prefill(&self) -> DateRange {
        self.custom
            .unwrap_or_else(|| DateRange::single(self.clock.today()))
    }

    fn activate(&mut self, selection: PeriodSelection) {
        info!(
            period = %selection.token,
            start = %format_ymd(selection.range.start()),
            end = %format_ymd(selection.range.end()),
            "period selected"
        );
        self.active = selection;
        self.events.emit(DashboardEvent::PeriodSelected(selection));
    }
}
