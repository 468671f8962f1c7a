use crate::period::DateRange;
use crate::theme::{
    custom::{FOCUSED_FIELD_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE, ERROR_STYLE, TITLE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};
use thiserror::Error;
use time::{Date, Month};

const OUTER_WIDTH: u16 = 36;
const OUTER_HEIGHT: u16 = 11;

/// Number of digits in a `YYYYMMDD` date
const DATE_DIGITS: usize = 8;

/// Pop-up for entering the bounds of a custom period
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CustomRange;

impl StatefulWidget for CustomRange {
    type State = CustomRangeState;

    /*
     * ....................................
     * .┌────── Custom Period ───────────┐.
     * .│                                │.
     * .│  Start  YYYY-MM-DD             │.
     * .│  End    YYYY-MM-DD             │.
     * .│                                │.
     * .│ [ENTER] apply   [ESC] cancel   │.
     * .│ (error message)                │.
     * .└────────────────────────────────┘.
     * ....................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Custom Period ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        Paragraph::new(state.to_text())
            .wrap(Wrap { trim: false })
            .render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
enum Field {
    #[default]
    Start,
    End,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Start => "start",
            Field::End => "end",
        }
    }

    fn other(self) -> Field {
        match self {
            Field::Start => Field::End,
            Field::End => Field::Start,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
enum FieldError {
    #[error("{0} date is incomplete")]
    Incomplete(&'static str),
    #[error("{0} date is not a real date")]
    NoSuchDate(&'static str),
}

/// `YYYY-MM-DD` entered one digit at a time
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct DateField {
    digits: [Option<u8>; DATE_DIGITS],
    pos: usize,
}

impl DateField {
    fn from_date(date: Date) -> DateField {
        let Ok(year) = u16::try_from(date.year()) else {
            return DateField::default();
        };
        if year > 9999 {
            return DateField::default();
        }
        let month = u8::from(date.month());
        let day = date.day();
        let mut field = DateField::default();
        for d in [
            year / 1000,
            year / 100 % 10,
            year / 10 % 10,
            year % 10,
            u16::from(month / 10),
            u16::from(month % 10),
            u16::from(day / 10),
            u16::from(day % 10),
        ] {
            if let Ok(d) = u8::try_from(d) {
                field.push(d);
            }
        }
        field
    }

    fn is_empty(&self) -> bool {
        self.pos == 0
    }

    fn is_complete(&self) -> bool {
        self.pos == DATE_DIGITS
    }

    fn push(&mut self, digit: u8) {
        if self.is_complete() {
            // Typing over a finished date starts a new one
            *self = DateField::default();
        }
        self.digits[self.pos] = Some(digit);
        self.pos += 1;
    }

    fn pop(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        self.digits[self.pos] = None;
        true
    }

    fn number(&self, range: std::ops::Range<usize>) -> u16 {
        self.digits[range]
            .iter()
            .fold(0, |acc, d| acc * 10 + u16::from(d.unwrap_or(0)))
    }

    /// Returns `None` for an empty field
    fn value(&self, field: Field) -> Result<Option<Date>, FieldError> {
        if self.is_empty() {
            return Ok(None);
        }
        if !self.is_complete() {
            return Err(FieldError::Incomplete(field.name()));
        }
        let no_such_date = FieldError::NoSuchDate(field.name());
        let year = i32::from(self.number(0..4));
        let month = u8::try_from(self.number(4..6)).map_err(|_| no_such_date)?;
        let day = u8::try_from(self.number(6..8)).map_err(|_| no_such_date)?;
        let month = Month::try_from(month).map_err(|_| no_such_date)?;
        Date::from_calendar_date(year, month, day)
            .map(Some)
            .map_err(|_| no_such_date)
    }

    fn to_spans(self, focused: bool) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, (dg, fallback)) in std::iter::zip(self.digits, "YYYYMMDD".chars()).enumerate() {
            if i == 4 || i == 6 {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            let mut span = match dg {
                Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                None => Span::styled(fallback.to_string(), UNFILLED_CELL_STYLE),
            };
            if focused && (i == self.pos || (self.is_complete() && i == DATE_DIGITS - 1)) {
                span = span.patch_style(FOCUSED_FIELD_STYLE);
            }
            spans.push(span);
        }
        spans
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CustomRangeState {
    start: DateField,
    end: DateField,
    focus: Field,
    error: Option<String>,
}

impl CustomRangeState {
    pub(crate) fn new(prefill: DateRange) -> CustomRangeState {
        CustomRangeState {
            start: DateField::from_date(prefill.start()),
            end: DateField::from_date(prefill.end()),
            focus: Field::Start,
            error: None,
        }
    }

    /// Shows a message explaining why the entered bounds were rejected
    pub(crate) fn set_error<S: Into<String>>(&mut self, msg: S) {
        self.error = Some(msg.into());
    }

    fn field_mut(&mut self, field: Field) -> &mut DateField {
        match field {
            Field::Start => &mut self.start,
            Field::End => &mut self.end,
        }
    }

    fn to_text(&self) -> Text<'static> {
        let mut lines = vec![Line::raw("")];
        for (field, label) in [(Field::Start, " Start  "), (Field::End, " End    ")] {
            let value = match field {
                Field::Start => self.start,
                Field::End => self.end,
            };
            let focused = field == self.focus;
            let mut spans = vec![Span::styled(
                label,
                if focused { TITLE_STYLE } else { BASE_STYLE },
            )];
            spans.extend(value.to_spans(focused));
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw(" [ENTER] apply   [ESC] cancel"));
        if let Some(ref e) = self.error {
            lines.push(Line::styled(format!(" {e}"), ERROR_STYLE));
        }
        Text::from(lines).style(BASE_STYLE)
    }

    pub(crate) fn handle_input(&mut self, input: CustomRangeInput) -> CustomRangeOutput {
        match input {
            CustomRangeInput::Digit(d) if d < 10 => {
                self.error = None;
                let focus = self.focus;
                let field = self.field_mut(focus);
                field.push(d);
                if field.is_complete() && focus == Field::Start {
                    self.focus = Field::End;
                }
                CustomRangeOutput::Ok
            }
            CustomRangeInput::Digit(_) => CustomRangeOutput::Invalid,
            CustomRangeInput::Backspace => {
                self.error = None;
                let focus = self.focus;
                if self.field_mut(focus).pop() {
                    CustomRangeOutput::Ok
                } else if focus == Field::End {
                    // Backspacing out of an empty end date goes back to the
                    // start date
                    self.focus = Field::Start;
                    CustomRangeOutput::Ok
                } else {
                    CustomRangeOutput::Invalid
                }
            }
            CustomRangeInput::SwitchField => {
                self.focus = self.focus.other();
                CustomRangeOutput::Ok
            }
            CustomRangeInput::Enter => {
                match (self.start.value(Field::Start), self.end.value(Field::End)) {
                    (Ok(start), Ok(end)) => CustomRangeOutput::Submit { start, end },
                    (Err(e), _) | (_, Err(e)) => {
                        self.set_error(e.to_string());
                        CustomRangeOutput::Invalid
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CustomRangeInput {
    Digit(u8),
    Backspace,
    SwitchField,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CustomRangeOutput {
    Ok,
    Invalid,
    /// The user asked to apply these bounds; either may be missing
    Submit {
        start: Option<Date>,
        end: Option<Date>,
    },
}
