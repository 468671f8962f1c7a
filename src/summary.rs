use crate::api::{CategoryExpense, DateReport, PeriodReport};
use crate::dates::format_ymd;
use crate::theme::{
    summary::{EXPENSE_STYLE, INCOME_STYLE, LOSS_STYLE, MUTED_STYLE, PROFIT_STYLE},
    BASE_STYLE, ERROR_STYLE, TITLE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const LABEL_WIDTH: usize = 14;

/// What the summary panel is currently showing
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SummaryState {
    /// Fetching is disabled
    Offline,
    Loading {
        heading: String,
    },
    Date(DateReport),
    Period(PeriodReport),
    Failed {
        heading: String,
        message: String,
    },
}

impl SummaryState {
    fn lines(&self) -> Vec<Line<'static>> {
        match self {
            SummaryState::Offline => vec![Line::styled(
                "Offline: no summaries are fetched.",
                MUTED_STYLE,
            )],
            SummaryState::Loading { heading } => vec![
                Line::styled(heading.clone(), TITLE_STYLE),
                Line::raw(""),
                Line::styled("Loading…", MUTED_STYLE),
            ],
            SummaryState::Date(report) => {
                let s = &report.summary;
                let mut lines = vec![
                    Line::styled(format_ymd(report.date), TITLE_STYLE),
                    Line::raw(""),
                    amount_line("Income", s.income, INCOME_STYLE),
                    amount_line("Expense", s.expense, EXPENSE_STYLE),
                    net_line(s.net()),
                    count_line(s.transactions),
                ];
                if let Some(ref msg) = s.message {
                    lines.push(Line::raw(""));
                    lines.push(Line::styled(msg.clone(), MUTED_STYLE));
                }
                lines
            }
            SummaryState::Period(report) => {
                let t = &report.totals;
                let mut lines = vec![
                    Line::styled(format!("{}: {}", report.label, report.range), TITLE_STYLE),
                    Line::raw(""),
                    amount_line("Income", t.total_income, INCOME_STYLE),
                    amount_line("Expense", t.total_expense, EXPENSE_STYLE),
                    net_line(t.net()),
                    count_line(t.total_transactions),
                    Line::raw(""),
                    Line::styled("Top expense categories", TITLE_STYLE),
                ];
                if report.categories.is_empty() {
                    lines.push(Line::styled("No data", MUTED_STYLE));
                } else {
                    lines.extend(report.categories.iter().map(category_line));
                }
                lines
            }
            SummaryState::Failed { heading, message } => vec![
                Line::styled(heading.clone(), TITLE_STYLE),
                Line::raw(""),
                Line::styled(message.clone(), ERROR_STYLE),
            ],
        }
    }
}

fn label(s: &str) -> Span<'static> {
    Span::styled(format!("{s:<LABEL_WIDTH$}"), BASE_STYLE)
}

fn amount_line(name: &str, amount: f64, style: Style) -> Line<'static> {
    Line::from(vec![label(name), Span::styled(format_currency(amount), style)])
}

fn net_line(net: f64) -> Line<'static> {
    let style = if net >= 0.0 { PROFIT_STYLE } else { LOSS_STYLE };
    amount_line("Net", net, style)
}

fn count_line(n: u64) -> Line<'static> {
    Line::from(vec![label("Transactions"), Span::styled(n.to_string(), BASE_STYLE)])
}

fn category_line(category: &CategoryExpense) -> Line<'static> {
    let name = if category.name.is_empty() {
        "(unnamed)"
    } else {
        category.name.as_str()
    };
    Line::from(vec![
        label(name),
        Span::styled(format_currency(category.amount), EXPENSE_STYLE),
        Span::styled(format!(" ({}%)", category.percentage), MUTED_STYLE),
    ])
}

/// Formats an amount as whole won with thousands separators, e.g.
/// `₩1,234,567` or `-₩1,500`
pub(crate) fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return String::from("₩-");
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut s = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if rounded < 0.0 {
        s.push('-');
    }
    s.push('₩');
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            s.push(',');
        }
        s.push(c);
    }
    s
}

/// Bordered panel showing a [`SummaryState`]
#[derive(Clone, Copy, Debug)]
pub(crate) struct SummaryPanel<'a>(pub(crate) &'a SummaryState);

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.0.lines())
            .block(Block::bordered().title(" Summary "))
            .style(BASE_STYLE)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
