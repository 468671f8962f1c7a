use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) mod calendar {
    use super::*;

    pub(crate) const OUTSIDE_STYLE: Style = Style::new().fg(Color::DarkGray);

    pub(crate) const RANGE_STYLE: Style = Style::new().bg(Color::Blue);

    pub(crate) const SELECTED_STYLE: Style = Style::new()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    pub(crate) const TODAY_MODIFIER: Modifier = Modifier::BOLD;

    pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;
}

pub(crate) mod periods {
    use super::*;

    pub(crate) const ACTIVE_STYLE: Style = BASE_STYLE
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    pub(crate) const KEY_STYLE: Style = BASE_STYLE.fg(Color::Yellow);
}

pub(crate) mod summary {
    use super::*;

    pub(crate) const INCOME_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

    pub(crate) const EXPENSE_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

    pub(crate) const PROFIT_STYLE: Style = BASE_STYLE
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    pub(crate) const LOSS_STYLE: Style = BASE_STYLE
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD);

    pub(crate) const MUTED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}

pub(crate) mod custom {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const FOCUSED_FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
