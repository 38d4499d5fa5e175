use chrono::Datelike;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{DatePart, DatePicker},
    ui::theme::Theme,
};

const WIDTH: u16 = 26;
const HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame<'_>, area: Rect, picker: &DatePicker) {
    let theme = Theme::default();
    let rect = Rect {
        x: area.x + area.width.saturating_sub(WIDTH) / 2,
        y: area.y + area.height.saturating_sub(HEIGHT) / 2,
        width: WIDTH.min(area.width),
        height: HEIGHT.min(area.height),
    };

    let block = Block::default()
        .title(" date ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    let part = |value: String, this: DatePart| {
        let style = if picker.part == this {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text)
        };
        Span::styled(value, style)
    };
    let sep = || Span::styled("-", Style::default().fg(theme.dim));

    let date = picker.date;
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            part(format!("{:04}", date.year()), DatePart::Year),
            sep(),
            part(format!("{:02}", date.month()), DatePart::Month),
            sep(),
            part(format!("{:02}", date.day()), DatePart::Day),
        ]),
        Line::from(Span::styled(
            date.format("%A").to_string(),
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}
