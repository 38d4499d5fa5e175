use operation_form::OperationKind;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, FormField},
    ui::theme::Theme,
};

const LABEL_WIDTH: usize = 10;

/// Calculates a centered rect for the form box
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.form;

    let mut lines = vec![
        field_line(state, FormField::Kind, kind_spans(form.kind, &theme), &theme),
        field_line(
            state,
            FormField::Amount,
            text_spans(&form.amount, state.focus == FormField::Amount, &theme),
            &theme,
        ),
        field_line(
            state,
            FormField::Category,
            vec![Span::raw(format!("‹ {} ›", form.category))],
            &theme,
        ),
        field_line(
            state,
            FormField::Date,
            vec![Span::raw(if form.date.is_empty() {
                "pick a date".to_string()
            } else {
                form.date.clone()
            })],
            &theme,
        ),
        field_line(
            state,
            FormField::Note,
            text_spans(&form.note, state.focus == FormField::Note, &theme),
            &theme,
        ),
    ];
    // Error lines sit under their field.
    let mut row = 0;
    for field in [
        FormField::Kind,
        FormField::Amount,
        FormField::Category,
        FormField::Date,
        FormField::Note,
    ] {
        row += 1;
        if let Some(err) = state.error_for(field) {
            let indent = " ".repeat(LABEL_WIDTH + 2);
            lines.insert(
                row,
                Line::from(Span::styled(
                    format!("{indent}{err}"),
                    Style::default().fg(theme.error),
                )),
            );
            row += 1;
        }
    }

    lines.push(Line::from(""));
    let mut buttons = vec![button(state, FormField::Save, &theme)];
    if form.is_existing() {
        buttons.push(Span::raw("   "));
        buttons.push(button(state, FormField::Delete, &theme));
    }
    lines.push(Line::from(buttons).centered());

    let box_width = 52;
    let box_height = lines.len() as u16 + 4;
    let card_area = centered_box(box_width, box_height, area);
    frame.render_widget(Clear, card_area);

    let title = if form.is_existing() {
        " edit operation "
    } else {
        " new operation "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0)])
        .margin(1)
        .split(inner);
    frame.render_widget(Paragraph::new(lines), content[0]);
}

fn field_line<'a>(
    state: &AppState,
    field: FormField,
    value: Vec<Span<'a>>,
    theme: &Theme,
) -> Line<'a> {
    let focused = state.picker.is_none() && state.focus == field;
    let label_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };
    let marker = if focused { "›" } else { " " };

    let mut spans = vec![Span::styled(
        format!("{marker}{:<width$} ", field.label(), width = LABEL_WIDTH),
        label_style,
    )];
    spans.extend(value);
    Line::from(spans)
}

fn kind_spans(kind: Option<OperationKind>, theme: &Theme) -> Vec<Span<'static>> {
    OperationKind::ALL
        .into_iter()
        .flat_map(|option| {
            let selected = kind == Some(option);
            let (mark, style) = match (selected, option) {
                (true, OperationKind::Income) => ("(•)", Style::default().fg(theme.positive)),
                (true, OperationKind::Expense) => ("(•)", Style::default().fg(theme.negative)),
                (false, _) => ("( )", Style::default().fg(theme.text)),
            };
            [
                Span::styled(format!("{mark} {}", option.as_str()), style),
                Span::raw("  "),
            ]
        })
        .collect()
}

fn text_spans(value: &str, focused: bool, theme: &Theme) -> Vec<Span<'static>> {
    let cursor = if focused { "│" } else { "" };
    vec![Span::styled(
        format!("{value}{cursor}"),
        Style::default().fg(theme.text),
    )]
}

fn button(state: &AppState, field: FormField, theme: &Theme) -> Span<'static> {
    let color = match field {
        FormField::Delete => theme.negative,
        _ => theme.accent,
    };
    let mut style = Style::default().fg(color);
    if state.picker.is_none() && state.focus == field {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Span::styled(format!("[ {} ]", field.label()), style)
}
