pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, FormField, PendingCall};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Editor
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::editor::render(frame, layout[1], state);
    render_bottom_bar(frame, layout[2], state, &theme);

    if let Some(picker) = &state.picker {
        components::date_picker::render(frame, area, picker);
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let operation = state
        .form
        .operation_id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "new".to_string());
    let status = match state.pending {
        Some(PendingCall::Save) => "saving…",
        Some(PendingCall::Delete) => "deleting…",
        None => "ready",
    };

    let line = Line::from(vec![
        Span::styled("Operation", Style::default().fg(theme.dim)),
        Span::raw(format!(": {operation}  ")),
        Span::styled("Server", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled(status, Style::default().fg(theme.accent)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = context_hints(state, theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+S", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" save  "));
    if state.form.is_existing() {
        parts.push(Span::styled("Ctrl+D", Style::default().fg(theme.accent)));
        parts.push(Span::raw(" delete  "));
    }
    parts.push(Span::styled("Esc", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let key = |label: &'static str| Span::styled(label, Style::default().fg(theme.accent));

    if state.picker.is_some() {
        return vec![
            key("←/→"),
            Span::raw(" part  "),
            key("↑/↓"),
            Span::raw(" change  "),
            key("Enter"),
            Span::raw(" pick  "),
            key("Esc"),
            Span::raw(" cancel"),
        ];
    }

    let mut hints = vec![key("Tab"), Span::raw(" next")];
    match state.focus {
        FormField::Kind => {
            hints.push(Span::raw("  "));
            hints.push(key("i/e"));
            hints.push(Span::raw(" income/expense"));
        }
        FormField::Category => {
            hints.push(Span::raw("  "));
            hints.push(key("←/→"));
            hints.push(Span::raw(" choose"));
        }
        FormField::Date => {
            hints.push(Span::raw("  "));
            hints.push(key("Enter"));
            hints.push(Span::raw(" calendar"));
        }
        FormField::Save | FormField::Delete => {
            hints.push(Span::raw("  "));
            hints.push(key("Enter"));
            hints.push(Span::raw(" confirm"));
        }
        FormField::Amount | FormField::Note => {}
    }
    hints
}
