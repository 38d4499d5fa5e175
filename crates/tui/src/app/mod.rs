mod date_picker;

use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use operation_form::{
    DeleteOutcome, DisplayState, Field, FieldError, FormState, Notice, OperationId,
    OperationKind, Orchestrator, SubmitOutcome, capture,
    date::{format_date, resolve_seed_today},
    restore,
};
use tokio::sync::mpsc;

use crate::{
    client::Client,
    config::Launch,
    error::{AppError, Result},
    local_state::DraftStore,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use date_picker::{DatePart, DatePicker};

const TOAST_TTL: Duration = Duration::from_secs(3);

/// Focusable rows of the editor, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Amount,
    Category,
    Date,
    Note,
    Save,
    Delete,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Kind,
        FormField::Amount,
        FormField::Category,
        FormField::Date,
        FormField::Note,
        FormField::Save,
        FormField::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
            Self::Note => "Note",
            Self::Save => "Save",
            Self::Delete => "Delete",
        }
    }

    fn from_error(field: Field) -> Self {
        match field {
            Field::Kind => Self::Kind,
            Field::Amount => Self::Amount,
            Field::Date => Self::Date,
        }
    }

    /// Next focusable row; `Delete` only exists for persisted operations.
    fn step(self, forward: bool, can_delete: bool) -> Self {
        let order: &[FormField] = if can_delete {
            &Self::ORDER
        } else {
            &Self::ORDER[..Self::ORDER.len() - 1]
        };
        let index = order.iter().position(|field| *field == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        order[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl ToastState {
    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }
}

/// Store call currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    Save,
    Delete,
}

/// Result of a spawned store call, delivered back to the event loop.
#[derive(Debug)]
enum CallOutcome {
    Submit(SubmitOutcome),
    Delete(DeleteOutcome),
}

#[derive(Debug)]
pub struct AppState {
    pub form: FormState,
    pub focus: FormField,
    pub field_error: Option<FieldError>,
    pub picker: Option<DatePicker>,
    pub toast: Option<ToastState>,
    pub pending: Option<PendingCall>,
    pub base_url: String,
}

impl AppState {
    /// Error to show next to `field`, if it is the one that failed.
    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.field_error
            .as_ref()
            .filter(|err| FormField::from_error(err.field()) == field)
    }
}

pub struct App {
    orchestrator: Orchestrator<Client>,
    drafts: DraftStore,
    pub state: AppState,
    /// Form as it was after opening; quitting with anything else keeps a
    /// draft.
    baseline: FormState,
    fresh: bool,
    outcomes_tx: mpsc::UnboundedSender<CallOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<CallOutcome>,
    completed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(launch: Launch) -> Result<Self> {
        let Launch {
            config,
            operation_id,
            fresh,
        } = launch;

        let client = Client::new(&config.base_url)?;
        let drafts = DraftStore::new(&config.state_path);
        let form = FormState::new(OperationId::from_entry(operation_id));
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        let state = AppState {
            form: form.clone(),
            focus: FormField::Kind,
            field_error: None,
            picker: None,
            toast: None,
            pending: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            orchestrator: Orchestrator::new(client),
            drafts,
            state,
            baseline: form,
            fresh,
            outcomes_tx,
            outcomes_rx,
            completed: false,
            should_quit: false,
        })
    }

    /// Fills the form: a saved draft for this operation wins, otherwise an
    /// existing operation is fetched once. A failed fetch leaves the form
    /// blank.
    pub async fn open(&mut self) -> Result<()> {
        let id = self.state.form.operation_id;

        if self.fresh {
            self.drafts.clear()?;
        }

        let form = if let Some(saved) = self.drafts.load_for(id)? {
            tracing::info!(id = ?id.map(OperationId::get), "restoring draft");
            self.show_toast("restored unsaved changes", ToastLevel::Info);
            restore(&saved, self.state.form.clone())
        } else if let Some(operation) = self.orchestrator.load(id).await {
            self.state
                .form
                .clone()
                .with_display(DisplayState::from_operation(&operation))
        } else {
            self.state.form.clone()
        };

        self.baseline = form.clone();
        self.state.form = form;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        self.open().await?;

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.expire_toast();
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }

            while let Ok(outcome) = self.outcomes_rx.try_recv() {
                self.apply_outcome(outcome)?;
            }
            // Let spawned calls make progress between redraws.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        self.handle_action(map_key(key))
    }

    fn handle_action(&mut self, action: AppAction) -> Result<()> {
        if action == AppAction::Quit {
            return self.quit();
        }
        if self.state.picker.is_some() {
            self.handle_picker(action);
            return Ok(());
        }

        match action {
            AppAction::Cancel => {
                if self.state.toast.take().is_none() {
                    self.quit()?;
                }
            }
            AppAction::Save => self.request_save(),
            AppAction::Delete => self.request_delete(),
            AppAction::NextField | AppAction::Down => self.move_focus(true),
            AppAction::PrevField | AppAction::Up => self.move_focus(false),
            AppAction::Left => self.change_selection(false),
            AppAction::Right => self.change_selection(true),
            AppAction::Submit => match self.state.focus {
                FormField::Date => self.open_picker(),
                FormField::Save => self.request_save(),
                FormField::Delete => self.request_delete(),
                _ => self.move_focus(true),
            },
            AppAction::Backspace => {
                if let Some(text) = self.focused_text_mut() {
                    text.pop();
                    self.clear_error_on_focus();
                }
            }
            AppAction::Input(ch) => self.handle_input(ch),
            AppAction::Quit | AppAction::None => {}
        }
        Ok(())
    }

    fn handle_input(&mut self, ch: char) {
        match self.state.focus {
            FormField::Kind => match ch {
                'i' | 'I' => self.select_kind(OperationKind::Income),
                'e' | 'E' => self.select_kind(OperationKind::Expense),
                ' ' => self.change_selection(true),
                _ => {}
            },
            FormField::Category if ch == ' ' => self.change_selection(true),
            // Only the picker writes the date.
            FormField::Date if ch == ' ' => self.open_picker(),
            _ => {
                if let Some(text) = self.focused_text_mut() {
                    text.push(ch);
                    self.clear_error_on_focus();
                }
            }
        }
    }

    fn handle_picker(&mut self, action: AppAction) {
        let Some(picker) = self.state.picker.as_mut() else {
            return;
        };
        match action {
            AppAction::Cancel => self.state.picker = None,
            AppAction::Submit => {
                self.state.form.date = format_date(picker.date);
                self.state.picker = None;
                self.clear_error_on_focus();
            }
            AppAction::Left | AppAction::PrevField => picker.prev_part(),
            AppAction::Right | AppAction::NextField => picker.next_part(),
            AppAction::Up | AppAction::Input('+') => picker.step(true),
            AppAction::Down | AppAction::Input('-') => picker.step(false),
            _ => {}
        }
    }

    fn open_picker(&mut self) {
        let seed = resolve_seed_today(&self.state.form.date);
        self.state.picker = Some(DatePicker::open(seed, Local::now().date_naive()));
    }

    fn move_focus(&mut self, forward: bool) {
        let can_delete = self.state.form.is_existing();
        self.state.focus = self.state.focus.step(forward, can_delete);
    }

    fn change_selection(&mut self, forward: bool) {
        match self.state.focus {
            FormField::Kind => {
                let kind = match (self.state.form.kind, forward) {
                    (None, true) | (Some(OperationKind::Income), true) => OperationKind::Expense,
                    _ => OperationKind::Income,
                };
                self.select_kind(kind);
            }
            FormField::Category => {
                let category = self.state.form.category;
                self.state.form.category = if forward {
                    category.next()
                } else {
                    category.prev()
                };
            }
            _ => {}
        }
    }

    fn select_kind(&mut self, kind: OperationKind) {
        self.state.form.kind = Some(kind);
        self.clear_error_on_focus();
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.state.focus {
            FormField::Amount => Some(&mut self.state.form.amount),
            FormField::Note => Some(&mut self.state.form.note),
            _ => None,
        }
    }

    fn clear_error_on_focus(&mut self) {
        let focus = self.state.focus;
        if self.state.error_for(focus).is_some() {
            self.state.field_error = None;
        }
    }

    fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.state.toast = Some(ToastState::new(message, level));
    }

    fn expire_toast(&mut self) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= Instant::now())
        {
            self.state.toast = None;
        }
    }

    /// Starts a save in the background. Inert while another call runs.
    fn request_save(&mut self) {
        if self.state.pending.is_some() {
            return;
        }
        self.state.pending = Some(PendingCall::Save);

        let orchestrator = self.orchestrator.clone();
        let form = self.state.form.clone();
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let outcome = orchestrator.submit(&form).await;
            // A closed channel means the editor is gone; drop the result.
            let _ = tx.send(CallOutcome::Submit(outcome));
        });
    }

    /// Starts a delete in the background. Does nothing for a new operation.
    fn request_delete(&mut self) {
        if self.state.pending.is_some() || !self.state.form.is_existing() {
            return;
        }
        self.state.pending = Some(PendingCall::Delete);

        let orchestrator = self.orchestrator.clone();
        let form = self.state.form.clone();
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let outcome = orchestrator.delete(&form).await;
            let _ = tx.send(CallOutcome::Delete(outcome));
        });
    }

    fn apply_outcome(&mut self, outcome: CallOutcome) -> Result<()> {
        self.state.pending = None;
        match outcome {
            CallOutcome::Submit(SubmitOutcome::Saved(_))
            | CallOutcome::Delete(DeleteOutcome::Deleted) => self.close()?,
            CallOutcome::Submit(SubmitOutcome::Invalid(err)) => {
                self.state.focus = FormField::from_error(err.field());
                self.state.field_error = Some(err);
            }
            CallOutcome::Submit(SubmitOutcome::Failed(Notice { message, .. }))
            | CallOutcome::Delete(DeleteOutcome::Failed(Notice { message, .. })) => {
                self.show_toast(message, ToastLevel::Error);
            }
            CallOutcome::Submit(SubmitOutcome::Busy)
            | CallOutcome::Delete(DeleteOutcome::Busy | DeleteOutcome::Skipped) => {}
        }
        Ok(())
    }

    /// The operation is stored or gone: drop any draft and leave.
    fn close(&mut self) -> Result<()> {
        self.completed = true;
        self.should_quit = true;
        self.drafts.clear()
    }

    /// Leaves without completing; unsaved edits survive as a draft.
    fn quit(&mut self) -> Result<()> {
        self.should_quit = true;
        if self.completed {
            return Ok(());
        }
        if self.state.form == self.baseline {
            return self.drafts.clear();
        }
        self.drafts.save(&capture(&self.state.form))?;
        tracing::info!(path = %self.drafts.path().display(), "draft saved");
        Ok(())
    }

    /// Waits for the in-flight call and applies its result.
    #[cfg(test)]
    async fn settle(&mut self) -> Result<()> {
        if let Some(outcome) = self.outcomes_rx.recv().await {
            self.apply_outcome(outcome)?;
        }
        Ok(())
    }
}
