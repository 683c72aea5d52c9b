//! # Application Controller
//!
//! Owns the event loop. Each iteration polls terminal input, applies the
//! resulting command events to the app state, collects the outcomes of
//! finished network operations, and renders whatever became stale.
//!
//! Network operations never block the loop: they are handed to the
//! [`OperationDispatcher`] and their outcomes are applied here, on the
//! controller's task, in the order they arrive.

use crate::app::{
    commands::{AppSnapshot, CommandContext, CommandEvent, CommandRegistry, MoveDirection},
    events::ViewEvent,
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    models::{FieldSet, FormState, NotificationCenter, ResourceKind},
    services::{
        HttpTransport, Operation, OperationDispatcher, OperationOutcome, ReqwestTransport,
    },
    view_models::AppState,
    views::{modal_rect, TerminalRenderer, ViewRenderer},
};
use crate::config::ClientConfig;
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::io;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Production controller: real terminal, reqwest transport
pub type TerminalAppController =
    AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>, ReqwestTransport>;

pub struct AppController<ES: EventStream, RS: RenderStream, T: HttpTransport + 'static> {
    state: AppState,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    dispatcher: OperationDispatcher<T>,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>, ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.server())?;
        Self::with_io_streams(
            config,
            transport,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream, T: HttpTransport + 'static> AppController<ES, RS, T> {
    /// Create a controller with injected transport and I/O streams
    pub fn with_io_streams(
        config: &ClientConfig,
        transport: T,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        let mut state = AppState::new(config.server().as_str().trim_end_matches('/'));
        let (width, height) = view_renderer.terminal_size();
        state.update_terminal_size(width, height);

        tracing::debug!(
            "Controller ready: profile '{}' from '{}', server {}",
            config.profile_name(),
            config.profile_path(),
            config.server()
        );

        Ok(Self {
            state,
            view_renderer,
            command_registry: CommandRegistry::new(),
            dispatcher: OperationDispatcher::new(transport),
            event_stream,
            should_quit: false,
        })
    }

    /// Swap the notification center, e.g. for a shorter display time
    pub fn with_notifications(mut self, notifications: NotificationCenter) -> Self {
        self.state = self.state.with_notifications(notifications);
        self
    }

    /// Load both lists. They render into separate regions, so order does not matter.
    pub fn start(&mut self) {
        tracing::info!("Loading students and books");
        for kind in ResourceKind::ALL {
            self.dispatch(Operation::List { kind });
        }
    }

    /// Run the main application loop until quit
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.start();
        self.view_renderer.render_full(&self.state)?;
        self.state.collect_pending_view_events();

        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        let cleanup = self.view_renderer.cleanup();
        result.and(cleanup)
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.apply_event(event)?;
            }

            self.drain_outcomes();
            self.state.tick(Instant::now());
            self.render_pending()?;

            // Let operation tasks make progress between polls
            tokio::task::yield_now().await;
        }
        tracing::info!("Quit requested");
        Ok(())
    }

    /// Apply one terminal event and render the result
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        self.apply_event(event)?;
        self.render_pending()
    }

    /// Wait until every in-flight operation, including reloads triggered by
    /// earlier outcomes, has been applied
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(outcome) = self.dispatcher.next_outcome().await {
            self.apply_outcome(outcome);
        }
        self.state.set_in_flight(self.dispatcher.in_flight());
        self.render_pending()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn apply_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                self.apply_key_event(key_event)?;
            }
            Event::Mouse(mouse_event) => self.apply_mouse_event(mouse_event),
            Event::Resize(width, height) => {
                self.state.update_terminal_size(width, height);
                self.view_renderer.update_size(width, height);
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::trace!("Received key event: {:?}", key_event);
        let context = CommandContext::new(AppSnapshot::from_app_state(&self.state));
        let events = self.command_registry.process_event(key_event, &context)?;
        for event in events {
            self.apply_command_event(event);
        }
        Ok(())
    }

    /// A left click outside the modal dismisses it
    fn apply_mouse_event(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(form) = self.state.edit_session().form() else {
            return;
        };
        let area = modal_rect(self.state.terminal_size(), form.fields().len());
        if !area.contains(mouse_event.column, mouse_event.row) {
            tracing::debug!("Click outside modal at {},{}", mouse_event.column, mouse_event.row);
            self.state.dismiss_edit();
        }
    }

    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::QuitRequested => self.should_quit = true,
            CommandEvent::TabSelectRequested { kind } => {
                self.state.select_tab(kind);
            }
            CommandEvent::TabCycleRequested => self.state.cycle_tab(),
            CommandEvent::FocusChangeRequested { focus } => self.state.set_focus(focus),
            CommandEvent::SelectionMoveRequested { direction } => match direction {
                MoveDirection::Up => self.state.select_prev(),
                MoveDirection::Down => self.state.select_next(),
            },
            CommandEvent::FieldFocusRequested { direction } => {
                self.state.edit_focused_form(|form| {
                    match direction {
                        MoveDirection::Up => form.focus_prev(),
                        MoveDirection::Down => form.focus_next(),
                    }
                    true
                });
            }
            CommandEvent::CharInsertRequested { ch } => {
                self.state.edit_focused_form(|form| form.insert_char(ch));
            }
            CommandEvent::BackspaceRequested => {
                self.state.edit_focused_form(FormState::backspace);
            }
            CommandEvent::CreateSubmitRequested => self.submit_create(),
            CommandEvent::EditRequested => self.open_edit(),
            CommandEvent::DeleteRequested => {
                if let Some(target) = self.state.selected_record() {
                    self.state.request_delete(target.kind, target.id);
                }
            }
            CommandEvent::DeleteConfirmationAnswered { confirmed } => {
                self.answer_delete(confirmed)
            }
            CommandEvent::RefreshRequested => {
                let kind = self.state.active_tab();
                self.dispatch(Operation::List { kind });
            }
            CommandEvent::ModalSaveRequested => self.submit_edit(),
            CommandEvent::ModalCancelRequested => {
                self.state.dismiss_edit();
            }
        }
    }

    /// Snapshot the creation form, validate it and send it
    fn submit_create(&mut self) {
        let (kind, snapshot) = self.state.create_snapshot();
        match FieldSet::from_snapshot(kind, &snapshot) {
            Ok(fields) => self.dispatch(Operation::Create { fields }),
            Err(e) => {
                tracing::debug!("Create {kind} blocked: {e}");
                self.state.notify_error(e.to_string(), Instant::now());
            }
        }
    }

    fn open_edit(&mut self) {
        let Some(target) = self.state.selected_record() else {
            return;
        };
        match self.state.begin_edit(target.clone()) {
            Ok(()) => self.dispatch(Operation::Fetch { target }),
            Err(e) => tracing::debug!("Edit of {} ignored: {e}", target.id),
        }
    }

    fn answer_delete(&mut self, confirmed: bool) {
        let Some(pending) = self.state.take_pending_delete() else {
            return;
        };
        if confirmed {
            self.dispatch(Operation::Delete {
                kind: pending.kind,
                id: pending.id,
            });
        } else {
            tracing::debug!("Delete of {} {} declined", pending.kind, pending.id);
        }
    }

    /// Snapshot the modal form, validate it and send it as a full replacement
    fn submit_edit(&mut self) {
        let Ok((target, snapshot)) = self.state.edit_snapshot() else {
            return;
        };
        match FieldSet::from_snapshot(target.kind, &snapshot) {
            Ok(fields) => {
                if self.state.mark_edit_submitting().is_ok() {
                    self.dispatch(Operation::Update {
                        id: target.id,
                        fields,
                    });
                }
            }
            Err(e) => self.state.notify_error(e.to_string(), Instant::now()),
        }
    }

    fn dispatch(&mut self, operation: Operation) {
        self.dispatcher.dispatch(operation);
        self.state.set_in_flight(self.dispatcher.in_flight());
    }

    fn drain_outcomes(&mut self) {
        while let Some(outcome) = self.dispatcher.poll_outcome() {
            self.apply_outcome(outcome);
        }
        self.state.set_in_flight(self.dispatcher.in_flight());
    }

    /// Map an outcome to its side effects: list reload, notification, edit-session change
    fn apply_outcome(&mut self, outcome: OperationOutcome) {
        let succeeded = outcome.is_success();
        let message = outcome.message();

        match outcome {
            OperationOutcome::Created { kind, result } => {
                if result.is_ok() {
                    self.state.reset_form(kind);
                    self.dispatch(Operation::List { kind });
                }
            }
            OperationOutcome::Listed { kind, result } => {
                if let Ok(cards) = result {
                    self.state.replace_list(kind, cards);
                }
            }
            OperationOutcome::Fetched { target, result } => match result {
                Ok(form) => {
                    if !self.state.finish_edit_open(&target, form) {
                        tracing::debug!("Dropped stale fetch for {}", target.id);
                    }
                }
                Err(_) => {
                    self.state.abort_edit_open(&target);
                }
            },
            OperationOutcome::Updated { target, result } => {
                self.state.finish_edit_submit(&target, result.is_ok());
                if result.is_ok() {
                    self.dispatch(Operation::List { kind: target.kind });
                }
            }
            OperationOutcome::Deleted { kind, result, .. } => {
                if result.is_ok() {
                    self.dispatch(Operation::List { kind });
                }
            }
        }

        if let Some(message) = message {
            let now = Instant::now();
            if succeeded {
                self.state.notify_success(message, now);
            } else {
                self.state.notify_error(message, now);
            }
        }
    }

    /// Render only what the queued view events say is stale
    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.state.collect_pending_view_events();
        if view_events.is_empty() {
            return Ok(());
        }

        let mut needs_status_bar = false;
        let mut needs_form = false;
        let mut needs_modal = false;
        let mut lists = Vec::new();

        for event in view_events {
            match event {
                ViewEvent::FullRedrawRequired => {
                    // Full redraw overrides all other events
                    return self.view_renderer.render_full(&self.state);
                }
                ViewEvent::ListChanged { kind } => {
                    if !lists.contains(&kind) {
                        lists.push(kind);
                    }
                }
                ViewEvent::FormChanged => needs_form = true,
                ViewEvent::ModalChanged => needs_modal = true,
                ViewEvent::StatusBarUpdateRequired => needs_status_bar = true,
            }
        }

        if needs_form {
            self.view_renderer.render_form(&self.state)?;
        }
        for kind in lists {
            self.view_renderer.render_list(&self.state, kind)?;
        }
        if needs_modal {
            self.view_renderer.render_modal(&self.state)?;
        }
        if needs_status_bar {
            self.view_renderer.render_status_bar(&self.state)?;
        }
        Ok(())
    }
}
