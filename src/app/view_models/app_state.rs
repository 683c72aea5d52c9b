//! # Application State
//!
//! All client-side UI state lives here: the active tab, keyboard focus, the
//! creation form and list region of each resource kind, the edit session,
//! a pending delete prompt and notifications.
//!
//! Mutating methods queue [`ViewEvent`]s describing what became stale; the
//! controller collects them after each batch of changes and renders.

use crate::app::events::{Focus, InputMode, ViewEvent};
use crate::app::models::{
    blank_form, EditSession, EditSessionError, EditTarget, FormSnapshot, FormState, Notification,
    NotificationCenter, RecordId, ResourceKind,
};
use crate::app::views::list_renderer::{Card, ListRegion};
use std::time::Instant;

/// Creation form and list region of one resource kind
#[derive(Debug, Clone)]
pub struct TabPanel {
    form: FormState,
    list: ListRegion,
}

impl TabPanel {
    fn new(kind: ResourceKind) -> Self {
        Self {
            form: blank_form(kind),
            list: ListRegion::new(kind),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn list(&self) -> &ListRegion {
        &self.list
    }
}

/// A delete waiting for the y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: ResourceKind,
    pub id: RecordId,
}

impl PendingDelete {
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.kind)
    }
}

#[derive(Debug)]
pub struct AppState {
    active_tab: ResourceKind,
    focus: Focus,
    students: TabPanel,
    books: TabPanel,
    edit_session: EditSession,
    pending_delete: Option<PendingDelete>,
    notifications: NotificationCenter,
    terminal_size: (u16, u16),
    in_flight: usize,
    server_label: String,
    pending_view_events: Vec<ViewEvent>,
}

impl AppState {
    pub fn new(server_label: impl Into<String>) -> Self {
        Self {
            active_tab: ResourceKind::Student,
            focus: Focus::default(),
            students: TabPanel::new(ResourceKind::Student),
            books: TabPanel::new(ResourceKind::Book),
            edit_session: EditSession::new(),
            pending_delete: None,
            notifications: NotificationCenter::new(),
            terminal_size: (80, 24),
            in_flight: 0,
            server_label: server_label.into(),
            pending_view_events: Vec::new(),
        }
    }

    /// Replace the notification center (tests use a shorter display time)
    pub fn with_notifications(mut self, notifications: NotificationCenter) -> Self {
        self.notifications = notifications;
        self
    }

    // ----- view events -----

    pub fn emit_view_event(&mut self, event: ViewEvent) {
        if !self.pending_view_events.contains(&event) {
            self.pending_view_events.push(event);
        }
    }

    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    // ----- tabs, focus, mode -----

    pub fn input_mode(&self) -> InputMode {
        if self.pending_delete.is_some() {
            InputMode::Confirm
        } else if self.edit_session.is_visible() {
            InputMode::Modal
        } else {
            match self.focus {
                Focus::Form => InputMode::Form,
                Focus::List => InputMode::List,
            }
        }
    }

    pub fn active_tab(&self) -> ResourceKind {
        self.active_tab
    }

    pub fn select_tab(&mut self, kind: ResourceKind) -> bool {
        if self.active_tab == kind {
            return false;
        }
        self.active_tab = kind;
        self.emit_view_event(ViewEvent::FullRedrawRequired);
        true
    }

    pub fn cycle_tab(&mut self) {
        self.select_tab(self.active_tab.other());
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.emit_view_event(ViewEvent::FormChanged);
            self.emit_view_event(ViewEvent::ListChanged {
                kind: self.active_tab,
            });
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }

    // ----- panels -----

    pub fn panel(&self, kind: ResourceKind) -> &TabPanel {
        match kind {
            ResourceKind::Student => &self.students,
            ResourceKind::Book => &self.books,
        }
    }

    fn panel_mut(&mut self, kind: ResourceKind) -> &mut TabPanel {
        match kind {
            ResourceKind::Student => &mut self.students,
            ResourceKind::Book => &mut self.books,
        }
    }

    pub fn form(&self, kind: ResourceKind) -> &FormState {
        &self.panel(kind).form
    }

    pub fn list(&self, kind: ResourceKind) -> &ListRegion {
        &self.panel(kind).list
    }

    /// Apply an edit to whichever form has the keyboard: the modal if it is
    /// open, otherwise the active tab's creation form
    pub fn edit_focused_form(&mut self, edit: impl FnOnce(&mut FormState) -> bool) -> bool {
        match self.input_mode() {
            InputMode::Modal => {
                let changed = self.edit_session.form_mut().map(edit).unwrap_or(false);
                if changed {
                    self.emit_view_event(ViewEvent::ModalChanged);
                }
                changed
            }
            InputMode::Form => {
                let kind = self.active_tab;
                let changed = edit(&mut self.panel_mut(kind).form);
                if changed {
                    self.emit_view_event(ViewEvent::FormChanged);
                }
                changed
            }
            InputMode::List | InputMode::Confirm => false,
        }
    }

    /// Immutable copy of the active tab's creation form
    pub fn create_snapshot(&self) -> (ResourceKind, FormSnapshot) {
        (self.active_tab, self.form(self.active_tab).snapshot())
    }

    pub fn reset_form(&mut self, kind: ResourceKind) {
        self.panel_mut(kind).form.reset();
        if kind == self.active_tab {
            self.emit_view_event(ViewEvent::FormChanged);
        }
    }

    /// Overwrite the list region of `kind` with freshly rendered cards
    pub fn replace_list(&mut self, kind: ResourceKind, cards: Vec<Card>) {
        self.panel_mut(kind).list.replace(cards);
        self.emit_view_event(ViewEvent::ListChanged { kind });
    }

    pub fn select_next(&mut self) {
        let kind = self.active_tab;
        if self.panel_mut(kind).list.select_next() {
            self.emit_view_event(ViewEvent::ListChanged { kind });
        }
    }

    pub fn select_prev(&mut self) {
        let kind = self.active_tab;
        if self.panel_mut(kind).list.select_prev() {
            self.emit_view_event(ViewEvent::ListChanged { kind });
        }
    }

    /// Id of the selected card on the active tab, if it is a record
    pub fn selected_record(&self) -> Option<EditTarget> {
        let kind = self.active_tab;
        self.list(kind)
            .selected_id()
            .map(|id| EditTarget::new(id.clone(), kind))
    }

    // ----- edit session -----

    pub fn edit_session(&self) -> &EditSession {
        &self.edit_session
    }

    pub fn begin_edit(&mut self, target: EditTarget) -> Result<(), EditSessionError> {
        self.edit_session.begin_open(target)?;
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        Ok(())
    }

    pub fn finish_edit_open(&mut self, target: &EditTarget, form: FormState) -> bool {
        let opened = self.edit_session.finish_open(target, form);
        if opened {
            self.emit_view_event(ViewEvent::FullRedrawRequired);
        }
        opened
    }

    pub fn abort_edit_open(&mut self, target: &EditTarget) -> bool {
        self.edit_session.abort_open(target)
    }

    /// Cancel or outside click; ignored while an update is in flight
    pub fn dismiss_edit(&mut self) -> bool {
        let was_visible = self.edit_session.is_visible();
        let dismissed = self.edit_session.dismiss();
        if dismissed && was_visible {
            self.emit_view_event(ViewEvent::FullRedrawRequired);
        }
        dismissed
    }

    pub fn edit_snapshot(&self) -> Result<(EditTarget, FormSnapshot), EditSessionError> {
        self.edit_session.snapshot()
    }

    pub fn mark_edit_submitting(&mut self) -> Result<(), EditSessionError> {
        self.edit_session.mark_submitting()?;
        self.emit_view_event(ViewEvent::ModalChanged);
        Ok(())
    }

    pub fn finish_edit_submit(&mut self, target: &EditTarget, succeeded: bool) -> bool {
        let resolved = self.edit_session.finish_submit(target, succeeded);
        if resolved {
            self.emit_view_event(if succeeded {
                ViewEvent::FullRedrawRequired
            } else {
                ViewEvent::ModalChanged
            });
        }
        resolved
    }

    // ----- delete prompt -----

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn request_delete(&mut self, kind: ResourceKind, id: RecordId) {
        self.pending_delete = Some(PendingDelete { kind, id });
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub fn take_pending_delete(&mut self) -> Option<PendingDelete> {
        let pending = self.pending_delete.take();
        if pending.is_some() {
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
        pending
    }

    // ----- notifications and status -----

    pub fn notify_success(&mut self, message: impl Into<String>, now: Instant) {
        self.notifications.success(message, now);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub fn notify_error(&mut self, message: impl Into<String>, now: Instant) {
        self.notifications.error(message, now);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn visible_notification(&self, now: Instant) -> Option<&Notification> {
        self.notifications.visible(now)
    }

    /// Expire timed-out notifications
    pub fn tick(&mut self, now: Instant) {
        if self.notifications.expire(now) {
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn set_in_flight(&mut self, in_flight: usize) {
        if self.in_flight != in_flight {
            // Only the busy/idle edge changes what the status bar shows
            if (self.in_flight == 0) != (in_flight == 0) {
                self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
            }
            self.in_flight = in_flight;
        }
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    pub fn server_label(&self) -> &str {
        &self.server_label
    }
}
