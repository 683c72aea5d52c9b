//! # Terminal Renderer
//!
//! Draws the app state onto a [`RenderStream`]. Drawing commands are queued
//! and flushed once per render call.

use super::layout::{modal_rect, visible_range, Rect, ScreenLayout, CARD_HEIGHT};
use crate::app::events::{Focus, InputMode};
use crate::app::io::RenderStream;
use crate::app::models::{FieldValue, FormField, FormState, NotificationLevel, ResourceKind};
use crate::app::view_models::AppState;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

const LABEL_WIDTH: usize = 8;
const WORKING_INDICATOR: &str = "Working…";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for drawing
    fn initialize(&mut self) -> Result<()>;

    fn render_full(&mut self, state: &AppState) -> Result<()>;

    /// Creation form of the active tab
    fn render_form(&mut self, state: &AppState) -> Result<()>;

    /// List region of `kind`; no-op unless that tab is active
    fn render_list(&mut self, state: &AppState, kind: ResourceKind) -> Result<()>;

    /// Edit modal, if one is visible
    fn render_modal(&mut self, state: &AppState) -> Result<()>;

    /// Hint row and status bar
    fn render_status_bar(&mut self, state: &AppState) -> Result<()>;

    /// Place or hide the cursor for the current input mode
    fn render_cursor(&mut self, state: &AppState) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Terminal-based view renderer using crossterm
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn layout(&self, state: &AppState) -> ScreenLayout {
        let fields = state.form(state.active_tab()).fields().len();
        ScreenLayout::compute(self.terminal_size, fields)
    }

    fn modal_area(&self, state: &AppState) -> Option<Rect> {
        state
            .edit_session()
            .form()
            .map(|form| modal_rect(self.terminal_size, form.fields().len()))
    }

    /// Print `text` at (x, row), fitted to `width` cells and padded
    fn print_at(&mut self, x: u16, row: u16, width: u16, text: &str) -> Result<()> {
        queue_term!(
            self.render_stream,
            MoveTo(x, row),
            Print(fit(text, usize::from(width)))
        )
    }

    fn render_tabs(&mut self, state: &AppState, layout: &ScreenLayout) -> Result<()> {
        queue_term!(self.render_stream, MoveTo(0, layout.tab_row))?;
        let mut used = 0;
        for (index, kind) in ResourceKind::ALL.into_iter().enumerate() {
            let label = format!(" {} {} ", index + 1, kind.plural_title());
            used += label.width();
            if kind == state.active_tab() {
                queue_term!(
                    self.render_stream,
                    SetAttribute(Attribute::Reverse),
                    Print(&label),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue_term!(self.render_stream, Print(&label))?;
            }
        }

        let remaining = usize::from(layout.width).saturating_sub(used);
        let server = format!("{} ", state.server_label());
        let padded = format!("{server:>remaining$}");
        queue_term!(
            self.render_stream,
            SetForegroundColor(Color::DarkGrey),
            Print(fit(&padded, remaining)),
            ResetColor
        )?;

        let separator = "─".repeat(usize::from(layout.width));
        queue_term!(
            self.render_stream,
            MoveTo(0, layout.separator_row),
            Print(separator)
        )
    }

    /// Title row plus one row per field, inside `area`
    fn render_form_rows(
        &mut self,
        form: &FormState,
        area: Rect,
        title_row: u16,
        highlight_focus: bool,
    ) -> Result<()> {
        queue_term!(self.render_stream, SetAttribute(Attribute::Bold))?;
        self.print_at(area.x, title_row, area.width, &format!(" {}", form.title()))?;
        queue_term!(self.render_stream, SetAttribute(Attribute::Reset))?;

        for (index, field) in form.fields().iter().enumerate() {
            let row = title_row + 1 + index as u16;
            if row >= area.bottom() {
                break;
            }
            let focused = highlight_focus && index == form.focused_index();
            let line = format!("{}{}", field_prefix(field, focused), field_display(field));
            if focused {
                queue_term!(self.render_stream, SetAttribute(Attribute::Bold))?;
            }
            self.print_at(area.x, row, area.width, &line)?;
            if focused {
                queue_term!(self.render_stream, SetAttribute(Attribute::Reset))?;
            }
        }
        Ok(())
    }

    fn draw_form(&mut self, state: &AppState, layout: &ScreenLayout) -> Result<()> {
        let kind = state.active_tab();
        let highlight = state.focus() == Focus::Form;
        if layout.form.height == 0 {
            return Ok(());
        }
        self.render_form_rows(state.form(kind), layout.form, layout.form.y, highlight)
    }

    fn draw_list(&mut self, state: &AppState, layout: &ScreenLayout) -> Result<()> {
        let kind = state.active_tab();
        let region = state.list(kind);
        let list_focused = state.focus() == Focus::List;

        let title = if region.is_loaded() {
            format!(" {} ({})", kind.plural_title(), region.record_cards().count())
        } else {
            format!(" {} (loading)", kind.plural_title())
        };
        queue_term!(self.render_stream, SetAttribute(Attribute::Bold))?;
        self.print_at(0, layout.list_title_row, layout.width, &title)?;
        queue_term!(self.render_stream, SetAttribute(Attribute::Reset))?;

        let cards = region.cards();
        let selected = region.selected_index();
        let window = visible_range(selected, cards.len(), layout.card_capacity());

        let mut row = layout.list.y;
        for index in window {
            if row + CARD_HEIGHT > layout.list.bottom() {
                break;
            }
            let card = &cards[index];
            let is_selected = index == selected && card.has_actions();
            let marker = if is_selected { "▶" } else { " " };

            if is_selected && list_focused {
                queue_term!(self.render_stream, SetAttribute(Attribute::Reverse))?;
            }
            self.print_at(0, row, layout.width, &format!(" {marker} {}", card.heading()))?;
            queue_term!(self.render_stream, SetAttribute(Attribute::Reset))?;

            queue_term!(self.render_stream, SetForegroundColor(Color::DarkGrey))?;
            self.print_at(0, row + 1, layout.width, &format!("     {}", card.summary()))?;
            queue_term!(self.render_stream, ResetColor)?;

            self.print_at(0, row + 2, layout.width, "")?;
            row += CARD_HEIGHT;
        }

        while row < layout.list.bottom() {
            self.print_at(0, row, layout.width, "")?;
            row += 1;
        }
        Ok(())
    }

    fn draw_modal(&mut self, state: &AppState) -> Result<()> {
        let (Some(area), Some(form)) = (self.modal_area(state), state.edit_session().form()) else {
            return Ok(());
        };
        if area.width < 2 || area.height < 2 {
            return Ok(());
        }
        let inner_width = usize::from(area.width - 2);

        let top = format!("┌{}┐", "─".repeat(inner_width));
        let bottom = format!("└{}┘", "─".repeat(inner_width));
        queue_term!(self.render_stream, MoveTo(area.x, area.y), Print(top))?;
        for row in area.y + 1..area.bottom() - 1 {
            queue_term!(
                self.render_stream,
                MoveTo(area.x, row),
                Print(format!("│{}│", " ".repeat(inner_width)))
            )?;
        }
        queue_term!(
            self.render_stream,
            MoveTo(area.x, area.bottom() - 1),
            Print(bottom)
        )?;

        let inner = Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2);
        let submitting = state.edit_session().is_submitting();
        self.render_form_rows(form, inner, inner.y, !submitting)?;

        let hint = if submitting {
            " Saving…".to_string()
        } else {
            " Enter save · Esc cancel".to_string()
        };
        queue_term!(self.render_stream, SetForegroundColor(Color::DarkGrey))?;
        self.print_at(inner.x, inner.bottom() - 1, inner.width, &hint)?;
        queue_term!(self.render_stream, ResetColor)
    }

    fn hint_text(state: &AppState) -> String {
        if let Some(pending) = state.pending_delete() {
            return format!(" {} (y/n)", pending.prompt());
        }
        match state.input_mode() {
            InputMode::List => {
                " ←/→ tab · j/k select · a add · e edit · d delete · r refresh · q quit".to_string()
            }
            InputMode::Form => " Tab next field · Space toggle · Enter submit · Esc list".to_string(),
            InputMode::Modal => " Enter save · Esc cancel · click outside to close".to_string(),
            InputMode::Confirm => String::new(),
        }
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.enable_mouse_capture()?;
        self.render_stream.hide_cursor()?;
        Ok(())
    }

    fn render_full(&mut self, state: &AppState) -> Result<()> {
        queue_term!(self.render_stream, Hide, Clear(ClearType::All))?;

        let layout = self.layout(state);
        self.render_tabs(state, &layout)?;
        self.draw_form(state, &layout)?;
        self.draw_list(state, &layout)?;
        self.draw_modal(state)?;
        self.render_status_bar(state)?;
        self.render_cursor(state)?;

        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn render_form(&mut self, state: &AppState) -> Result<()> {
        let layout = self.layout(state);
        queue_term!(self.render_stream, Hide)?;
        self.draw_form(state, &layout)?;
        // The modal may overlap the form
        self.draw_modal(state)?;
        self.render_cursor(state)?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn render_list(&mut self, state: &AppState, kind: ResourceKind) -> Result<()> {
        if kind != state.active_tab() {
            return Ok(());
        }
        let layout = self.layout(state);
        queue_term!(self.render_stream, Hide)?;
        self.draw_list(state, &layout)?;
        self.draw_modal(state)?;
        self.render_cursor(state)?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn render_modal(&mut self, state: &AppState) -> Result<()> {
        queue_term!(self.render_stream, Hide)?;
        self.draw_modal(state)?;
        self.render_cursor(state)?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn render_status_bar(&mut self, state: &AppState) -> Result<()> {
        let layout = self.layout(state);
        let width = usize::from(layout.width);

        queue_term!(self.render_stream, SetForegroundColor(Color::DarkGrey))?;
        if state.pending_delete().is_some() {
            queue_term!(self.render_stream, SetForegroundColor(Color::Yellow))?;
        }
        self.print_at(0, layout.hint_row, layout.width, &Self::hint_text(state))?;
        queue_term!(self.render_stream, ResetColor)?;

        let right = if state.in_flight() > 0 {
            format!("{WORKING_INDICATOR} ")
        } else {
            String::new()
        };
        let left_width = width.saturating_sub(right.width());

        queue_term!(self.render_stream, MoveTo(0, layout.status_row))?;
        match state.visible_notification(Instant::now()) {
            Some(notification) => {
                let (icon, color) = match notification.level() {
                    NotificationLevel::Success => ("✔", Color::Green),
                    NotificationLevel::Error => ("✖", Color::Red),
                };
                let text = format!(" {icon} {}", notification.message());
                queue_term!(
                    self.render_stream,
                    SetForegroundColor(color),
                    Print(fit(&text, left_width)),
                    ResetColor
                )?;
            }
            None => {
                queue_term!(self.render_stream, Print(fit("", left_width)))?;
            }
        }
        queue_term!(
            self.render_stream,
            SetForegroundColor(Color::Yellow),
            Print(fit(&right, width - left_width)),
            ResetColor
        )?;

        self.render_cursor(state)?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }

    fn render_cursor(&mut self, state: &AppState) -> Result<()> {
        let position = match state.input_mode() {
            InputMode::Form => {
                let layout = self.layout(state);
                let form = state.form(state.active_tab());
                cursor_in(form, layout.form.x, layout.form.y)
            }
            InputMode::Modal if !state.edit_session().is_submitting() => {
                match (self.modal_area(state), state.edit_session().form()) {
                    (Some(area), Some(form)) => cursor_in(form, area.x + 1, area.y + 1),
                    _ => None,
                }
            }
            _ => None,
        };

        match position {
            Some((column, row)) => queue_term!(self.render_stream, MoveTo(column, row), Show),
            None => queue_term!(self.render_stream, Hide),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        queue_term!(self.render_stream, ResetColor, Clear(ClearType::All))?;
        self.render_stream.flush()?;
        self.render_stream.disable_mouse_capture()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.show_cursor()?;
        Ok(())
    }
}

fn field_prefix(field: &FormField, focused: bool) -> String {
    let marker = if focused { "›" } else { " " };
    let required = if field.is_required() { "*" } else { " " };
    format!(
        " {marker} {:<width$}{required} ",
        field.label(),
        width = LABEL_WIDTH
    )
}

fn field_display(field: &FormField) -> String {
    match field.value() {
        FieldValue::Text(text) => text.chars().map(printable).collect(),
        FieldValue::Flag(true) => "[x]".to_string(),
        FieldValue::Flag(false) => "[ ]".to_string(),
    }
}

/// Screen position just after the focused field's text; `None` on a checkbox
fn cursor_in(form: &FormState, x: u16, title_row: u16) -> Option<(u16, u16)> {
    let field = form.focused_field()?;
    if field.is_checkbox() {
        return None;
    }
    let column = field_prefix(field, true).width() + field_display(field).width();
    let row = title_row + 1 + form.focused_index() as u16;
    Some((x + column as u16, row))
}

/// Control characters from record text must never reach the terminal
fn printable(ch: char) -> char {
    if ch.is_control() {
        char::REPLACEMENT_CHARACTER
    } else {
        ch
    }
}

/// Truncate `text` to `width` display cells and pad with spaces to exactly `width`.
/// Control characters are shown as U+FFFD.
pub fn fit(text: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars().map(printable) {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        fitted.push(ch);
        used += ch_width;
    }
    fitted.push_str(&" ".repeat(width - used));
    fitted
}
