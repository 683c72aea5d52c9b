//! # Screen Layout
//!
//! Row/column geometry shared by the renderer and by mouse hit-testing.
//!
//! ```text
//! row 0        tab bar
//! row 1        separator
//! rows 2..     creation form (title + one row per field)
//!              blank
//!              list title, then cards (CARD_HEIGHT rows each)
//! row h-2      key hints / delete prompt
//! row h-1      status bar
//! ```

use std::ops::Range;

pub const CARD_HEIGHT: u16 = 3;
const MODAL_MAX_WIDTH: u16 = 60;
const MODAL_MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Whether the cell (column, row) lies inside
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x && column < self.right() && row >= self.y && row < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub width: u16,
    pub tab_row: u16,
    pub separator_row: u16,
    pub form: Rect,
    pub list_title_row: u16,
    pub list: Rect,
    pub hint_row: u16,
    pub status_row: u16,
}

impl ScreenLayout {
    pub fn compute((width, height): (u16, u16), form_fields: usize) -> Self {
        let height = height.max(4);
        let status_row = height - 1;
        let hint_row = height - 2;

        let form_height = (form_fields as u16).saturating_add(1).min(hint_row.saturating_sub(2));
        let form = Rect::new(0, 2, width, form_height);

        let list_title_row = form.bottom().saturating_add(1).min(hint_row);
        let list_top = list_title_row.saturating_add(1).min(hint_row);
        let list = Rect::new(0, list_top, width, hint_row - list_top);

        Self {
            width,
            tab_row: 0,
            separator_row: 1,
            form,
            list_title_row,
            list,
            hint_row,
            status_row,
        }
    }

    /// Number of whole cards that fit in the list region (at least one)
    pub fn card_capacity(&self) -> usize {
        usize::from((self.list.height / CARD_HEIGHT).max(1))
    }
}

/// Centered modal box for a form with `form_fields` fields
pub fn modal_rect((width, height): (u16, u16), form_fields: usize) -> Rect {
    let modal_width = width.saturating_sub(MODAL_MARGIN * 2).min(MODAL_MAX_WIDTH);
    // border + title + blank + fields + blank + hints + border
    let modal_height = (form_fields as u16)
        .saturating_add(6)
        .min(height.saturating_sub(MODAL_MARGIN));
    let x = (width - modal_width) / 2;
    let y = height.saturating_sub(modal_height) / 2;
    Rect::new(x, y, modal_width, modal_height)
}

/// Window of card indices to draw so that `selected` stays visible
pub fn visible_range(selected: usize, len: usize, capacity: usize) -> Range<usize> {
    let capacity = capacity.max(1);
    let start = if selected >= capacity {
        selected + 1 - capacity
    } else {
        0
    };
    start..(start + capacity).min(len)
}
