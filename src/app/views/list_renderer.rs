//! # List Renderer
//!
//! Turns records into display cards. A list region is always replaced
//! wholesale; there is no diffing against what was shown before.

use crate::app::models::{RecordId, Resource, ResourceKind};

/// One rendered record, or the empty-list placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: Option<RecordId>,
    heading: String,
    details: Vec<(String, String)>,
}

impl Card {
    pub fn new(id: RecordId, heading: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            heading: heading.into(),
            details: Vec::new(),
        }
    }

    /// Card without edit/delete actions
    pub fn placeholder(kind: ResourceKind) -> Self {
        Self {
            id: None,
            heading: format!("No {} found. Add one!", kind.plural_title().to_lowercase()),
            details: Vec::new(),
        }
    }

    pub fn detail(mut self, label: &str, value: impl Into<String>) -> Self {
        self.details.push((label.to_string(), value.into()));
        self
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn details(&self) -> &[(String, String)] {
        &self.details
    }

    /// Edit and delete are only offered on real records
    pub fn has_actions(&self) -> bool {
        self.id.is_some()
    }

    /// Detail line, e.g. `Age: 20 · Email: a@x.com`
    pub fn summary(&self) -> String {
        self.details
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// Render records in server order; an empty slice yields a single placeholder
pub fn render_list<R: Resource>(records: &[R]) -> Vec<Card> {
    if records.is_empty() {
        return vec![Card::placeholder(R::KIND)];
    }
    records.iter().map(Resource::card).collect()
}

/// The rendered cards of one resource kind plus the selection cursor
#[derive(Debug, Clone)]
pub struct ListRegion {
    kind: ResourceKind,
    cards: Vec<Card>,
    selected: usize,
    loaded: bool,
}

impl ListRegion {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            cards: Vec::new(),
            selected: 0,
            loaded: false,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Clear all previous cards and show `cards` instead
    pub fn replace(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.loaded = true;
        self.selected = self.selected.min(self.cards.len().saturating_sub(1));
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards that stand for real records
    pub fn record_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.has_actions())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards.get(self.selected)
    }

    /// Id of the selected card, if it offers actions
    pub fn selected_id(&self) -> Option<&RecordId> {
        self.selected_card().and_then(Card::id)
    }

    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
            return true;
        }
        false
    }

    pub fn select_prev(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            return true;
        }
        false
    }
}
