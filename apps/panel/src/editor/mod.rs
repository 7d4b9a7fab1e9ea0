//! Job Record Editor — the editable card list.
//!
//! `render` turns job entries into cards of tagged text controls; edits land
//! in the controls only; `collect` is the single path that turns the
//! visible controls back into job entries.

pub mod markup;

use crate::models::{JobEntry, JobField};

/// At most this many cards are shown. Extra entries are not rendered but
/// stay in the caller's list.
pub const DISPLAY_CAP: usize = 25;

pub const EMPTY_STATE: &str = "No jobs found.";

/// One editable text control, tagged with the field it reconstructs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub field: JobField,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    controls: Vec<Control>,
}

impl JobCard {
    fn from_entry(entry: &JobEntry) -> Self {
        Self {
            controls: JobField::ALL
                .into_iter()
                .map(|field| Control {
                    field,
                    value: entry.get(field).to_string(),
                })
                .collect(),
        }
    }

    pub fn value(&self, field: JobField) -> &str {
        self.controls
            .iter()
            .find(|c| c.field == field)
            .map_or("", |c| c.value.as_str())
    }

    fn to_entry(&self) -> JobEntry {
        let mut entry = JobEntry::default();
        for control in &self.controls {
            entry.set(control.field, control.value.clone());
        }
        entry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Display {
    #[default]
    Blank,
    Empty,
    Cards,
}

#[derive(Debug, Default)]
pub struct JobEditor {
    cards: Vec<JobCard>,
    display: Display,
}

impl JobEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was shown. An empty list shows the empty-state
    /// message instead of zero cards.
    pub fn render(&mut self, jobs: &[JobEntry]) {
        self.cards = jobs
            .iter()
            .take(DISPLAY_CAP)
            .map(JobCard::from_entry)
            .collect();
        self.display = if self.cards.is_empty() {
            Display::Empty
        } else {
            Display::Cards
        };
    }

    /// Removes all cards without showing the empty-state message.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.display = Display::Blank;
    }

    pub fn cards(&self) -> &[JobCard] {
        &self.cards
    }

    pub fn is_empty_state(&self) -> bool {
        self.display == Display::Empty
    }

    /// In-place edit of one control. Returns `false` if there is no such card.
    pub fn set_field(&mut self, card: usize, field: JobField, value: impl Into<String>) -> bool {
        let Some(control) = self
            .cards
            .get_mut(card)
            .and_then(|c| c.controls.iter_mut().find(|ctl| ctl.field == field))
        else {
            return false;
        };
        control.value = value.into();
        true
    }

    /// Rebuilds one entry per displayed card, in display order, from the
    /// current control values. Cleared controls become empty strings.
    pub fn collect(&self) -> Vec<JobEntry> {
        self.cards.iter().map(JobCard::to_entry).collect()
    }

    /// The display structure as HTML, every value escaped.
    pub fn markup(&self) -> String {
        match self.display {
            Display::Blank => String::new(),
            Display::Empty => markup::empty_state(EMPTY_STATE),
            Display::Cards => self
                .cards
                .iter()
                .enumerate()
                .map(|(i, card)| markup::card(i, card))
                .collect(),
        }
    }
}
