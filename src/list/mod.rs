pub mod pagination;
pub mod professors;
pub mod students;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::dom::{DomError, Document, Node};

pub use professors::ProfessorsLeaderboard;
pub use students::StudentsLeaderboard;

pub const TAB_CONTENT_CLASS: &str = "tab-content";
pub const TAB_BUTTON_CLASS: &str = "tab-btn";
pub const ACTIVE_CLASS: &str = "active";

pub const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

#[derive(Clone, Debug, PartialEq)]
pub enum ListState {
    Idle,
    Loading,
    Rendered,
    Failed(String),
}

/// Identifies one `load` call; only the newest ticket may render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct ListView {
    generation: AtomicU64,
    state: Mutex<ListState>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            state: Mutex::new(ListState::Idle),
        }
    }

    pub fn begin(&self) -> LoadTicket {
        let ticket = LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.set_state(ListState::Loading);
        ticket
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Records the final state unless a newer load superseded `ticket`.
    pub fn finish(&self, ticket: LoadTicket, state: ListState) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.set_state(state);
        true
    }

    pub fn state(&self) -> ListState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_state(&self, state: ListState) {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }
}

pub fn medal(rank: u64) -> Option<&'static str> {
    match rank {
        1..=3 => Some(MEDALS[(rank - 1) as usize]),
        _ => None,
    }
}

pub fn rank_label(rank: u64) -> String {
    medal(rank)
        .map(str::to_string)
        .unwrap_or_else(|| rank.to_string())
}

pub fn switch_tab(doc: &mut Document, tab: &str, trigger: &str) -> Result<(), DomError> {
    for id in doc.ids_with_class(TAB_CONTENT_CLASS) {
        doc.get_mut(&id)?.remove_class(ACTIVE_CLASS);
    }
    for id in doc.ids_with_class(TAB_BUTTON_CLASS) {
        doc.get_mut(&id)?.remove_class(ACTIVE_CLASS);
    }
    let tab_id = format!("{tab}-tab");
    if let Ok(el) = doc.get_mut(&tab_id) {
        el.add_class(ACTIVE_CLASS);
    }
    doc.get_mut(trigger)?.add_class(ACTIVE_CLASS);
    Ok(())
}

pub fn activate_exclusive(doc: &mut Document, class: &str, trigger: &str) -> Result<(), DomError> {
    for id in doc.ids_with_class(class) {
        doc.get_mut(&id)?.remove_class(ACTIVE_CLASS);
    }
    doc.get_mut(trigger)?.add_class(ACTIVE_CLASS);
    Ok(())
}

pub fn error_placeholder(tag: &'static str, message: &str) -> Node {
    Node::element(tag)
        .class("load-error")
        .attr("role", "alert")
        .child(Node::text(message))
}
