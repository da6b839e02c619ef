// ── List view state ──
//
// Reducer-style state for the product list. Every mutation is a
// `ListEvent` folded into a fresh `ListState`, so overlapping fetches
// resolve deterministically.
//
// Each fetch carries a generation number. A settled fetch only replaces
// the items when it is newer than the last one applied, and the busy
// flags drop only once the newest issued fetch has settled.

use std::sync::Arc;

use crate::model::Product;

/// Why a fetch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Initial load, screen focus, or post-mutation reload.
    Load,
    /// User-initiated pull-to-refresh.
    Refresh,
}

/// Observable state of the product list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Products in the order the service returned them.
    pub items: Arc<Vec<Product>>,
    /// True until the very first fetch settles.
    pub loading: bool,
    /// True while a pull-to-refresh cycle is in flight.
    pub refreshing: bool,
    /// Highest generation handed out so far.
    issued: u64,
    /// Generation whose payload currently backs `items`.
    applied: u64,
}

/// Transitions accepted by [`ListState::reduce`].
#[derive(Debug, Clone)]
pub enum ListEvent {
    Started {
        generation: u64,
        kind: FetchKind,
    },
    /// `items` is `None` when the fetch failed or was abandoned.
    Settled {
        generation: u64,
        items: Option<Vec<Product>>,
    },
}

impl ListState {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            loading: true,
            refreshing: false,
            issued: 0,
            applied: 0,
        }
    }

    /// Generation number for the next fetch.
    pub fn next_generation(&self) -> u64 {
        self.issued + 1
    }

    /// Either busy flag is raised.
    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fold one event into the state.
    #[must_use]
    pub fn reduce(self, event: ListEvent) -> Self {
        match event {
            ListEvent::Started { generation, kind } => Self {
                issued: self.issued.max(generation),
                refreshing: self.refreshing || kind == FetchKind::Refresh,
                ..self
            },
            ListEvent::Settled { generation, items } => {
                let latest = generation >= self.issued;
                let (items, applied) = match items {
                    Some(items) if generation > self.applied => (Arc::new(items), generation),
                    _ => (self.items, self.applied),
                };
                Self {
                    items,
                    applied,
                    loading: self.loading && !latest,
                    refreshing: self.refreshing && !latest,
                    issued: self.issued,
                }
            }
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}
