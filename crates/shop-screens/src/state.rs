//! Observable screen state.

use serde::Serialize;
use tokio::sync::watch;

/// Message shown for any failed load.
pub const GENERIC_ERROR: &str = "Something went wrong!";

/// State of a screen.
///
/// Events that modify a screen only act on `Content`; in `Loading` or
/// `Error` they are ignored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState<C> {
    Loading,
    Content(C),
    Error(String),
}

impl<C> ViewState<C> {
    pub fn content(&self) -> Option<&C> {
        match self {
            ViewState::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<C> Default for ViewState<C> {
    fn default() -> Self {
        ViewState::Loading
    }
}

/// Holds one screen's current [`ViewState`] and publishes every change.
///
/// Each transition swaps or edits the whole snapshot under the channel's
/// lock, so readers never see a half-applied event.
#[derive(Debug)]
pub struct StateCell<C> {
    tx: watch::Sender<ViewState<C>>,
}

impl<C: Clone> StateCell<C> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ViewState::Loading);
        Self { tx }
    }

    /// A copy of the current snapshot.
    pub fn get(&self) -> ViewState<C> {
        self.tx.borrow().clone()
    }

    /// A copy of the current content, if any.
    pub fn content(&self) -> Option<C> {
        self.tx.borrow().content().cloned()
    }

    /// Read from the current content without copying it.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.tx.borrow().content().map(f)
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    pub fn has_content(&self) -> bool {
        self.tx.borrow().content().is_some()
    }

    /// Observe snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ViewState<C>> {
        self.tx.subscribe()
    }

    /// Replace the whole snapshot.
    pub fn replace(&self, state: ViewState<C>) {
        self.tx.send_replace(state);
    }

    /// Edit the content in place. Returns `None` when there is no content.
    pub fn update<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        let mut out = None;
        self.tx.send_if_modified(|state| match state {
            ViewState::Content(content) => {
                out = Some(f(content));
                true
            }
            _ => false,
        });
        out
    }

    /// Edit the content only if `f` reports a change.
    ///
    /// `f` runs under the channel lock, so check-and-set sequences in it are
    /// atomic with respect to other events. Returns whether anything changed.
    pub fn modify(&self, f: impl FnOnce(&mut C) -> bool) -> bool {
        self.tx.send_if_modified(|state| match state {
            ViewState::Content(content) => f(content),
            _ => false,
        })
    }
}

impl<C: Clone> Default for StateCell<C> {
    fn default() -> Self {
        Self::new()
    }
}
