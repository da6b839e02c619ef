//! All possible UI actions. Actions are the sole mechanism for state mutation.

use shoely_core::{ConfirmPrompt, EditorMode, ListState, Notice, Product, ProductDraft, Route};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation (from the host) ────────────────────────────────
    Navigate(Route),
    GoBack,
    /// A save finished on the form opened with this serial.
    CloseForm(u64),

    // ── Data events (from the controller's watch channel) ─────────
    ListUpdated(ListState),

    // ── List commands ─────────────────────────────────────────────
    RequestRefresh,
    RequestAdd,
    RequestEdit(Product),
    RequestDelete(Product),

    // ── Form ──────────────────────────────────────────────────────
    SubmitForm(EditorMode, ProductDraft),

    // ── Confirm dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmPrompt),
    ConfirmYes,
    ConfirmNo,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notice),
    DismissNotification,
}
