//! `Host` implementation that turns controller requests into [`Action`]s.
//!
//! Confirmation prompts park a oneshot sender until the app loop sees
//! `ConfirmYes` / `ConfirmNo` and calls [`TuiHost::resolve`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use shoely_core::{Choice, ConfirmPrompt, Host, Notice, Route};

use crate::action::Action;

#[derive(Clone)]
pub struct TuiHost {
    action_tx: mpsc::UnboundedSender<Action>,
    pending: Arc<Mutex<Option<oneshot::Sender<Choice>>>>,
}

impl TuiHost {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Answer the open prompt, if any.
    pub fn resolve(&self, choice: Choice) {
        if let Some(tx) = self.pending().take() {
            debug!(?choice, "prompt answered");
            let _ = tx.send(choice);
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<oneshot::Sender<Choice>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, action: Action) {
        if self.action_tx.send(action).is_err() {
            debug!("action channel closed");
        }
    }
}

impl Host for TuiHost {
    fn navigate(&self, route: Route) {
        self.send(Action::Navigate(route));
    }

    fn go_back(&self) {
        self.send(Action::GoBack);
    }

    fn notify(&self, notice: Notice) {
        self.send(Action::Notify(notice));
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> Choice {
        let (tx, rx) = oneshot::channel();
        // A newer prompt supersedes one that was never answered.
        let superseded = self.pending().replace(tx);
        if let Some(previous) = superseded {
            let _ = previous.send(Choice::Cancel);
        }
        if self.action_tx.send(Action::ShowConfirm(prompt)).is_err() {
            return Choice::Cancel;
        }
        rx.await.unwrap_or(Choice::Cancel)
    }
}

/// Host handed to one form submission. Its `go_back` closes only the
/// form it was created for, so a late save cannot close a newer form.
pub struct FormHost {
    host: TuiHost,
    form: u64,
}

impl FormHost {
    pub fn new(host: TuiHost, form: u64) -> Self {
        Self { host, form }
    }
}

impl Host for FormHost {
    fn navigate(&self, route: Route) {
        self.host.navigate(route);
    }

    fn go_back(&self) {
        self.host.send(Action::CloseForm(self.form));
    }

    fn notify(&self, notice: Notice) {
        self.host.notify(notice);
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> Choice {
        self.host.confirm(prompt).await
    }
}
