//! Data bridge: forwards controller state changes to TUI actions.
//!
//! Runs as a background task: pushes the current [`ListState`] snapshot,
//! then one [`Action::ListUpdated`] per transition until cancelled or the
//! controller goes away.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use shoely_core::ListState;

use crate::action::Action;

pub async fn spawn_data_bridge(
    mut state: watch::Receiver<ListState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let initial = state.borrow_and_update().clone();
    if action_tx.send(Action::ListUpdated(initial)).is_err() {
        return;
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = state.borrow_and_update().clone();
                debug!(
                    items = snapshot.items.len(),
                    loading = snapshot.loading,
                    refreshing = snapshot.refreshing,
                    "dispatching ListUpdated"
                );
                if action_tx.send(Action::ListUpdated(snapshot)).is_err() {
                    break;
                }
            }
        }
    }

    debug!("data bridge shut down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_initial_snapshot_and_changes() {
        let (state_tx, state_rx) = watch::channel(ListState::new());
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(state_rx, action_tx, cancel.clone()));

        let first = action_rx.recv().await.unwrap();
        assert!(matches!(first, Action::ListUpdated(ref s) if s.loading));

        state_tx.send_modify(|s| s.loading = false);
        let second = action_rx.recv().await.unwrap();
        assert!(matches!(second, Action::ListUpdated(ref s) if !s.loading));

        cancel.cancel();
        bridge.await.unwrap();
    }

    #[tokio::test]
    async fn stops_when_controller_drops() {
        let (state_tx, state_rx) = watch::channel(ListState::new());
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let bridge = tokio::spawn(spawn_data_bridge(
            state_rx,
            action_tx,
            CancellationToken::new(),
        ));

        action_rx.recv().await.unwrap();
        drop(state_tx);
        bridge.await.unwrap();
        assert!(action_rx.recv().await.is_none());
    }
}
