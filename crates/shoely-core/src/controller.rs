// ── Product list controller ──
//
// Mediates between the remote product service and the host UI. Owns the
// list state (items + loading/refreshing flags) and publishes every
// transition on a `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::host::{Choice, ConfirmPrompt, Host, Notice, Route};
use crate::model::{Product, ProductId};
use crate::service::ProductService;
use crate::state::{FetchKind, ListEvent, ListState};

/// Result of [`ProductListController::request_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user backed out; nothing was sent.
    Cancelled,
    /// The service deleted the product and the list was reloaded.
    Deleted,
    /// The service rejected the delete; the list is untouched.
    Failed,
}

/// Controller behind the product list screen.
///
/// Cheaply cloneable via `Arc`; clones share state, service and host.
pub struct ProductListController<S, H> {
    inner: Arc<ControllerInner<S, H>>,
}

struct ControllerInner<S, H> {
    service: S,
    host: H,
    state: watch::Sender<ListState>,
}

impl<S, H> Clone for ProductListController<S, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ProductService, H: Host> ProductListController<S, H> {
    /// Create a controller in the initial-loading state. Nothing is
    /// fetched until [`on_screen_focus()`](Self::on_screen_focus) or
    /// [`load()`](Self::load) runs.
    pub fn new(service: S, host: H) -> Self {
        let (state, _) = watch::channel(ListState::new());
        Self {
            inner: Arc::new(ControllerInner {
                service,
                host,
                state,
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ListState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.inner.state.subscribe()
    }

    pub fn service(&self) -> &S {
        &self.inner.service
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    // ── Fetching ─────────────────────────────────────────────────

    /// Fetch the full product collection and replace the list.
    ///
    /// On failure the previous items stay in place and the host shows an
    /// error notice. The busy flags are settled however the fetch ends,
    /// including when the future is dropped mid-flight.
    pub async fn load(&self) {
        self.fetch(FetchKind::Load).await;
    }

    /// Pull-to-refresh: raise the refreshing flag, then fetch.
    pub async fn refresh(&self) {
        self.fetch(FetchKind::Refresh).await;
    }

    /// The list became the active screen. Always a full refetch.
    pub async fn on_screen_focus(&self) {
        debug!("product list focused");
        self.load().await;
    }

    async fn fetch(&self, kind: FetchKind) {
        let guard = FetchGuard::begin(&self.inner.state, kind);
        debug!(generation = guard.generation, ?kind, "fetching products");

        match self.inner.service.list_products().await {
            Ok(items) => {
                info!(count = items.len(), generation = guard.generation, "product list loaded");
                guard.settle(Some(items));
            }
            Err(e) => {
                warn!(error = %e, generation = guard.generation, "failed to load products");
                guard.settle(None);
                self.inner.host.notify(Notice::load_failed());
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Ask for confirmation, then delete `id` and reload on success.
    pub async fn request_delete(&self, id: &ProductId, display_name: &str) -> DeleteOutcome {
        let choice = self
            .inner
            .host
            .confirm(ConfirmPrompt::delete(display_name))
            .await;

        if choice == Choice::Cancel {
            debug!(%id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.inner.service.delete_product(id).await {
            Ok(()) => {
                info!(%id, "product deleted");
                self.inner.host.notify(Notice::deleted());
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to delete product");
                self.inner.host.notify(Notice::delete_failed());
                DeleteOutcome::Failed
            }
        }
    }

    // ── Navigation ───────────────────────────────────────────────

    pub fn navigate_to_edit(&self, item: &Product) {
        self.inner.host.navigate(Route::EditShoe(item.clone()));
    }

    pub fn navigate_to_add(&self) {
        self.inner.host.navigate(Route::AddShoe);
    }
}

// ── Fetch guard ──────────────────────────────────────────────────

/// Registers a fetch on creation and settles it exactly once: explicitly
/// through [`settle`](Self::settle), or as a failure on drop.
struct FetchGuard<'a> {
    state: &'a watch::Sender<ListState>,
    generation: u64,
    settled: bool,
}

impl<'a> FetchGuard<'a> {
    fn begin(state: &'a watch::Sender<ListState>, kind: FetchKind) -> Self {
        let mut generation = 0;
        state.send_modify(|s| {
            generation = s.next_generation();
            apply(s, ListEvent::Started { generation, kind });
        });
        Self {
            state,
            generation,
            settled: false,
        }
    }

    fn settle(mut self, items: Option<Vec<Product>>) {
        self.settled = true;
        let generation = self.generation;
        self.state
            .send_modify(|s| apply(s, ListEvent::Settled { generation, items }));
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let generation = self.generation;
            debug!(generation, "fetch abandoned");
            self.state.send_modify(|s| {
                apply(s, ListEvent::Settled {
                    generation,
                    items: None,
                });
            });
        }
    }
}

fn apply(state: &mut ListState, event: ListEvent) {
    *state = std::mem::take(state).reduce(event);
}
