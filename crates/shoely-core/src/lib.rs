// shoely-core: Product list controller between shoely-api and a host UI.

pub mod config;
pub mod controller;
pub mod convert;
pub mod editor;
pub mod error;
pub mod host;
pub mod model;
pub mod service;
pub mod state;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ServiceConfig, TlsVerification};
pub use controller::{DeleteOutcome, ProductListController};
pub use editor::{EditorMode, ProductDraft, ProductEditor, SubmitOutcome};
pub use error::CoreError;
pub use host::{Choice, ConfirmPrompt, Host, Notice, NoticeLevel, Route};
pub use model::{NewProduct, Product, ProductId, format_price};
pub use service::{HttpProductService, ProductService};
pub use state::{FetchKind, ListEvent, ListState};
