// ── Add / edit form logic ──
//
// Backs the `AddShoe` and `EditShoe` destinations: validates raw form
// input into a `NewProduct`, sends it to the service, and reports the
// result through the host.

use tracing::{info, warn};

use crate::error::CoreError;
use crate::host::{Host, Notice, Route};
use crate::model::{NewProduct, Product, ProductId, format_price};
use crate::service::ProductService;

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub code: String,
    pub price: String,
    pub size: String,
}

impl ProductDraft {
    /// Pre-fill a draft from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            code: product.code.clone(),
            price: format_price(product.price),
            size: product.size.clone(),
        }
    }

    /// Check every field and build the payload sent to the service.
    pub fn validate(&self) -> Result<NewProduct, CoreError> {
        let name = required("name", &self.name)?;
        let code = required("code", &self.code)?;
        let price = parse_price(&self.price)?;
        let size = required("size", &self.size)?;
        Ok(NewProduct {
            name,
            code,
            price,
            size,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationFailed {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_price(raw: &str) -> Result<f64, CoreError> {
    let invalid = |reason: &str| CoreError::ValidationFailed {
        field: "price".into(),
        reason: reason.into(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("must not be empty"));
    }
    let price: f64 = trimmed.parse().map_err(|_| invalid("must be a number"))?;
    if !price.is_finite() {
        return Err(invalid("must be a number"));
    }
    if price < 0.0 {
        return Err(invalid("must not be negative"));
    }
    Ok(price)
}

/// Which form is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit(ProductId),
}

impl EditorMode {
    /// Mode and initial draft for a navigation destination.
    pub fn from_route(route: &Route) -> (Self, ProductDraft) {
        match route {
            Route::AddShoe => (Self::Add, ProductDraft::default()),
            Route::EditShoe(product) => (
                Self::Edit(product.id.clone()),
                ProductDraft::from_product(product),
            ),
        }
    }

    fn saved_message(&self) -> &'static str {
        match self {
            Self::Add => "Product added!",
            Self::Edit(_) => "Product updated!",
        }
    }

    fn failed_message(&self) -> &'static str {
        match self {
            Self::Add => "Could not add the product!",
            Self::Edit(_) => "Could not update the product!",
        }
    }
}

/// Result of [`ProductEditor::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Stored by the service; the host was sent back.
    Saved(Product),
    /// Rejected locally; nothing was sent.
    Invalid,
    /// The service rejected the write.
    Failed,
}

/// Form submission against a service, reporting through a host.
pub struct ProductEditor<'a, S, H> {
    service: &'a S,
    host: &'a H,
}

impl<'a, S: ProductService, H: Host> ProductEditor<'a, S, H> {
    pub fn new(service: &'a S, host: &'a H) -> Self {
        Self { service, host }
    }

    pub async fn submit(&self, mode: &EditorMode, draft: &ProductDraft) -> SubmitOutcome {
        let product = match draft.validate() {
            Ok(product) => product,
            Err(e) => {
                self.host.notify(Notice::error("Invalid input", e.to_string()));
                return SubmitOutcome::Invalid;
            }
        };

        let result = match mode {
            EditorMode::Add => self.service.create_product(&product).await,
            EditorMode::Edit(id) => self.service.update_product(id, &product).await,
        };

        match result {
            Ok(saved) => {
                info!(id = %saved.id, "product saved");
                self.host.notify(Notice::success("Success", mode.saved_message()));
                self.host.go_back();
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                warn!(error = %e, ?mode, "failed to save product");
                self.host.notify(Notice::error("Error", mode.failed_message()));
                SubmitOutcome::Failed
            }
        }
    }
}
