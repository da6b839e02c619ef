// ── Domain model ──
//
// `Product` is the read-only snapshot the list view renders. The remote
// service owns the lifecycle; the controller only ever replaces the whole
// sequence.

use std::fmt;

/// Stable identifier assigned by the product service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A shoe product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Product code.
    pub code: String,
    /// Price in the service's unit (no currency attached).
    pub price: f64,
    pub size: String,
}

/// Validated fields for creating or replacing a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub price: f64,
    pub size: String,
}

/// Render a price without a trailing `.0` for whole amounts.
pub fn format_price(price: f64) -> String {
    format!("{price}")
}
