// Wire types for the shoe REST resource.
//
// The service speaks Vietnamese field names (`tenSanPham`, `maSanPham`,
// `giaSanPham`) and is loose about scalar types: ids and sizes arrive as
// numbers or strings, prices as numbers or numeric strings. Everything is
// normalized on decode so callers only ever see one shape.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

// ── ShoeId ──────────────────────────────────────────────────────────

/// Identifier assigned by the service. Always held as its string form,
/// which is also what goes into `/{resource}/{id}` paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShoeId(String);

impl ShoeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShoeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShoeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for ShoeId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ShoeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Scalar::deserialize(deserializer)? {
            Scalar::Null(()) => Err(de::Error::custom("shoe id must not be null")),
            other => Ok(Self(other.into_text())),
        }
    }
}

// ── Shoe ────────────────────────────────────────────────────────────

/// A shoe record as returned by `GET /{resource}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shoe {
    pub id: ShoeId,
    #[serde(rename = "tenSanPham", default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(rename = "maSanPham", default, deserialize_with = "de_text")]
    pub code: String,
    #[serde(rename = "giaSanPham", default, deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "de_text")]
    pub size: String,
}

/// Request body for `POST /{resource}` and `PUT /{resource}/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoeWrite {
    #[serde(rename = "tenSanPham")]
    pub name: String,
    #[serde(rename = "maSanPham")]
    pub code: String,
    #[serde(rename = "giaSanPham")]
    pub price: f64,
    pub size: String,
}

// ── Lenient scalar decoding ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Null(()),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Null(()) => String::new(),
        }
    }
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn de_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Scalar::deserialize(deserializer)? {
        Scalar::Unsigned(n) => Ok(n as f64),
        Scalar::Signed(n) => Ok(n as f64),
        Scalar::Float(n) => Ok(n),
        Scalar::Null(()) => Ok(0.0),
        Scalar::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("price is not a number: {s:?}"))),
    }
}
