//! Product model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::record_link;

/// Product entity
///
/// `quantity` is the on-hand stock and must never go negative; all mutations
/// go through the conditional updates in the product repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(
        default,
        with = "record_link::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    pub name: String,
    /// On-hand stock, non-negative
    pub quantity: i64,
    /// Retail price in currency units
    pub retail_price: f64,
    /// Gates storefront display; hidden products stay editable by staff
    pub is_visible: bool,
    pub category: Option<String>,
    pub code: Option<String>,
    pub article: Option<String>,
    pub warranty: Option<String>,
    pub photo_url: Option<String>,
}

impl Product {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub quantity: i64,
    pub retail_price: f64,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    pub category: Option<String>,
    pub code: Option<String>,
    pub article: Option<String>,
    pub warranty: Option<String>,
    pub photo_url: Option<String>,
}

fn default_visible() -> bool {
    true
}

/// Partial update payload; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub retail_price: Option<f64>,
    pub is_visible: Option<bool>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub article: Option<String>,
    pub warranty: Option<String>,
    pub photo_url: Option<String>,
}
