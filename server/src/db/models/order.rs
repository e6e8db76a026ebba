//! Order model
//!
//! Orders snapshot the cart at checkout time: item names and unit prices are
//! copied in, never re-read from the live catalog. The only mutable fields
//! after creation are `status` (through the status machine), `updated_at`,
//! and the id of the staff notification message.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::record_link;
use crate::orders::OrderStatus;

/// Line item snapshot taken at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product reference as a `"product:id"` string
    pub product_id: String,
    pub name: String,
    /// Unit price in currency units at order time
    pub unit_price: f64,
    pub quantity: i64,
}

impl OrderItem {
    /// Line total (`unit_price * quantity`)
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// External-platform identity of the customer; absent for guest orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdentity {
    /// Telegram user id
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CustomerIdentity {
    /// Best available display name for staff-facing messages
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self
                .username
                .clone()
                .unwrap_or_else(|| self.telegram_id.to_string()),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "record_link::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    pub items: Vec<OrderItem>,
    /// Grand total in currency units; fixed at creation time
    pub total_amount: f64,
    pub phone_number: String,
    /// None for guest orders
    pub customer: Option<CustomerIdentity>,
    pub status: OrderStatus,
    /// Telegram message id of the staff notification, used to edit the
    /// status annotation in place
    pub staff_message_id: Option<i32>,
    /// RFC3339 timestamps
    pub created_at: String,
    pub updated_at: String,
}

impl Order {
    /// Id in the `"order:key"` string form, empty if not yet persisted
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }

    /// Record key without the table prefix
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|t| t.id.to_raw())
            .unwrap_or_default()
    }
}

/// Create order payload (internal, already validated)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub phone_number: String,
    pub customer: Option<CustomerIdentity>,
}

/// Filter for the admin order listing
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Free-text match against id, phone number, and customer handle
    pub query: Option<String>,
}

/// Sort key for the admin order listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortKey {
    #[default]
    CreatedAt,
    TotalAmount,
}

impl OrderSortKey {
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::TotalAmount => "total_amount",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            product_id: "product:p1".into(),
            name: "Screen".into(),
            unit_price: 1000.0,
            quantity: 2,
        };
        assert_eq!(item.line_total(), 2000.0);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut customer = CustomerIdentity {
            telegram_id: 42,
            username: Some("jdoe".into()),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
        };
        assert_eq!(customer.display_name(), "Jane Doe");

        customer.last_name = None;
        assert_eq!(customer.display_name(), "Jane");

        customer.first_name = None;
        assert_eq!(customer.display_name(), "jdoe");

        customer.username = None;
        assert_eq!(customer.display_name(), "42");
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            id: None,
            items: vec![],
            total_amount: 10.0,
            phone_number: "+79990001111".into(),
            customer: None,
            status: OrderStatus::Pending,
            staff_message_id: None,
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"totalAmount\":10.0"));
        assert!(json.contains("\"phoneNumber\""));
        assert!(json.contains("\"status\":\"pending\""));
    }
}
