//! Order repository
//!
//! The durable record of all orders and the single write path for `status`.
//! Status values written here are assumed to have passed the status machine;
//! see `orders::transition` for the only caller.

use super::{BaseRepository, RepoError, RepoResult, make_thing};
use crate::db::models::{Order, OrderCreate, OrderFilter, OrderSortKey, SortDirection};
use crate::orders::OrderStatus;
use crate::utils::time::now_rfc3339;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

/// Tolerance for the `total == sum(line totals)` check at creation time
const TOTAL_EPSILON: f64 = 0.01;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new order with status `pending`
    ///
    /// Rejects empty carts, non-positive totals, missing phone numbers, and
    /// totals that disagree with the item snapshot.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        if data.items.is_empty() {
            return Err(RepoError::Validation("items cannot be empty".into()));
        }
        if data.total_amount <= 0.0 {
            return Err(RepoError::Validation("total must be positive".into()));
        }
        if data.phone_number.trim().is_empty() {
            return Err(RepoError::Validation("phone number is required".into()));
        }
        if data.items.iter().any(|i| i.quantity <= 0) {
            return Err(RepoError::Validation(
                "item quantities must be positive".into(),
            ));
        }
        let line_sum: f64 = data.items.iter().map(|i| i.line_total()).sum();
        if (line_sum - data.total_amount).abs() > TOTAL_EPSILON {
            return Err(RepoError::Validation(format!(
                "total {} does not match item sum {}",
                data.total_amount, line_sum
            )));
        }

        let now = now_rfc3339();
        let order = Order {
            id: None,
            items: data.items,
            total_amount: data.total_amount,
            phone_number: data.phone_number,
            customer: data.customer,
            status: OrderStatus::Pending,
            staff_message_id: None,
            created_at: now.clone(),
            updated_at: now,
        };

        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    /// Find order by id (`"order:key"` or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = make_thing(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, thing.id.to_raw())).await?;
        Ok(order)
    }

    /// Write a new status and bump `updated_at`, guarded on the status the
    /// caller validated against
    ///
    /// Single conditional statement: the write only matches while the stored
    /// status is still `from`, so two racing transitions cannot both land —
    /// the loser matches zero rows and gets `None`. Does not check
    /// transition legality; callers go through the status machine first.
    pub async fn update_status(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let thing = make_thing(ORDER_TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET status = $to, updated_at = $now \
                 WHERE status = $from RETURN AFTER",
            )
            .bind(("order", thing))
            .bind(("from", from))
            .bind(("to", to))
            .bind(("now", now_rfc3339()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Remember the Telegram message id of the staff notification so later
    /// transitions can edit the annotation in place
    pub async fn set_staff_message(&self, id: &str, message_id: i32) -> RepoResult<Order> {
        let thing = make_thing(ORDER_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $order SET staff_message_id = $message_id RETURN AFTER")
            .bind(("order", thing))
            .bind(("message_id", message_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id}")))
    }

    /// List orders with optional status filter, free-text search, and sort
    ///
    /// The free-text query matches the order id, the phone number, and the
    /// customer username, case-insensitively. Produces a finite page; no
    /// cursor state is kept between calls.
    pub async fn find_all(
        &self,
        filter: &OrderFilter,
        sort: OrderSortKey,
        direction: SortDirection,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Order>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.query.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(<string>id), $q) \
                 OR string::contains(string::lowercase(phone_number), $q) \
                 OR string::contains(string::lowercase(customer.username ?? ''), $q))",
            );
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let limit = limit.clamp(1, 500);
        let offset = offset.max(0);
        let sql = format!(
            "SELECT * FROM {ORDER_TABLE}{where_clause} ORDER BY {} {} LIMIT {limit} START {offset}",
            sort.column(),
            direction.keyword(),
        );

        let mut query = self.base.db().query(sql);
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(q) = &filter.query {
            query = query.bind(("q", q.to_lowercase()));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }
}
