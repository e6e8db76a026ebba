//! Product repository
//!
//! Owns every mutation of `Product.quantity`. Stock changes are single
//! conditional `UPDATE` statements, so two concurrent checkouts can never
//! drive a quantity negative — the losing writer simply matches zero rows.

use super::{BaseRepository, RepoError, RepoResult, make_thing};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products visible on the storefront
    pub async fn find_visible(&self, limit: i64, offset: i64) -> RepoResult<Vec<Product>> {
        let limit = limit.clamp(1, 500);
        let offset = offset.max(0);
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM {PRODUCT_TABLE} WHERE is_visible = true ORDER BY name LIMIT {limit} START {offset}"
            ))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find all products including hidden ones (back-office listing)
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Product>> {
        let limit = limit.clamp(1, 500);
        let offset = offset.max(0);
        let products: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM {PRODUCT_TABLE} ORDER BY name LIMIT {limit} START {offset}"
            ))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing = make_thing(PRODUCT_TABLE, id);
        let product: Option<Product> = self
            .base
            .db()
            .select((PRODUCT_TABLE, thing.id.to_raw()))
            .await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.quantity < 0 {
            return Err(RepoError::Validation("quantity cannot be negative".into()));
        }
        if data.retail_price < 0.0 {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }

        let product = Product {
            id: None,
            name: data.name,
            quantity: data.quantity,
            retail_price: data.retail_price,
            is_visible: data.is_visible,
            category: data.category,
            code: data.code,
            article: data.article,
            warranty: data.warranty,
            photo_url: data.photo_url,
        };

        let created: Option<Product> =
            self.base.db().create(PRODUCT_TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".into()))
    }

    /// Update descriptive fields of a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let thing = make_thing(PRODUCT_TABLE, id);

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.retail_price.is_some() {
            set_parts.push("retail_price = $retail_price");
        }
        if data.is_visible.is_some() {
            set_parts.push("is_visible = $is_visible");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.code.is_some() {
            set_parts.push("code = $code");
        }
        if data.article.is_some() {
            set_parts.push("article = $article");
        }
        if data.warranty.is_some() {
            set_parts.push("warranty = $warranty");
        }
        if data.photo_url.is_some() {
            set_parts.push("photo_url = $photo_url");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {id}")));
        }

        let sql = format!("UPDATE $product SET {} RETURN AFTER", set_parts.join(", "));
        let mut query = self.base.db().query(sql).bind(("product", thing));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.retail_price {
            query = query.bind(("retail_price", v));
        }
        if let Some(v) = data.is_visible {
            query = query.bind(("is_visible", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.code {
            query = query.bind(("code", v));
        }
        if let Some(v) = data.article {
            query = query.bind(("article", v));
        }
        if let Some(v) = data.warranty {
            query = query.bind(("warranty", v));
        }
        if let Some(v) = data.photo_url {
            query = query.bind(("photo_url", v));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {id}")))
    }

    /// Conditionally take `amount` units of stock
    ///
    /// Single atomic statement: matches only while `quantity >= amount`, so
    /// the invariant `quantity >= 0` holds under concurrent checkouts.
    /// Returns the updated product, or `None` when stock was insufficient
    /// (the caller decides whether that fails the order). A missing product
    /// also yields `None`.
    pub async fn try_decrement(&self, id: &str, amount: i64) -> RepoResult<Option<Product>> {
        if amount <= 0 {
            return Err(RepoError::Validation(
                "decrement amount must be positive".into(),
            ));
        }
        let thing = make_thing(PRODUCT_TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $product SET quantity = quantity - $amount \
                 WHERE quantity >= $amount RETURN AFTER",
            )
            .bind(("product", thing))
            .bind(("amount", amount))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Return previously taken stock (checkout compensation path)
    pub async fn increment(&self, id: &str, amount: i64) -> RepoResult<Option<Product>> {
        if amount <= 0 {
            return Err(RepoError::Validation(
                "increment amount must be positive".into(),
            ));
        }
        let thing = make_thing(PRODUCT_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $product SET quantity = quantity + $amount RETURN AFTER")
            .bind(("product", thing))
            .bind(("amount", amount))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Manual staff stock adjustment (+/- controls in the back office)
    ///
    /// Rejects adjustments that would take the quantity below zero.
    pub async fn adjust(&self, id: &str, delta: i64) -> RepoResult<Product> {
        if delta == 0 {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {id}")));
        }

        let updated = if delta > 0 {
            self.increment(id, delta).await?
        } else {
            self.try_decrement(id, -delta).await?
        };

        match updated {
            Some(product) => Ok(product),
            None => {
                // Distinguish "missing product" from "would go negative"
                match self.find_by_id(id).await? {
                    Some(product) => Err(RepoError::Validation(format!(
                        "adjustment {delta} would make quantity negative (current {})",
                        product.quantity
                    ))),
                    None => Err(RepoError::NotFound(format!("Product {id}"))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::ProductCreate;

    async fn repo_with_product(quantity: i64) -> (ProductRepository, String) {
        let service = DbService::memory().await.unwrap();
        let repo = ProductRepository::new(service.db);
        let product = repo
            .create(ProductCreate {
                name: "Screen".into(),
                quantity,
                retail_price: 1000.0,
                is_visible: true,
                category: None,
                code: None,
                article: None,
                warranty: None,
                photo_url: None,
            })
            .await
            .unwrap();
        let id = product.id_string();
        (repo, id)
    }

    #[tokio::test]
    async fn test_adjust_applies_positive_and_negative_deltas() {
        let (repo, id) = repo_with_product(5).await;

        let up = repo.adjust(&id, 3).await.unwrap();
        assert_eq!(up.quantity, 8);

        let down = repo.adjust(&id, -8).await.unwrap();
        assert_eq!(down.quantity, 0);
    }

    #[tokio::test]
    async fn test_adjust_zero_delta_is_a_read() {
        let (repo, id) = repo_with_product(5).await;
        let same = repo.adjust(&id, 0).await.unwrap();
        assert_eq!(same.quantity, 5);
    }

    #[tokio::test]
    async fn test_adjust_rejects_going_below_zero() {
        let (repo, id) = repo_with_product(2).await;

        let err = repo.adjust(&id, -3).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        // The rejected adjustment left the stock untouched
        let product = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 2);
    }

    #[tokio::test]
    async fn test_adjust_missing_product_is_not_found() {
        let (repo, _) = repo_with_product(2).await;
        let err = repo.adjust("doesnotexist", -1).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        let err = repo.adjust("doesnotexist", 1).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
