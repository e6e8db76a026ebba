//! Database module
//!
//! Embedded SurrealDB service. RocksDB on disk for deployments, the
//! in-memory engine for tests.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "lavka";
const DATABASE: &str = "store";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) a RocksDB-backed database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = db_path, "Database opened (RocksDB)");
        Ok(Self { db })
    }

    /// In-memory database for tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ProductCreate;
    use crate::db::repository::ProductRepository;

    #[tokio::test]
    async fn test_rocksdb_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lavka.db");
        let path = path.to_string_lossy();

        {
            let service = DbService::new(&path).await.unwrap();
            let repo = ProductRepository::new(service.db);
            repo.create(ProductCreate {
                name: "Screen".into(),
                quantity: 3,
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
        }

        // The embedded engine releases the RocksDB file lock asynchronously
        // after the handle is dropped; wait before reopening the same path.
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        let reopened = DbService::new(&path).await.unwrap();
        let repo = ProductRepository::new(reopened.db);
        let products = repo.find_all(10, 0).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Screen");
    }
}
