//! Shared server state
//!
//! One `ServerState` is built at startup and cloned into every handler.
//! Repositories and services are cheap to clone (they share the embedded
//! database handle); the notifier and bus are behind `Arc`.

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    ChatRepository, OrderRepository, ProductRepository, VerificationRepository,
};
use crate::message::{BusMessage, MessageBus, SyncPayload};
use crate::notify::{DisabledNotifier, Notifier, TelegramNotifier};
use crate::orders::{CheckoutService, TransitionService};
use crate::telegram::WebhookService;
use crate::utils::AppResult;

/// Per-resource version counters for the sync feed
///
/// Lock-free via DashMap; each resource type gets its own monotonically
/// increasing counter so clients can order the signals they receive.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a resource's version and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version, 0 if the resource was never bumped
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// Server state shared across all handlers
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub bus: Arc<MessageBus>,
    pub notifier: Arc<dyn Notifier>,
    pub orders: OrderRepository,
    pub products: ProductRepository,
    pub chat: ChatRepository,
    pub verification: VerificationRepository,
    pub checkout: Arc<CheckoutService>,
    pub transitions: Arc<TransitionService>,
    pub webhook: Arc<WebhookService>,
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Initialize state: open the database and wire up all services
    pub async fn initialize(config: Config) -> AppResult<Self> {
        std::fs::create_dir_all(config.database_dir()).map_err(|e| {
            crate::utils::AppError::internal(format!("Failed to create work directory: {e}"))
        })?;

        let db_path = config.database_dir().join("lavka.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        Self::with_db(config, db_service).await
    }

    /// Wire services over an already-open database (tests use the in-memory
    /// engine here)
    pub async fn with_db(config: Config, db_service: DbService) -> AppResult<Self> {
        let db = db_service.db;

        let notifier: Arc<dyn Notifier> = match &config.telegram {
            Some(telegram) => {
                tracing::info!(channel = telegram.channel_id, "Telegram notifications enabled");
                Arc::new(TelegramNotifier::new(
                    &telegram.bot_token,
                    telegram.channel_id,
                ))
            }
            None => {
                tracing::warn!("Telegram credentials missing, notifications disabled");
                Arc::new(DisabledNotifier)
            }
        };

        Ok(Self::assemble(config, db, notifier))
    }

    /// Final wiring step, also the injection point for test notifiers
    pub fn assemble(config: Config, db: Surreal<Db>, notifier: Arc<dyn Notifier>) -> Self {
        let orders = OrderRepository::new(db.clone());
        let products = ProductRepository::new(db.clone());
        let chat = ChatRepository::new(db.clone());
        let verification = VerificationRepository::new(db.clone());
        let bus = Arc::new(MessageBus::new());

        let checkout = Arc::new(CheckoutService::new(
            orders.clone(),
            products.clone(),
            notifier.clone(),
            bus.clone(),
        ));
        let transitions = Arc::new(TransitionService::new(orders.clone(), notifier.clone()));
        let webhook = Arc::new(WebhookService::new(
            transitions.clone(),
            chat.clone(),
            notifier.clone(),
            config.telegram.as_ref().map(|t| t.channel_id),
        ));

        Self {
            config,
            db,
            bus,
            notifier,
            orders,
            products,
            chat,
            verification,
            checkout,
            transitions,
            webhook,
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// Broadcast a resource change to all subscribed clients
    ///
    /// The version number is incremented per resource type so clients can
    /// detect stale or out-of-order signals.
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        let _ = self.bus.publish(BusMessage::sync(&payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("order"), 0);
        assert_eq!(versions.increment("order"), 1);
        assert_eq!(versions.increment("order"), 2);
        assert_eq!(versions.increment("product"), 1);
        assert_eq!(versions.get("order"), 2);
    }
}
