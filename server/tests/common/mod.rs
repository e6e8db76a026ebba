//! Shared test harness: in-memory server state and a recording notifier.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;

use lavka_server::core::{Config, ServerState, TelegramConfig};
use lavka_server::db::DbService;
use lavka_server::db::models::{ChatMessage, Order, Product, ProductCreate};
use lavka_server::notify::{ContactMessage, Notifier, format};
use lavka_server::orders::OrderStatus;
use lavka_server::utils::{AppError, AppResult};

/// Staff channel id used by tests that exercise the webhook reply path
pub const TEST_CHANNEL_ID: i64 = -100500;

/// Notifier that records every delivery instead of talking to Telegram
#[derive(Default)]
pub struct RecordingNotifier {
    next_message_id: AtomicI32,
    /// When set, staff new-order deliveries fail with an upstream error
    pub fail_staff: AtomicBool,
    pub staff_orders: Mutex<Vec<Order>>,
    pub annotations: Mutex<Vec<Order>>,
    pub customer_notices: Mutex<Vec<(i64, OrderStatus)>>,
    pub staff_relays: Mutex<Vec<String>>,
    pub customer_texts: Mutex<Vec<(i64, String)>>,
    pub verification_codes: Mutex<Vec<(i64, String)>>,
    pub contact_forms: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_message_id: AtomicI32::new(100),
            ..Self::default()
        })
    }

    pub fn customer_notice_count(&self) -> usize {
        self.customer_notices.lock().unwrap().len()
    }

    pub fn last_customer_notice(&self) -> Option<(i64, OrderStatus)> {
        self.customer_notices.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn staff_new_order(&self, order: &Order) -> AppResult<Option<i32>> {
        if self.fail_staff.load(Ordering::SeqCst) {
            return Err(AppError::upstream("staff channel unreachable"));
        }
        self.staff_orders.lock().unwrap().push(order.clone());
        Ok(Some(self.next_message_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn staff_annotate_order(&self, order: &Order) -> AppResult<()> {
        self.annotations.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn customer_status_changed(&self, order: &Order) -> AppResult<()> {
        let Some(customer) = &order.customer else {
            return Ok(());
        };
        self.customer_notices
            .lock()
            .unwrap()
            .push((customer.telegram_id, order.status));
        Ok(())
    }

    async fn relay_chat_to_staff(
        &self,
        message: &ChatMessage,
        display_name: Option<&str>,
    ) -> AppResult<()> {
        self.staff_relays
            .lock()
            .unwrap()
            .push(format::chat_to_staff_text(message, display_name));
        Ok(())
    }

    async fn send_customer_text(&self, telegram_id: i64, text: &str) -> AppResult<()> {
        self.customer_texts
            .lock()
            .unwrap()
            .push((telegram_id, text.to_string()));
        Ok(())
    }

    async fn send_verification_code(&self, telegram_id: i64, code: &str) -> AppResult<()> {
        self.verification_codes
            .lock()
            .unwrap()
            .push((telegram_id, code.to_string()));
        Ok(())
    }

    async fn relay_contact_form(&self, form: &ContactMessage) -> AppResult<()> {
        self.contact_forms.lock().unwrap().push(form.name.clone());
        Ok(())
    }

    async fn ack_callback(&self, _callback_query_id: &str) -> AppResult<()> {
        Ok(())
    }
}

fn test_config() -> Config {
    Config {
        work_dir: ".".into(),
        http_port: 0,
        environment: "test".into(),
        request_timeout_ms: 30_000,
        telegram: Some(TelegramConfig {
            bot_token: "test-token".into(),
            channel_id: TEST_CHANNEL_ID,
        }),
    }
}

/// In-memory server state wired to the given notifier
pub async fn test_state(notifier: Arc<dyn Notifier>) -> ServerState {
    let db_service = DbService::memory().await.expect("in-memory database");
    ServerState::assemble(test_config(), db_service.db, notifier)
}

/// Seed one product and return it
pub async fn seed_product(state: &ServerState, name: &str, quantity: i64, price: f64) -> Product {
    state
        .products
        .create(ProductCreate {
            name: name.into(),
            quantity,
            retail_price: price,
            is_visible: true,
            category: None,
            code: None,
            article: None,
            warranty: None,
            photo_url: None,
        })
        .await
        .expect("seed product")
}
