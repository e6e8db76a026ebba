//! Order lifecycle driven through the Telegram webhook.

mod common;

use common::{RecordingNotifier, seed_product, test_state};
use lavka_server::core::ServerState;
use lavka_server::db::models::{CustomerIdentity, Order, OrderCreate, OrderItem};
use lavka_server::orders::OrderStatus;
use lavka_server::telegram::TelegramUpdate;
use lavka_server::telegram::update::CallbackQueryPayload;

fn callback(token: &str) -> TelegramUpdate {
    TelegramUpdate {
        update_id: 1,
        callback_query: Some(CallbackQueryPayload {
            id: "query".into(),
            data: Some(token.into()),
        }),
        message: None,
    }
}

async fn place_order(state: &ServerState, telegram_id: Option<i64>) -> Order {
    let product = seed_product(state, "Screen", 10, 1000.0).await;
    state
        .checkout
        .place_order(OrderCreate {
            items: vec![OrderItem {
                product_id: product.id_string(),
                name: "Screen".into(),
                unit_price: 1000.0,
                quantity: 1,
            }],
            total_amount: 1000.0,
            phone_number: "+79990001111".into(),
            customer: telegram_id.map(|id| CustomerIdentity {
                telegram_id: id,
                username: None,
                first_name: Some("Jane".into()),
                last_name: None,
            }),
        })
        .await
        .unwrap()
        .order
}

#[tokio::test]
async fn test_accept_callback_transitions_and_notifies_once() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;
    let order = place_order(&state, Some(42)).await;

    let token = format!("accept_order_{}", order.key());
    let handled = state.webhook.handle_update(callback(&token)).await.unwrap();
    assert!(handled.reply.ok);
    assert!(handled.changed_order.is_some());

    let stored = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Accepted);
    assert_eq!(
        notifier.last_customer_notice(),
        Some((42, OrderStatus::Accepted))
    );
    assert_eq!(notifier.customer_notice_count(), 1);
    // The staff message was re-rendered for the new status
    assert_eq!(notifier.annotations.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeated_callback_is_idempotent() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;
    let order = place_order(&state, Some(42)).await;

    let token = format!("accept_order_{}", order.key());
    state.webhook.handle_update(callback(&token)).await.unwrap();
    let second = state.webhook.handle_update(callback(&token)).await.unwrap();

    // Acknowledged, but nothing changed and nothing was re-sent
    assert!(second.reply.ok);
    assert!(second.changed_order.is_none());
    assert_eq!(notifier.customer_notice_count(), 1);
    assert_eq!(notifier.annotations.lock().unwrap().len(), 1);

    let stored = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Accepted);
}

#[tokio::test]
async fn test_cancel_on_ready_order_is_terminal() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;
    let order = place_order(&state, Some(77)).await;

    state
        .transitions
        .apply(&order.key(), OrderStatus::Accepted)
        .await
        .unwrap();
    state
        .transitions
        .apply(&order.key(), OrderStatus::Ready)
        .await
        .unwrap();

    let token = format!("cancel_order_{}", order.key());
    let handled = state.webhook.handle_update(callback(&token)).await.unwrap();
    assert!(handled.reply.ok);

    let stored = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    assert_eq!(
        notifier.last_customer_notice(),
        Some((77, OrderStatus::Cancelled))
    );

    // No transition leaves cancelled, via webhook or the staff API
    let complete = format!("complete_order_{}", order.key());
    let after = state.webhook.handle_update(callback(&complete)).await.unwrap();
    assert!(after.reply.ok);
    assert!(after.changed_order.is_none());
    assert!(
        state
            .transitions
            .apply(&order.key(), OrderStatus::Pending)
            .await
            .is_err()
    );
    let still = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(still.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_stale_status_write_cannot_overwrite_a_racing_transition() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;
    let order = place_order(&state, Some(42)).await;

    state
        .transitions
        .apply(&order.key(), OrderStatus::Accepted)
        .await
        .unwrap();
    state
        .transitions
        .apply(&order.key(), OrderStatus::Ready)
        .await
        .unwrap();

    // One manager cancels while another, who read the order as `ready`,
    // tries to complete it. The second write is validated against a status
    // that no longer holds and must match nothing.
    state
        .transitions
        .apply(&order.key(), OrderStatus::Cancelled)
        .await
        .unwrap();
    let stale = state
        .orders
        .update_status(&order.key(), OrderStatus::Ready, OrderStatus::Completed)
        .await
        .unwrap();
    assert!(stale.is_none());

    let stored = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    // The customer heard about the cancellation and nothing after it
    assert_eq!(
        notifier.last_customer_notice(),
        Some((42, OrderStatus::Cancelled))
    );
    assert_eq!(notifier.customer_notice_count(), 3);
}

#[tokio::test]
async fn test_illegal_manual_transitions_rejected() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;
    let order = place_order(&state, None).await;

    // Skipping ahead and completing a fresh order are both illegal
    assert!(
        state
            .transitions
            .apply(&order.key(), OrderStatus::Ready)
            .await
            .is_err()
    );
    assert!(
        state
            .transitions
            .apply(&order.key(), OrderStatus::Completed)
            .await
            .is_err()
    );

    let stored = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_guest_order_status_change_is_silent_for_customer() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;
    let order = place_order(&state, None).await;

    let token = format!("accept_order_{}", order.key());
    state.webhook.handle_update(callback(&token)).await.unwrap();

    let stored = state.orders.find_by_id(&order.key()).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Accepted);
    assert_eq!(notifier.customer_notice_count(), 0);
}

#[tokio::test]
async fn test_malformed_and_stale_tokens_are_acknowledged() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;

    let garbage = state
        .webhook
        .handle_update(callback("launch_order_missiles"))
        .await
        .unwrap();
    assert!(garbage.reply.ok);
    assert!(garbage.reply.detail.is_some());

    let missing = state
        .webhook
        .handle_update(callback("accept_order_doesnotexist"))
        .await
        .unwrap();
    assert!(missing.reply.ok);
    assert!(missing.changed_order.is_none());
}
