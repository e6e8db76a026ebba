//! Over-sell protection under concurrent checkouts.

mod common;

use common::{RecordingNotifier, seed_product, test_state};
use lavka_server::db::models::{OrderCreate, OrderItem};

/// N concurrent checkouts against stock k < N: at most k succeed, the
/// final quantity accounts exactly for the successes, and it never goes
/// negative.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checkouts_never_oversell() {
    const STOCK: i64 = 3;
    const BUYERS: usize = 10;

    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;
    let product = seed_product(&state, "Screen", STOCK, 1000.0).await;

    let mut tasks = Vec::with_capacity(BUYERS);
    for buyer in 0..BUYERS {
        let state = state.clone();
        let product_id = product.id_string();
        tasks.push(tokio::spawn(async move {
            state
                .checkout
                .place_order(OrderCreate {
                    items: vec![OrderItem {
                        product_id,
                        name: "Screen".into(),
                        unit_price: 1000.0,
                        quantity: 1,
                    }],
                    total_amount: 1000.0,
                    phone_number: format!("+7999000{buyer:04}"),
                    customer: None,
                })
                .await
        }));
    }

    let mut succeeded: i64 = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    assert!(succeeded >= 1, "no checkout got through at all");
    assert!(succeeded <= STOCK, "sold more units than were in stock");

    let drained = state
        .products
        .find_by_id(&product.id_string())
        .await
        .unwrap()
        .unwrap();
    assert!(drained.quantity >= 0);
    assert_eq!(drained.quantity, STOCK - succeeded);
}

/// A single oversized request cannot take the last units partially.
#[tokio::test]
async fn test_oversized_request_leaves_stock_intact() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier).await;
    let product = seed_product(&state, "Screen", 2, 1000.0).await;

    let result = state
        .checkout
        .place_order(OrderCreate {
            items: vec![OrderItem {
                product_id: product.id_string(),
                name: "Screen".into(),
                unit_price: 1000.0,
                quantity: 3,
            }],
            total_amount: 3000.0,
            phone_number: "+79990001111".into(),
            customer: None,
        })
        .await;

    assert!(result.is_err());
    let untouched = state
        .products
        .find_by_id(&product.id_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.quantity, 2);
}
