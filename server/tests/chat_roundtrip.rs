//! Customer chat relay and the staff reply path.

mod common;

use common::{RecordingNotifier, TEST_CHANNEL_ID, test_state};
use lavka_server::notify::format;
use lavka_server::telegram::TelegramUpdate;
use lavka_server::telegram::update::{ChatPayload, MessagePayload, UserPayload};

fn staff_reply(quoted_text: &str, reply_text: &str) -> TelegramUpdate {
    TelegramUpdate {
        update_id: 1,
        callback_query: None,
        message: Some(MessagePayload {
            text: Some(reply_text.into()),
            chat: ChatPayload {
                id: TEST_CHANNEL_ID,
            },
            from: Some(UserPayload {
                id: 55,
                is_bot: false,
                username: Some("manager".into()),
                first_name: Some("Max".into()),
                last_name: None,
            }),
            reply_to_message: Some(Box::new(MessagePayload {
                text: Some(quoted_text.into()),
                chat: ChatPayload {
                    id: TEST_CHANNEL_ID,
                },
                from: None,
                reply_to_message: None,
            })),
        }),
    }
}

#[tokio::test]
async fn test_customer_message_relays_and_reply_routes_back() {
    const CUSTOMER_ID: i64 = 987_654;

    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;

    // Customer sends a message: persisted first, then relayed to staff
    let stored = state
        .chat
        .append(CUSTOMER_ID, "Is my order ready?".into(), false, None)
        .await
        .unwrap();
    state
        .notifier
        .relay_chat_to_staff(&stored, Some("Jane"))
        .await
        .unwrap();

    let relayed = {
        let relays = notifier.staff_relays.lock().unwrap();
        assert_eq!(relays.len(), 1);
        relays[0].clone()
    };
    // The relayed text embeds the routable customer id
    assert_eq!(format::extract_customer_id(&relayed), Some(CUSTOMER_ID));
    assert!(relayed.contains("Is my order ready?"));

    // Staff reply quoting the relayed message goes back to that customer
    let handled = state
        .webhook
        .handle_update(staff_reply(&relayed, "Yes, come pick it up"))
        .await
        .unwrap();
    assert!(handled.reply.ok);

    let texts = notifier.customer_texts.lock().unwrap();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0], (CUSTOMER_ID, "Yes, come pick it up".to_string()));
    drop(texts);

    // Both directions are in the durable history, in order
    let history = state.chat.history(CUSTOMER_ID, None).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(!history[0].is_from_manager);
    assert!(history[1].is_from_manager);
    assert_eq!(history[1].message, "Yes, come pick it up");
}

#[tokio::test]
async fn test_reply_without_customer_marker_is_ignored() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;

    let handled = state
        .webhook
        .handle_update(staff_reply("just some staff chatter", "noted"))
        .await
        .unwrap();

    assert!(handled.reply.ok);
    assert!(handled.reply.detail.is_some());
    assert!(notifier.customer_texts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_message_outside_staff_channel_is_ignored() {
    let notifier = RecordingNotifier::new();
    let state = test_state(notifier.clone()).await;

    let mut update = staff_reply("Customer ID: 42", "hello");
    update.message.as_mut().unwrap().chat.id = 777;

    let handled = state.webhook.handle_update(update).await.unwrap();
    assert!(handled.reply.ok);
    assert!(notifier.customer_texts.lock().unwrap().is_empty());
}
