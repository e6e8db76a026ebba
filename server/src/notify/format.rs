//! Message text rendering
//!
//! All Telegram-facing text is rendered here so the dispatcher stays thin.
//! The staff order message is always rendered in full from the current order
//! state, which makes status annotation an idempotent replace: editing the
//! message with the regenerated text yields the same result no matter how
//! many times a transition is re-applied.

use crate::db::models::{ChatMessage, Order};
use crate::orders::OrderStatus;
use crate::telegram::action::OrderAction;

/// Marker line embedded in relayed chat messages so staff replies can be
/// routed back to the right customer
const CUSTOMER_ID_MARKER: &str = "Customer ID:";

/// Human-facing status line
pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "⏳ Pending confirmation",
        OrderStatus::Accepted => "✅ Accepted",
        OrderStatus::Ready => "📦 Ready for pickup",
        OrderStatus::Completed => "🏁 Completed",
        OrderStatus::Cancelled => "❌ Cancelled",
    }
}

/// Full staff notification text for an order
///
/// Includes the current status as the last line; re-rendering after a
/// transition replaces the annotation rather than appending to it.
pub fn staff_order_text(order: &Order) -> String {
    let mut text = format!("🛒 Order {}\n", order.id_string());

    if let Some(customer) = &order.customer {
        text.push_str(&format!("Customer: {}", customer.display_name()));
        if let Some(username) = &customer.username {
            text.push_str(&format!(" (@{username})"));
        }
        text.push('\n');
    } else {
        text.push_str("Customer: guest\n");
    }
    text.push_str(&format!("📞 {}\n\n", order.phone_number));

    for item in &order.items {
        text.push_str(&format!(
            "• {} × {} — {:.2}\n",
            item.name,
            item.quantity,
            item.line_total()
        ));
    }
    text.push_str(&format!("\nTotal: {:.2}\n", order.total_amount));
    text.push_str(&format!("\nStatus: {}", status_label(order.status)));
    text
}

/// Customer-facing status change text
pub fn customer_status_text(order: &Order) -> String {
    format!(
        "Your order {} is now: {}",
        order.id_string(),
        status_label(order.status)
    )
}

/// Inline keyboard rows attached to the staff order message
///
/// Every open order carries the full action set; taps that are illegal from
/// the current status are rejected by the callback handler. Terminal
/// statuses produce an empty keyboard, which removes the buttons when the
/// staff message is edited.
pub fn action_buttons(order: &Order) -> Vec<(String, String)> {
    if order.status.is_terminal() {
        return Vec::new();
    }
    let key = order.key();
    OrderAction::ALL
        .iter()
        .map(|action| (action.label().to_string(), action.token(&key)))
        .collect()
}

/// Staff channel text for a relayed customer chat message
pub fn chat_to_staff_text(message: &ChatMessage, display_name: Option<&str>) -> String {
    let mut text = format!(
        "💬 Message from {}\n",
        display_name.unwrap_or("customer")
    );
    text.push_str(&format!(
        "{CUSTOMER_ID_MARKER} {}\n",
        message.telegram_user_id
    ));
    if let Some(order_id) = &message.order_id {
        text.push_str(&format!("Order: {order_id}\n"));
    }
    text.push('\n');
    text.push_str(&message.message);
    text
}

/// Staff channel text for a submitted contact form
pub fn contact_form_text(name: &str, phone: &str, message: &str) -> String {
    format!("📨 Contact request\nName: {name}\n📞 {phone}\n\n{message}")
}

/// Verification code text sent to the customer
pub fn verification_code_text(code: &str) -> String {
    format!("Your verification code: {code}\nIt expires in 5 minutes.")
}

/// Pull the customer id back out of a relayed chat message
///
/// Used when staff reply to a relayed message in the channel: the reply's
/// quoted text carries the marker line, which tells us whom to forward the
/// reply to.
pub fn extract_customer_id(text: &str) -> Option<i64> {
    text.lines()
        .find_map(|line| line.strip_prefix(CUSTOMER_ID_MARKER))
        .and_then(|rest| rest.trim().parse().ok())
}
