//! Notification texts.

use jiff::{
    Timestamp,
    tz::{Offset, TimeZone},
};
use rusty_money::{Money, iso};

use crate::domain::{contact::ContactInquiry, orders::records::OrderRecord};

const STORE_TIME_ZONE: &str = "Asia/Kolkata";

/// India Standard Time, used when the tz database has no entry for the store zone.
const IST_OFFSET_SECONDS: i32 = 5 * 60 * 60 + 30 * 60;

/// Summary sent to the admin when an order is placed.
#[must_use]
pub fn order_placed(order: &OrderRecord, now: Timestamp) -> String {
    let mut lines = vec![
        format!("🛍️ New order #{}", order.reference()),
        String::new(),
        format!("Customer: {}", order.customer_name),
        format!("Phone: {}", order.customer_phone),
        format!("Email: {}", order.customer_email),
        String::new(),
        "Items:".to_string(),
    ];

    lines.extend(order.items.iter().map(|item| {
        let line_total = item.line_total().map_or_else(|| "?".to_string(), rupees);

        format!("• {} x{} - {}", item.name, item.quantity, line_total)
    }));

    lines.push(String::new());
    lines.push(format!("Total: {}", rupees(order.total_amount)));

    if !order.notes.trim().is_empty() {
        lines.push(format!("Notes: {}", order.notes.trim()));
    }

    lines.push(format!("Placed: {}", store_time(now)));

    lines.join("\n")
}

/// Relay of a contact form submission.
#[must_use]
pub fn contact_inquiry(inquiry: &ContactInquiry, now: Timestamp) -> String {
    format!(
        "📩 New contact inquiry\n\nName: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}\n\nReceived: {}",
        inquiry.name,
        inquiry.email,
        inquiry.phone,
        inquiry.message,
        store_time(now)
    )
}

/// Connectivity check sent from the admin dashboard.
#[must_use]
pub fn test_message(now: Timestamp) -> String {
    format!(
        "✅ Kusuri notifications are working.\n\nSent: {}",
        store_time(now)
    )
}

/// Format minor units as rupees.
#[must_use]
pub fn rupees(minor: u64) -> String {
    i64::try_from(minor).map_or_else(
        |_| format!("{minor} paise"),
        |amount| Money::from_minor(amount, iso::INR).to_string(),
    )
}

fn store_time(now: Timestamp) -> String {
    let tz = TimeZone::get(STORE_TIME_ZONE).unwrap_or_else(|_| {
        Offset::from_seconds(IST_OFFSET_SECONDS).map_or(TimeZone::UTC, TimeZone::fixed)
    });

    now.to_zoned(tz).strftime("%d %b %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderStatus, OrderUuid},
        products::records::ProductUuid,
        users::UserUuid,
    };

    use super::*;

    fn order(notes: &str) -> OrderRecord {
        let uuid = OrderUuid::from_uuid(Uuid::from_u128(0xdead_beef_0000_0000_0000_0000_cafe_f00d));

        OrderRecord {
            uuid,
            user_uuid: UserUuid::new(),
            items: vec![
                OrderItemRecord {
                    uuid: OrderItemUuid::new(),
                    order_uuid: uuid,
                    product_uuid: ProductUuid::new(),
                    name: "Rose Water".to_string(),
                    quantity: 2,
                    price: 100,
                    images: Vec::new(),
                },
                OrderItemRecord {
                    uuid: OrderItemUuid::new(),
                    order_uuid: uuid,
                    product_uuid: ProductUuid::new(),
                    name: "Sandal Soap".to_string(),
                    quantity: 1,
                    price: 50,
                    images: Vec::new(),
                },
            ],
            total_amount: 250,
            customer_name: "Asha Rao".to_string(),
            customer_phone: "9000000000".to_string(),
            customer_email: "asha@example.com".to_string(),
            notes: notes.to_string(),
            status: OrderStatus::Pending,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn order_message_carries_required_fields() {
        let text = order_placed(&order("Pick up after 5pm"), Timestamp::UNIX_EPOCH);

        assert!(text.contains("#CAFEF00D"), "{text}");
        assert!(text.contains("Asha Rao"), "{text}");
        assert!(text.contains("9000000000"), "{text}");
        assert!(text.contains("asha@example.com"), "{text}");
        assert!(text.contains("Rose Water x2"), "{text}");
        assert!(text.contains("Sandal Soap x1"), "{text}");
        assert!(text.contains(&rupees(250)), "{text}");
        assert!(text.contains("Notes: Pick up after 5pm"), "{text}");
    }

    #[test]
    fn order_message_omits_blank_notes() {
        let text = order_placed(&order("  "), Timestamp::UNIX_EPOCH);

        assert!(!text.contains("Notes:"), "{text}");
    }

    #[test]
    fn timestamps_render_in_store_time() {
        let text = test_message(Timestamp::UNIX_EPOCH);

        assert!(text.contains("01 Jan 1970, 05:30 AM"), "{text}");
    }

    #[test]
    fn contact_message_carries_every_field() {
        let inquiry = ContactInquiry {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9111111111".to_string(),
            message: "Do you stock neem soap?".to_string(),
        };

        let text = contact_inquiry(&inquiry, Timestamp::UNIX_EPOCH);

        for field in ["Ravi", "ravi@example.com", "9111111111", "neem soap"] {
            assert!(text.contains(field), "missing {field} in {text}");
        }
    }

    #[test]
    fn rupees_uses_rupee_symbol() {
        assert!(rupees(12_345).contains('₹'));
    }
}
