//! Email bodies rendered from askama templates under `templates/email`.

use askama::Template;
use rust_decimal::Decimal;

use crate::domain::orders::records::OrderRecord;

use super::{MailError, OutgoingEmail};

#[derive(Template)]
#[template(path = "email/verification_code.html")]
struct VerificationCodeHtml<'a> {
    name: &'a str,
    code: &'a str,
    minutes: i64,
}

#[derive(Template)]
#[template(path = "email/verification_code.txt")]
struct VerificationCodeText<'a> {
    name: &'a str,
    code: &'a str,
    minutes: i64,
}

#[derive(Template)]
#[template(path = "email/password_reset.html")]
struct PasswordResetHtml<'a> {
    code: &'a str,
    minutes: i64,
}

#[derive(Template)]
#[template(path = "email/password_reset.txt")]
struct PasswordResetText<'a> {
    code: &'a str,
    minutes: i64,
}

#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    customer: &'a str,
    order_id: String,
    lines: &'a [ConfirmationLine],
    total: Decimal,
    address: Vec<String>,
}

#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    customer: &'a str,
    order_id: String,
    lines: &'a [ConfirmationLine],
    total: Decimal,
    address: Vec<String>,
}

#[derive(Debug, Clone)]
struct ConfirmationLine {
    name: String,
    quantity: i32,
    line_total: Option<Decimal>,
}

pub fn verification_code(
    to: &str,
    name: &str,
    code: &str,
    minutes: i64,
) -> Result<OutgoingEmail, MailError> {
    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: "Your verification code".to_string(),
        text: VerificationCodeText { name, code, minutes }.render()?,
        html: VerificationCodeHtml { name, code, minutes }.render()?,
    })
}

pub fn password_reset_code(to: &str, code: &str, minutes: i64) -> Result<OutgoingEmail, MailError> {
    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        text: PasswordResetText { code, minutes }.render()?,
        html: PasswordResetHtml { code, minutes }.render()?,
    })
}

pub fn order_confirmation(to: &str, order: &OrderRecord) -> Result<OutgoingEmail, MailError> {
    let lines: Vec<ConfirmationLine> = order
        .items
        .iter()
        .map(|item| ConfirmationLine {
            name: item
                .product
                .as_ref()
                .map_or_else(|| "Unavailable product".to_string(), |p| p.name.clone()),
            quantity: item.quantity,
            line_total: item
                .product
                .as_ref()
                .map(|p| p.price * Decimal::from(item.quantity)),
        })
        .collect();

    let address = order
        .shipping_address
        .as_ref()
        .map(|address| address.lines())
        .unwrap_or_default();

    let order_id = order.uuid.to_string();
    let customer = order.customer.name.as_str();

    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: format!("Order confirmation #{order_id}"),
        text: OrderConfirmationText {
            customer,
            order_id: order_id.clone(),
            lines: &lines,
            total: order.total_price,
            address: address.clone(),
        }
        .render()?,
        html: OrderConfirmationHtml {
            customer,
            order_id,
            lines: &lines,
            total: order.total_price,
            address,
        }
        .render()?,
    })
}
