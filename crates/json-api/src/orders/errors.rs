//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use bazaar_app::{domain::orders::OrdersServiceError, mail::MailError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Order refers to an unknown customer")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Mail(MailError::NotConfigured) => {
            warn!("order confirmation requested without SMTP settings");

            StatusError::service_unavailable().brief("Email delivery is not available")
        }
        OrdersServiceError::Mail(source) => {
            error!("failed to send order confirmation: {source}");

            StatusError::bad_gateway().brief("Could not send email")
        }
    }
}
