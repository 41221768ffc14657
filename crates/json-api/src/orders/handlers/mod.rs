//! Order Handlers

pub(crate) mod all;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod send_confirmation;
pub(crate) mod update_status;
pub(crate) mod user;
