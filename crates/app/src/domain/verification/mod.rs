//! Email Verification and Password Reset Codes

pub mod codes;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::VerificationServiceError;
pub use service::*;
