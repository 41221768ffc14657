//! Request body validation.

use salvo::{oapi::extract::JsonBody, prelude::StatusError};
use validator::{Validate, ValidationErrors};

pub(crate) trait ValidatedExt<T> {
    /// Unwrap the body, rejecting it with a 400 naming the offending fields.
    fn validated(self) -> Result<T, StatusError>;
}

impl<T> ValidatedExt<T> for JsonBody<T>
where
    T: Validate,
{
    fn validated(self) -> Result<T, StatusError> {
        let body = self.into_inner();

        body.validate()
            .map_err(|errors| StatusError::bad_request().brief(describe(&errors)))?;

        Ok(body)
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.errors().keys().map(AsRef::as_ref).collect();

    fields.sort_unstable();

    format!("Invalid fields: {}", fields.join(", "))
}
