//! Product bodies.

use bazaar_app::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{ProductImage, ProductRecord, ProductUuid},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// An image held by the image storage service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ImageBody {
    pub url: String,
    pub public_id: String,
}

impl From<ProductImage> for ImageBody {
    fn from(image: ProductImage) -> Self {
        Self {
            url: image.url,
            public_id: image.public_id,
        }
    }
}

impl From<ImageBody> for ProductImage {
    fn from(image: ImageBody) -> Self {
        Self {
            url: image.url,
            public_id: image.public_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub images: Vec<ImageBody>,
    #[salvo(schema(value_type = String))]
    pub created_at: Timestamp,
    #[salvo(schema(value_type = String))]
    pub updated_at: Timestamp,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            images: product.images.into_iter().map(Into::into).collect(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Body of create and update. On update, omitted `images` keeps the
/// stored ones.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[salvo(schema(value_type = f64))]
    #[validate(custom(function = "money_amount"))]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub images: Option<Vec<ImageBody>>,
}

impl ProductRequest {
    pub(crate) fn into_new_product(self, uuid: ProductUuid) -> NewProduct {
        NewProduct {
            uuid,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
            images: self
                .images
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<ProductRequest> for ProductUpdate {
    fn from(request: ProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
            category: request.category,
            images: request
                .images
                .map(|images| images.into_iter().map(Into::into).collect()),
        }
    }
}

fn money_amount(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("non_negative"));
    }

    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("cents"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn request(price: f64, stock: i32) -> TestResult<ProductRequest> {
        Ok(serde_json::from_value(json!({
            "name": "Desk Lamp",
            "price": price,
            "stock": stock,
            "category": "home",
        }))?)
    }

    #[test]
    fn negative_or_sub_cent_price_is_rejected() -> TestResult {
        assert!(request(19.99, 1)?.validate().is_ok());
        assert!(request(0.0, 0)?.validate().is_ok());
        assert!(request(-0.01, 1)?.validate().is_err());
        assert!(request(19.999, 1)?.validate().is_err());
        assert!(request(1.0, -1)?.validate().is_err());

        Ok(())
    }

    #[test]
    fn omitted_images_keep_stored_ones_on_update() -> TestResult {
        let update: ProductUpdate = request(5.0, 1)?.into();

        assert_eq!(update.images, None);

        Ok(())
    }

    #[test]
    fn omitted_images_create_an_empty_gallery() -> TestResult {
        let product = request(5.0, 1)?.into_new_product(ProductUuid::new());

        assert!(product.images.is_empty());

        Ok(())
    }
}
