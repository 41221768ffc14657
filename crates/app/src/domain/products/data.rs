//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductImage, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub images: Vec<ProductImage>,
}

/// Product Update Data
///
/// `images: None` keeps the stored images.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub images: Option<Vec<ProductImage>>,
}

pub(crate) fn is_valid_listing(name: &str, price: Decimal, stock: i32) -> bool {
    !name.trim().is_empty() && !price.is_sign_negative() && stock >= 0
}
