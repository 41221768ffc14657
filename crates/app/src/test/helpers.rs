//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    auth::hash_password,
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemUuid, CartRecord},
        },
        orders::{
            data::{NewOrder, NewOrderItem},
            records::{OrderUuid, ShippingAddress},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductImage, ProductRecord, ProductUuid},
        },
        users::{
            UsersServiceError,
            data::NewUser,
            records::{AuthType, Role, UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
    test::TestContext,
};

/// Password given to every account made by [`create_user`].
pub(crate) const PASSWORD: &str = "correct-horse";

pub(crate) fn new_product(name: &str, price: Decimal) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        stock: 10,
        category: "home".to_string(),
        images: vec![ProductImage {
            url: format!("https://images.example.com/{}.jpg", name.to_lowercase()),
            public_id: format!("products/{}", name.to_lowercase()),
        }],
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products.create_product(new_product(name, price)).await
}

async fn insert_user(ctx: &TestContext, user: NewUser) -> Result<UserRecord, UsersServiceError> {
    let mut tx = ctx.db.begin().await?;

    let user = PgUsersRepository::new().create_user(&mut tx, user).await?;

    tx.commit().await?;

    Ok(user)
}

/// A local account with [`PASSWORD`], named after the email's local part.
pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    insert_user(
        ctx,
        NewUser {
            uuid: UserUuid::new(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: Some(hash_password(PASSWORD)?),
            role: Role::User,
            auth_type: AuthType::Local,
            google_id: None,
            avatar: None,
        },
    )
    .await
}

/// An account created through Google sign-in, without a password.
pub(crate) async fn create_google_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    insert_user(
        ctx,
        NewUser {
            uuid: UserUuid::new(),
            name: "Google User".to_string(),
            email: email.to_string(),
            password_hash: None,
            role: Role::User,
            auth_type: AuthType::Google,
            google_id: Some(format!("google-{email}")),
            avatar: None,
        },
    )
    .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: i32,
) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product,
                quantity,
            },
        )
        .await
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Lovelace".to_string(),
        address_line1: "12 St James's Square".to_string(),
        address_line2: None,
        city: "London".to_string(),
        state: "LDN".to_string(),
        zip_code: "SW1Y 4JH".to_string(),
        phone: "555-0100".to_string(),
    }
}

pub(crate) fn new_order(lines: Vec<(ProductUuid, i32)>, total_price: Decimal) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        items: lines
            .into_iter()
            .map(|(product, quantity)| NewOrderItem { product, quantity })
            .collect(),
        total_price,
        shipping_address: Some(shipping_address()),
    }
}

/// The six digit code in the most recently sent email.
pub(crate) fn sent_code(ctx: &TestContext) -> Result<String, String> {
    let sent = ctx.mailer.sent();
    let email = sent.last().ok_or("no email sent")?;

    email
        .text
        .split(|c: char| !c.is_ascii_digit())
        .find(|run| run.len() == 6)
        .map(str::to_string)
        .ok_or_else(|| format!("no code in email: {}", email.text))
}
