//! Test helpers.

use std::sync::Arc;

use bazaar_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        categories::MockCategoriesService,
        orders::{
            MockOrdersService,
            records::{OrderCustomer, OrderRecord, OrderStatus, OrderUuid, ShippingAddress},
        },
        products::{
            MockProductsService,
            records::{ProductImage, ProductRecord, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{AuthType, Role, UserRecord, UserUuid},
        },
        verification::MockVerificationService,
    },
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{
    auth::SessionCookies, extensions::*, realtime::ConnectionRegistry, state::State,
};

/// One mock per service. Mocks without expectations reject every call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) verification: MockVerificationService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::new(
            AppContext {
                auth: Arc::new(self.auth),
                users: Arc::new(self.users),
                verification: Arc::new(self.verification),
                categories: Arc::new(self.categories),
                products: Arc::new(self.products),
                carts: Arc::new(self.carts),
                orders: Arc::new(self.orders),
            },
            ConnectionRegistry::new(),
            SessionCookies::default(),
        )
    }
}

pub(crate) const CUSTOMER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

pub(crate) fn customer() -> Identity {
    Identity {
        user: CUSTOMER_UUID,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        role: Role::User,
    }
}

pub(crate) fn admin() -> Identity {
    Identity {
        user: ADMIN_UUID,
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
        role: Role::Admin,
    }
}

#[salvo::handler]
async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(customer());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_admin(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_identity(admin());
    ctrl.call_next(req, depot, res).await;
}

/// A service with no signed-in caller.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// A service where [`customer`] is signed in.
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// A service where [`admin`] is signed in.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_user(email: &str, role: Role) -> UserRecord {
    UserRecord {
        uuid: UserUuid::new(),
        name: "Ada".to_string(),
        email: email.to_string(),
        role,
        auth_type: AuthType::Local,
        google_id: None,
        avatar: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, price: Decimal) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Desk Lamp".to_string(),
        description: "Warm light".to_string(),
        price,
        stock: 10,
        category: "home".to_string(),
        images: vec![ProductImage {
            url: "https://img.example.com/lamp.jpg".to_string(),
            public_id: "lamp".to_string(),
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
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

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        uuid,
        customer: OrderCustomer {
            uuid: CUSTOMER_UUID,
            name: customer().name,
            email: customer().email,
        },
        items: Vec::new(),
        total_price: Decimal::new(24_050, 2),
        shipping_address: Some(shipping_address()),
        status,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A storage failure the services surface as their `Sql` variant.
pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}
