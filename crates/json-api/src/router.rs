//! App Router

use salvo::Router;

use crate::{
    auth::{
        self,
        middleware::{authenticate, require_admin},
    },
    carts, categories, orders, products, realtime, users,
};

/// Everything served under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(auth_router())
        .push(product_router())
        .push(category_router())
        .push(cart_router())
        .push(order_router())
        .push(
            Router::with_path("admin/users")
                .hoop(authenticate)
                .hoop(require_admin)
                .get(users::index::handler)
                .push(
                    Router::with_path("{id}")
                        .delete(users::delete::handler)
                        .push(Router::with_path("role").put(users::role::handler)),
                ),
        )
        .push(Router::with_path("socket").goal(realtime::socket::handler))
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("signup").post(auth::signup::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(Router::with_path("logout").post(auth::logout::handler))
        .push(Router::with_path("google").post(auth::google::handler))
        .push(Router::with_path("send-verify-code").post(auth::send_verify_code::handler))
        .push(Router::with_path("verify-email-code").post(auth::verify_email_code::handler))
        .push(Router::with_path("forgot-password").post(auth::forgot_password::handler))
        .push(Router::with_path("verify-reset-code").post(auth::verify_reset_code::handler))
        .push(Router::with_path("reset-password").post(auth::reset_password::handler))
        .push(
            Router::with_path("checkAuth")
                .hoop(authenticate)
                .get(auth::check_auth::handler),
        )
}

fn product_router() -> Router {
    Router::with_path("product")
        .push(Router::with_path("getAll").get(products::index::handler))
        .push(Router::with_path("getOne/{id}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(authenticate)
                .hoop(require_admin)
                .push(Router::with_path("create").post(products::create::handler))
                .push(Router::with_path("update/{id}").put(products::update::handler))
                .push(Router::with_path("delete/{id}").delete(products::delete::handler)),
        )
}

fn category_router() -> Router {
    Router::with_path("category")
        .get(categories::index::handler)
        .push(
            Router::new()
                .hoop(authenticate)
                .hoop(require_admin)
                .push(Router::with_path("create").post(categories::create::handler))
                .push(Router::with_path("update/{id}").put(categories::update::handler))
                .push(Router::with_path("delete/{id}").delete(categories::delete::handler)),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .hoop(authenticate)
        .push(Router::with_path("get-cart").get(carts::get::handler))
        .push(Router::with_path("add-product").post(carts::add::handler))
        .push(Router::with_path("update/{item_id}").put(carts::update::handler))
        .push(Router::with_path("remove/{item_id}").delete(carts::remove::handler))
        .push(Router::with_path("clear").delete(carts::clear::handler))
}

fn order_router() -> Router {
    Router::with_path("order")
        .hoop(authenticate)
        .push(Router::with_path("create").post(orders::create::handler))
        .push(
            Router::with_path("send-confirmation-email")
                .post(orders::send_confirmation::handler),
        )
        .push(Router::with_path("user-orders").get(orders::user::handler))
        .push(
            Router::new()
                .hoop(require_admin)
                .push(Router::with_path("all-orders").get(orders::all::handler))
                .push(
                    Router::with_path("update-status/{order_id}")
                        .put(orders::update_status::handler),
                )
                .push(Router::with_path("delete/{order_id}").delete(orders::delete::handler)),
        )
}
