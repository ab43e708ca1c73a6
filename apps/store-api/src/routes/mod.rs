//! HTTP routes for the store API

pub mod backorders;
pub mod customers;
pub mod discounts;
pub mod health;
pub mod orders;
pub mod products;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn build_router(state: AppState) -> Router {
    let orders = Router::new()
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        );

    let products = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    let customers = Router::new()
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        );

    let discounts = Router::new()
        .route(
            "/discounts",
            get(discounts::list_discounts).post(discounts::create_discount),
        )
        .route("/discounts/active", get(discounts::list_active_discounts))
        .route(
            "/discounts/{id}",
            get(discounts::get_discount)
                .put(discounts::update_discount)
                .delete(discounts::delete_discount),
        );

    let backorders = Router::new()
        .route(
            "/backorders",
            get(backorders::list_backorders).post(backorders::create_backorder),
        )
        .route(
            "/backorders/{id}",
            get(backorders::get_backorder)
                .put(backorders::update_backorder)
                .delete(backorders::delete_backorder),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(orders)
        .merge(products)
        .merge(customers)
        .merge(discounts)
        .merge(backorders)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
