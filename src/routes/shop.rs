use crate::handler::shop_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::{shop_state::ShopState, token_state::TokenState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn routes(token_state: TokenState) -> Router<ShopState> {
    let protected = Router::new()
        .route("/can_purchase", post(shop_handler::can_purchase))
        .route("/purchase", post(shop_handler::purchase))
        .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::auth));

    Router::new().nest(
        "/shop",
        Router::new()
            .route("/items", get(shop_handler::items))
            .merge(protected),
    )
}
