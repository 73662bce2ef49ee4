use crate::handler::badge_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::{badge_state::BadgeState, token_state::TokenState};
use axum::{middleware, routing::get, Router};

pub fn routes(token_state: TokenState) -> Router<BadgeState> {
    let protected = Router::new()
        .route("/badges/me", get(badge_handler::my_badges))
        .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::auth));

    Router::new()
        .route("/badges", get(badge_handler::all_badges))
        .merge(protected)
}
