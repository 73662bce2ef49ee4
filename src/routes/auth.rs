use crate::handler::auth_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::{auth_state::AuthState, token_state::TokenState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn routes(token_state: TokenState) -> Router<AuthState> {
    let protected = Router::new()
        .route("/me", get(auth_handler::me))
        .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::auth));

    Router::new()
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .route("/refresh", post(auth_handler::refresh))
        .route("/logout", post(auth_handler::logout))
        .merge(protected)
}
