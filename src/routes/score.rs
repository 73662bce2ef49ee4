use crate::handler::score_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::{score_state::ScoreState, token_state::TokenState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn routes(token_state: TokenState) -> Router<ScoreState> {
    let protected = Router::new()
        .route("/scores", post(score_handler::submit_score))
        .route("/scores/me", get(score_handler::my_score))
        .route("/stats/me", get(score_handler::my_stats))
        .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::auth));

    Router::new()
        .route("/leaderboard", get(score_handler::leaderboard))
        .merge(protected)
}
