use crate::handler::rules_handler;
use crate::state::rules_state::RulesState;
use axum::{routing::get, Router};

pub fn routes() -> Router<RulesState> {
    Router::new().route("/rules", get(rules_handler::get_rules))
}
