use super::{auth, badge, rules, score, shop};
use crate::config::parameter::AppConfig;
use crate::db::database::Database;
use crate::repository::badge_repository::BadgeRepository;
use crate::service::badge_catalog::BadgeCatalog;
use crate::state::auth_state::AuthState;
use crate::state::badge_state::BadgeState;
use crate::state::rules_state::RulesState;
use crate::state::score_state::ScoreState;
use crate::state::shop_state::ShopState;
use crate::state::token_state::TokenState;
use crate::utils::jwt::JwtCodec;
use axum::routing::{get, IntoMakeService};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn routes(db_conn: Arc<Database>, config: &AppConfig) -> IntoMakeService<Router> {
    let merged_router = {
        let jwt = Arc::new(JwtCodec::new(
            &config.jwt_secret,
            config.jwt_exp_minutes,
            config.jwt_refresh_exp_minutes,
        ));
        // 徽章目录进程内共享一份
        let catalog = Arc::new(BadgeCatalog::new(Arc::new(BadgeRepository::new(&db_conn))));
        let token_state = TokenState::new(&jwt);
        let auth_state = AuthState::new(&db_conn, &jwt, config.cookie_secure);
        let score_state = ScoreState::new(&db_conn, &catalog);
        let badge_state = BadgeState::new(&db_conn, &catalog);
        let shop_state = ShopState::new(&db_conn);
        let rules_state = RulesState::new(&config.rules_file);

        Router::new()
            .merge(auth::routes(token_state.clone()).with_state(auth_state))
            .merge(score::routes(token_state.clone()).with_state(score_state))
            .merge(badge::routes(token_state.clone()).with_state(badge_state))
            .merge(shop::routes(token_state).with_state(shop_state))
            .merge(rules::routes().with_state(rules_state))
            .merge(Router::new().route("/health", get(|| async move { "Healthy..." })))
    };

    let app_router = Router::new()
        .nest("/api", merged_router)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    app_router.into_make_service()
}
