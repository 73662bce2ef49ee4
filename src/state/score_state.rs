use crate::db::database::Database;
use crate::repository::score_repository::ScoreRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::badge_catalog::BadgeCatalog;
use crate::service::rule_evaluator::RuleEvaluator;
use crate::service::score_service::ScoreService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ScoreState {
    pub score_service: Arc<ScoreService>,
}

impl ScoreState {
    pub fn new(db_conn: &Arc<Database>, catalog: &Arc<BadgeCatalog>) -> Self {
        Self {
            score_service: Arc::new(ScoreService::new(
                Arc::new(ScoreRepository::new(db_conn)),
                Arc::new(UserRepository::new(db_conn)),
                Arc::clone(catalog),
                RuleEvaluator::standard(),
            )),
        }
    }
}
