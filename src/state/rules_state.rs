use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct RulesState {
    pub rules_file: Arc<PathBuf>,
}

impl RulesState {
    pub fn new(rules_file: &str) -> Self {
        Self {
            rules_file: Arc::new(PathBuf::from(rules_file)),
        }
    }
}
