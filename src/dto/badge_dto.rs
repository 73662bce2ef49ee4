use crate::model::badge::Badge;
use serde::Serialize;

/// 目录中的徽章, 不含内部 id
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BadgeRes {
    pub code: String,
    pub label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<&Badge> for BadgeRes {
    fn from(badge: &Badge) -> Self {
        Self {
            code: badge.code.clone(),
            label: badge.label.clone(),
            description: badge.description.clone(),
            icon: badge.icon.clone(),
        }
    }
}
