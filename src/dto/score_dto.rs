//! 成绩相关的请求结构

use crate::model::score::NewGameRecord;
use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 15;

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct SubmitScoreReq {
    #[validate(range(min = 0, max = 1_000_000, message = "points must be between 0 and 1_000_000"))]
    pub points: i32,
    #[validate(range(min = 0, message = "correct_items must not be negative"))]
    pub correct_items: Option<i32>,
    #[validate(range(min = 0, message = "total_items must not be negative"))]
    pub total_items: Option<i32>,
    #[validate(range(min = 0, message = "duration_ms must not be negative"))]
    pub duration_ms: Option<i32>,
}

impl From<SubmitScoreReq> for NewGameRecord {
    // 未上报的计数按 0 处理
    fn from(req: SubmitScoreReq) -> Self {
        Self {
            points: req.points,
            correct_items: req.correct_items.unwrap_or(0),
            total_items: req.total_items.unwrap_or(0),
            duration_ms: req.duration_ms.unwrap_or(0),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct LeaderboardQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl LeaderboardQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_default_to_zero() {
        let req: SubmitScoreReq = serde_json::from_str(r#"{"points": 12}"#).unwrap();
        assert!(req.validate().is_ok());
        let record = NewGameRecord::from(req);
        assert_eq!(
            record,
            NewGameRecord {
                points: 12,
                correct_items: 0,
                total_items: 0,
                duration_ms: 0,
            }
        );
    }

    #[test]
    fn negative_values_fail_validation() {
        let req: SubmitScoreReq =
            serde_json::from_str(r#"{"points": -3, "total_items": 4}"#).unwrap();
        assert!(req.validate().is_err());
        let req: SubmitScoreReq =
            serde_json::from_str(r#"{"points": 3, "duration_ms": -1}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn leaderboard_limit_defaults_and_bounds() {
        let query = LeaderboardQuery { limit: None };
        assert_eq!(query.limit(), 15);
        assert!(query.validate().is_ok());
        assert!(LeaderboardQuery { limit: Some(0) }.validate().is_err());
        assert!(LeaderboardQuery { limit: Some(101) }.validate().is_err());
        assert!(LeaderboardQuery { limit: Some(100) }.validate().is_ok());
    }
}
