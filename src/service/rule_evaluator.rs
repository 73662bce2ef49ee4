//! 徽章发放规则
//!
//! 每个可自动发放的徽章都要在规则表里显式登记; 目录里的 `threshold` 只用于展示,
//! 没有登记规则的徽章永远不会被自动发放 (新徽章可以先进目录, 再开启发放).
//!
//! 一次评估里所有候选徽章共用同一份快照: 提交后的总分、本局成绩、本局之前已拥有的徽章.
//! 本轮新发的徽章不会回写到已拥有集合, 所以 "收集 N 个徽章" 最早在拿到第 N 个徽章的下一局发放.

use crate::model::badge::Badge;
use crate::model::score::GameRecord;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// 单个徽章的解锁条件
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeRule {
    /// 累计总分 >= N
    TotalAtLeast(i64),
    /// 本局用时在 (0, N) 毫秒之间, 用时 0 视为未计时
    FasterThanMs(i32),
    /// 本局物品数 >= N
    ItemsAtLeast(i32),
    /// 本局至少答对一个
    AnyCorrect,
    /// 本局没有错误; `allow_empty` 决定 0 个物品的局是否算
    PerfectRun { allow_empty: bool },
    /// 本局之前已拥有的徽章数 >= N
    OwnedAtLeast(usize),
}

/// 评估输入快照
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub user_id: i64,
    pub updated_total: i64,
    pub game_record: &'a GameRecord,
    pub owned_codes: &'a HashSet<String>,
}

impl BadgeRule {
    pub fn is_satisfied(&self, ctx: &RuleContext<'_>) -> bool {
        let record = ctx.game_record;
        match *self {
            BadgeRule::TotalAtLeast(threshold) => ctx.updated_total >= threshold,
            BadgeRule::FasterThanMs(bound) => record.duration_ms > 0 && record.duration_ms < bound,
            BadgeRule::ItemsAtLeast(count) => record.total_items >= count,
            BadgeRule::AnyCorrect => record.correct_items >= 1,
            BadgeRule::PerfectRun { allow_empty } => {
                record.correct_items == record.total_items && (allow_empty || record.total_items > 0)
            }
            BadgeRule::OwnedAtLeast(count) => ctx.owned_codes.len() >= count,
        }
    }
}

/// 标准规则表
pub const STANDARD_RULES: &[(&str, BadgeRule)] = &[
    ("TRIEUR_MALIN", BadgeRule::TotalAtLeast(10)),
    ("TRIEUR_FUTE", BadgeRule::TotalAtLeast(40)),
    ("TRIEUR_PROPRET", BadgeRule::TotalAtLeast(60)),
    ("TRIEUR_CHAMPION", BadgeRule::TotalAtLeast(80)),
    ("TRIEUR_RAPIDE", BadgeRule::FasterThanMs(2000)),
    ("TRIEUR_JOUEUR", BadgeRule::ItemsAtLeast(20)),
    ("AMI_DE_RECY", BadgeRule::TotalAtLeast(25)),
    ("FIRST_GAME", BadgeRule::AnyCorrect),
    ("PERFECT_RUN", BadgeRule::PerfectRun { allow_empty: false }),
    ("TRIEUR_NOVICE", BadgeRule::TotalAtLeast(30)),
    ("TRIEUR_DEBUTANT", BadgeRule::TotalAtLeast(50)),
    ("TRIEUR", BadgeRule::TotalAtLeast(70)),
    ("TRIEUR_APPLIQUE", BadgeRule::TotalAtLeast(100)),
    ("200_POINTS", BadgeRule::TotalAtLeast(200)),
    ("TRIEUR_ASSIDU", BadgeRule::TotalAtLeast(300)),
    ("400_POINTS", BadgeRule::TotalAtLeast(400)),
    ("TRIEUR_CONFIRME", BadgeRule::TotalAtLeast(500)),
    ("PETIT_COLLECTIONNEUR", BadgeRule::OwnedAtLeast(5)),
];

/// 待发放的徽章
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingGrant {
    pub badge: Badge,
    pub awarded_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct RuleEvaluator {
    rules: HashMap<String, BadgeRule>,
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleEvaluator {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, BadgeRule)>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(code, rule)| (code.into(), rule))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.iter().copied())
    }

    pub fn rule_for(&self, code: &str) -> Option<&BadgeRule> {
        self.rules.get(code)
    }

    /// 按目录顺序返回本次新满足条件的徽章, 共用同一个发放时间
    pub fn evaluate(
        &self,
        catalog: &[Badge],
        ctx: &RuleContext<'_>,
        awarded_at: DateTime<Utc>,
    ) -> Vec<PendingGrant> {
        let pending: Vec<PendingGrant> = catalog
            .iter()
            .filter(|badge| !ctx.owned_codes.contains(&badge.code))
            .filter(|badge| match self.rules.get(&badge.code) {
                Some(rule) => rule.is_satisfied(ctx),
                None => false,
            })
            .map(|badge| PendingGrant {
                badge: badge.clone(),
                awarded_at,
            })
            .collect();
        tracing::debug!(
            "evaluate - user_id:{} | total:{} | owned:{} | pending:{}",
            ctx.user_id,
            ctx.updated_total,
            ctx.owned_codes.len(),
            pending.len()
        );
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_repository::seeded_badges;

    fn round(points: i32, correct_items: i32, total_items: i32, duration_ms: i32) -> GameRecord {
        GameRecord {
            id: 1,
            user_id: 1,
            points,
            correct_items,
            total_items,
            duration_ms,
            played_at: Utc::now(),
        }
    }

    fn owned(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn codes(pending: &[PendingGrant]) -> Vec<&str> {
        pending.iter().map(|p| p.badge.code.as_str()).collect()
    }

    fn context<'a>(
        total: i64,
        record: &'a GameRecord,
        owned_codes: &'a HashSet<String>,
    ) -> RuleContext<'a> {
        RuleContext {
            user_id: 1,
            updated_total: total,
            game_record: record,
            owned_codes,
        }
    }

    fn evaluate(total: i64, record: &GameRecord, owned_codes: &HashSet<String>) -> Vec<PendingGrant> {
        let ctx = context(total, record, owned_codes);
        RuleEvaluator::standard().evaluate(&seeded_badges(), &ctx, Utc::now())
    }

    // 没有答对、没有物品、没有计时的局, 只会触发分数类徽章
    fn quiet_round(points: i32) -> GameRecord {
        round(points, 0, 1, 0)
    }

    #[test]
    fn threshold_is_inclusive() {
        let none = owned(&[]);
        assert_eq!(codes(&evaluate(10, &quiet_round(1), &none)), vec!["TRIEUR_MALIN"]);
        assert!(evaluate(9, &quiet_round(0), &none).is_empty());
    }

    #[test]
    fn single_jump_crosses_every_threshold_below_total() {
        let pending = evaluate(105, &quiet_round(100), &owned(&[]));
        assert_eq!(
            codes(&pending),
            vec![
                "TRIEUR_MALIN",
                "TRIEUR_FUTE",
                "TRIEUR_PROPRET",
                "TRIEUR_CHAMPION",
                "AMI_DE_RECY",
                "TRIEUR_NOVICE",
                "TRIEUR_DEBUTANT",
                "TRIEUR",
                "TRIEUR_APPLIQUE",
            ]
        );
    }

    #[test]
    fn owned_badges_are_skipped() {
        let pending = evaluate(30, &quiet_round(5), &owned(&["TRIEUR_MALIN", "AMI_DE_RECY"]));
        assert_eq!(codes(&pending), vec!["TRIEUR_NOVICE"]);
    }

    #[test]
    fn per_round_rules_ignore_total() {
        let pending = evaluate(0, &round(0, 20, 20, 1500), &owned(&[]));
        assert_eq!(
            codes(&pending),
            vec!["TRIEUR_RAPIDE", "TRIEUR_JOUEUR", "FIRST_GAME", "PERFECT_RUN"]
        );
    }

    #[test]
    fn untimed_round_is_not_fast() {
        let none = owned(&[]);
        let rule = BadgeRule::FasterThanMs(2000);
        assert!(!rule.is_satisfied(&context(0, &round(0, 0, 0, 0), &none)));
        assert!(rule.is_satisfied(&context(0, &round(0, 0, 0, 1999), &none)));
        assert!(!rule.is_satisfied(&context(0, &round(0, 0, 0, 2000), &none)));
    }

    #[test]
    fn perfect_run_on_empty_round_depends_on_interpretation() {
        let none = owned(&[]);
        let empty = round(0, 0, 0, 0);
        let ctx = context(0, &empty, &none);
        assert!(BadgeRule::PerfectRun { allow_empty: true }.is_satisfied(&ctx));
        assert!(!BadgeRule::PerfectRun { allow_empty: false }.is_satisfied(&ctx));
        // 标准规则表: 空局不算零失误
        assert!(!codes(&evaluate(0, &empty, &none)).contains(&"PERFECT_RUN"));
    }

    #[test]
    fn perfect_run_requires_no_mistakes() {
        let none = owned(&[]);
        assert!(codes(&evaluate(0, &round(0, 5, 5, 0), &none)).contains(&"PERFECT_RUN"));
        assert!(!codes(&evaluate(0, &round(0, 4, 5, 0), &none)).contains(&"PERFECT_RUN"));
    }

    #[test]
    fn collector_only_counts_badges_owned_before_the_round() {
        // 本局拿到第 5 个徽章, 收集徽章不在同一局发放
        let four = owned(&["TRIEUR_MALIN", "AMI_DE_RECY", "TRIEUR_NOVICE", "FIRST_GAME"]);
        let pending = evaluate(45, &quiet_round(5), &four);
        assert_eq!(codes(&pending), vec!["TRIEUR_FUTE"]);

        // 下一局已拥有 5 个
        let five = owned(&[
            "TRIEUR_MALIN",
            "AMI_DE_RECY",
            "TRIEUR_NOVICE",
            "FIRST_GAME",
            "TRIEUR_FUTE",
        ]);
        let pending = evaluate(45, &quiet_round(0), &five);
        assert_eq!(codes(&pending), vec!["PETIT_COLLECTIONNEUR"]);
    }

    #[test]
    fn badge_without_rule_is_never_granted() {
        let mut catalog = seeded_badges();
        catalog.push(Badge {
            id: 99,
            code: "STAGED_BADGE".to_string(),
            label: "Staged".to_string(),
            description: "Not enabled yet".to_string(),
            threshold: Some(1),
            icon: None,
        });
        let none = owned(&[]);
        let record = quiet_round(1000);
        let pending =
            RuleEvaluator::standard().evaluate(&catalog, &context(1000, &record, &none), Utc::now());
        assert!(!codes(&pending).contains(&"STAGED_BADGE"));
        assert_eq!(pending.len(), 13);
    }

    #[test]
    fn every_grant_shares_the_evaluation_timestamp() {
        let at = Utc::now();
        let none = owned(&[]);
        let record = quiet_round(50);
        let pending =
            RuleEvaluator::standard().evaluate(&seeded_badges(), &context(50, &record, &none), at);
        assert!(pending.len() > 1);
        assert!(pending.iter().all(|p| p.awarded_at == at));
    }

    #[test]
    fn custom_rule_table() {
        let evaluator = RuleEvaluator::new([("TRIEUR_MALIN", BadgeRule::TotalAtLeast(1000))]);
        assert_eq!(evaluator.rule_for("TRIEUR_MALIN"), Some(&BadgeRule::TotalAtLeast(1000)));
        assert_eq!(evaluator.rule_for("FIRST_GAME"), None);
    }

    #[test]
    fn standard_rules_cover_the_seeded_catalog() {
        let evaluator = RuleEvaluator::standard();
        for badge in seeded_badges() {
            assert!(evaluator.rule_for(&badge.code).is_some(), "{}", badge.code);
        }
    }
}
