//! 测试用内存仓库
//!
//! 事务持有整个状态的锁, 相当于数据库里对用户行加锁; 未提交的事务在 drop 时回滚.
//! (user_id, badge_id) 与 (user_id, item_id) 的唯一约束和 MySQL 表结构一致.

use crate::model::badge::{Badge, Grant, OwnedBadge};
use crate::model::score::{GameRecord, NewGameRecord};
use crate::model::shop::ShopItem;
use crate::model::user::{LeaderboardEntry, User, UserStats};
use crate::repository::badge_repository::BadgeRepositoryTrait;
use crate::repository::score_repository::{LedgerTransaction, ScoreRepositoryTrait};
use crate::repository::shop_repository::{PurchaseOutcome, ShopRepositoryTrait};
use crate::repository::user_repository::{NewUser, UserRepositoryTrait};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Arc, RwLock};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    pub users: BTreeMap<i64, User>,
    pub scores: Vec<GameRecord>,
    pub grants: Vec<Grant>,
    pub items: Vec<ShopItem>,
    pub inventory: BTreeSet<(i64, i64)>,
    pub fail_owned_codes: bool,
    // 模拟并发下读到旧快照: 已拥有集合读成空
    pub stale_owned_codes: bool,
    pub fail_commit: bool,
    next_user_id: i64,
    next_score_id: i64,
}

impl MemoryState {
    pub fn total_of(&self, user_id: i64) -> Option<i64> {
        self.users.get(&user_id).map(|user| user.total_score)
    }

    pub fn grant_count(&self, user_id: i64, badge_id: i64) -> usize {
        self.grants
            .iter()
            .filter(|g| g.user_id == user_id && g.badge_id == badge_id)
            .count()
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    badges: Arc<RwLock<Vec<Badge>>>,
}

impl MemoryStore {
    pub fn with_badges(badges: Vec<Badge>) -> Self {
        Self {
            state: Default::default(),
            badges: Arc::new(RwLock::new(badges)),
        }
    }

    pub async fn add_user(&self, username: &str, total_score: i64) -> i64 {
        let mut state = self.state.lock().await;
        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: String::new(),
                total_score,
                created_at: Utc::now(),
                last_login_at: None,
            },
        );
        id
    }

    pub async fn add_item(&self, item: ShopItem) {
        self.state.lock().await.items.push(item);
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    pub async fn update<F: FnOnce(&mut MemoryState)>(&self, f: F) {
        let mut state = self.state.lock().await;
        f(&mut state);
    }

    fn badge_code(&self, badge_id: i64) -> Option<String> {
        self.badges
            .read()
            .ok()?
            .iter()
            .find(|b| b.id == badge_id)
            .map(|b| b.code.clone())
    }
}

fn injected_failure(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("injected failure: {what}"))
}

pub struct MemoryLedgerTransaction {
    store: MemoryStore,
    guard: OwnedMutexGuard<MemoryState>,
    undo: MemoryState,
    savepoints: Vec<(String, MemoryState)>,
    committed: bool,
}

impl Drop for MemoryLedgerTransaction {
    fn drop(&mut self) {
        if !self.committed {
            *self.guard = std::mem::take(&mut self.undo);
        }
    }
}

#[async_trait]
impl LedgerTransaction for MemoryLedgerTransaction {
    async fn user_exists(&mut self, user_id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.guard.users.contains_key(&user_id))
    }

    async fn insert_game_record(
        &mut self,
        user_id: i64,
        record: &NewGameRecord,
        played_at: DateTime<Utc>,
    ) -> Result<GameRecord, sqlx::Error> {
        self.guard.next_score_id += 1;
        let game_record = GameRecord {
            id: self.guard.next_score_id,
            user_id,
            points: record.points,
            correct_items: record.correct_items,
            total_items: record.total_items,
            duration_ms: record.duration_ms,
            played_at,
        };
        self.guard.scores.push(game_record.clone());
        Ok(game_record)
    }

    async fn add_points(&mut self, user_id: i64, points: i64) -> Result<i64, sqlx::Error> {
        let user = self
            .guard
            .users
            .get_mut(&user_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        user.total_score += points;
        Ok(user.total_score)
    }

    async fn owned_badge_codes(&mut self, user_id: i64) -> Result<HashSet<String>, sqlx::Error> {
        if self.guard.fail_owned_codes {
            return Err(injected_failure("owned_badge_codes"));
        }
        if self.guard.stale_owned_codes {
            return Ok(HashSet::new());
        }
        Ok(self
            .guard
            .grants
            .iter()
            .filter(|g| g.user_id == user_id)
            .filter_map(|g| self.store.badge_code(g.badge_id))
            .collect())
    }

    async fn insert_grant(&mut self, grant: &Grant) -> Result<bool, sqlx::Error> {
        if self.guard.grant_count(grant.user_id, grant.badge_id) > 0 {
            return Ok(false);
        }
        self.guard.grants.push(grant.clone());
        Ok(true)
    }

    async fn savepoint(&mut self, name: &str) -> Result<(), sqlx::Error> {
        self.savepoints.push((name.to_string(), self.guard.clone()));
        Ok(())
    }

    async fn rollback_to_savepoint(&mut self, name: &str) -> Result<(), sqlx::Error> {
        let (_, state) = self
            .savepoints
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .ok_or_else(|| injected_failure("unknown savepoint"))?;
        *self.guard = state.clone();
        Ok(())
    }

    async fn release_savepoint(&mut self, name: &str) -> Result<(), sqlx::Error> {
        self.savepoints.retain(|(n, _)| n != name);
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), sqlx::Error> {
        if self.guard.fail_commit {
            // drop 时回滚
            return Err(injected_failure("commit"));
        }
        self.committed = true;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[async_trait]
impl ScoreRepositoryTrait for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, sqlx::Error> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let undo = guard.clone();
        Ok(Box::new(MemoryLedgerTransaction {
            store: self.clone(),
            guard,
            undo,
            savepoints: vec![],
            committed: false,
        }))
    }

    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
        let state = self.state.lock().await;
        let mut users: Vec<&User> = state.users.values().collect();
        users.sort_by(|a, b| b.total_score.cmp(&a.total_score).then(a.id.cmp(&b.id)));
        Ok(users
            .into_iter()
            .take(limit as usize)
            .map(|u| LeaderboardEntry {
                username: u.username.clone(),
                total_score: u.total_score,
            })
            .collect())
    }

    async fn get_user_stats(&self, user_id: i64) -> Result<UserStats, sqlx::Error> {
        let state = self.state.lock().await;
        let rounds: Vec<&GameRecord> = state.scores.iter().filter(|s| s.user_id == user_id).collect();
        Ok(UserStats {
            games_played: rounds.len() as i64,
            best_points: rounds.iter().map(|s| s.points as i64).max().unwrap_or(0),
            correct_items: rounds.iter().map(|s| s.correct_items as i64).sum(),
        })
    }
}

#[async_trait]
impl BadgeRepositoryTrait for MemoryStore {
    async fn load_badges(&self) -> Result<Vec<Badge>, sqlx::Error> {
        self.badges
            .read()
            .map(|badges| badges.clone())
            .map_err(|_| injected_failure("badges lock"))
    }

    async fn get_user_badges(&self, user_id: i64) -> Result<Vec<OwnedBadge>, sqlx::Error> {
        let badges = self.load_badges().await?;
        let state = self.state.lock().await;
        let mut owned: Vec<(DateTime<Utc>, i64, OwnedBadge)> = state
            .grants
            .iter()
            .filter(|g| g.user_id == user_id)
            .filter_map(|g| {
                badges.iter().find(|b| b.id == g.badge_id).map(|b| {
                    (
                        g.awarded_at,
                        b.id,
                        OwnedBadge {
                            code: b.code.clone(),
                            label: b.label.clone(),
                            description: b.description.clone(),
                            awarded_at: g.awarded_at,
                        },
                    )
                })
            })
            .collect();
        owned.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        Ok(owned.into_iter().map(|(_, _, badge)| badge).collect())
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        Ok(self.state.lock().await.users.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.email == email))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, sqlx::Error> {
        let mut state = self.state.lock().await;
        state.next_user_id += 1;
        let created = User {
            id: state.next_user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            total_score: 0,
            created_at: user.created_at,
            last_login_at: None,
        };
        state.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_last_login(&self, user_id: i64, at: DateTime<Utc>) -> Result<(), sqlx::Error> {
        let mut state = self.state.lock().await;
        if let Some(user) = state.users.get_mut(&user_id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl ShopRepositoryTrait for MemoryStore {
    async fn get_active_items(&self) -> Result<Vec<ShopItem>, sqlx::Error> {
        let state = self.state.lock().await;
        let mut items: Vec<ShopItem> = state.items.iter().filter(|i| i.is_active).cloned().collect();
        items.sort_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn find_item(&self, item_id: i64) -> Result<Option<ShopItem>, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state.items.iter().find(|i| i.id == item_id).cloned())
    }

    async fn owns_item(&self, user_id: i64, item_id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.state.lock().await.inventory.contains(&(user_id, item_id)))
    }

    async fn purchase(&self, user_id: i64, item: &ShopItem) -> Result<PurchaseOutcome, sqlx::Error> {
        let mut state = self.state.lock().await;
        let balance = state.total_of(user_id).ok_or(sqlx::Error::RowNotFound)?;
        if balance < item.price as i64 {
            return Ok(PurchaseOutcome::InsufficientPoints { balance });
        }
        if !state.inventory.insert((user_id, item.id)) {
            return Ok(PurchaseOutcome::AlreadyOwned);
        }
        let user = state.users.get_mut(&user_id).ok_or(sqlx::Error::RowNotFound)?;
        user.total_score -= item.price as i64;
        Ok(PurchaseOutcome::Purchased {
            new_total: user.total_score,
        })
    }
}

/// 与种子迁移一致的徽章目录
pub fn seeded_badges() -> Vec<Badge> {
    [
        ("TRIEUR_MALIN", Some(10)),
        ("TRIEUR_FUTE", Some(40)),
        ("TRIEUR_PROPRET", Some(60)),
        ("TRIEUR_CHAMPION", Some(80)),
        ("TRIEUR_RAPIDE", Some(2000)),
        ("TRIEUR_JOUEUR", Some(20)),
        ("AMI_DE_RECY", Some(25)),
        ("FIRST_GAME", Some(1)),
        ("PERFECT_RUN", None),
        ("TRIEUR_NOVICE", Some(30)),
        ("TRIEUR_DEBUTANT", Some(50)),
        ("TRIEUR", Some(70)),
        ("TRIEUR_APPLIQUE", Some(100)),
        ("200_POINTS", Some(200)),
        ("TRIEUR_ASSIDU", Some(300)),
        ("400_POINTS", Some(400)),
        ("TRIEUR_CONFIRME", Some(500)),
        ("PETIT_COLLECTIONNEUR", Some(5)),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (code, threshold))| Badge {
        id: i as i64 + 1,
        code: code.to_string(),
        label: code.to_lowercase(),
        description: format!("{code} description"),
        threshold,
        icon: None,
    })
    .collect()
}
