use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display, Formatter};

use crate::outfit::STARTER_OUTFIT;
use crate::profile::ProfileError;

pub const MAX_USERNAME_LEN: usize = 20;
const XP_PER_LEVEL: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Rank {
    Beginner,
    Builder,
    Architect,
    Master,
    Legend,
}

impl Rank {
    pub fn for_xp(xp: u64) -> Self {
        match xp {
            0..=99 => Self::Beginner,
            100..=499 => Self::Builder,
            500..=999 => Self::Architect,
            1000..=4999 => Self::Master,
            _ => Self::Legend,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedBlock {
    pub block_id: u16,
    pub quantity: u32,
    #[serde(default)]
    pub token_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandRecord {
    pub chunk_x: i32,
    pub chunk_z: i32,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub purchased_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub blocks_placed: u64,
    pub blocks_destroyed: u64,
    pub distance_traveled: f64,
    pub time_spent_building: u64,
}

/// Counter increments keyed by `GameStats` field name.
pub type StatsUpdate = HashMap<String, f64>;

impl GameStats {
    pub fn apply(&mut self, update: &StatsUpdate) {
        for (key, &delta) in update {
            match key.as_str() {
                "blocksPlaced" => add_count(&mut self.blocks_placed, delta),
                "blocksDestroyed" => add_count(&mut self.blocks_destroyed, delta),
                "distanceTraveled" => {
                    self.distance_traveled = (self.distance_traveled + delta).max(0.0)
                }
                "timeSpentBuilding" => add_count(&mut self.time_spent_building, delta),
                _ => {}
            }
        }
    }
}

fn add_count(counter: &mut u64, delta: f64) {
    *counter = (*counter as f64 + delta).max(0.0).round() as u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpGain {
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Profile document, one per wallet address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub selected_outfit: u32,
    pub owned_outfits: BTreeSet<u32>,
    #[serde(default)]
    pub owned_blocks: Vec<OwnedBlock>,
    #[serde(default)]
    pub land_owned: Vec<LandRecord>,
    pub level: u32,
    pub xp: u64,
    #[serde(default)]
    pub total_play_time: u64,
    pub last_login: DateTime<Utc>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub game_stats: GameStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Fresh profile wearing the starter outfit. `address` must already be normalised.
    pub fn new(address: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            address: address.into(),
            username: None,
            selected_outfit: STARTER_OUTFIT,
            owned_outfits: BTreeSet::from([STARTER_OUTFIT]),
            owned_blocks: Vec::new(),
            land_owned: Vec::new(),
            level: 1,
            xp: 0,
            total_play_time: 0,
            last_login: now,
            achievements: Vec::new(),
            game_stats: GameStats::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rank(&self) -> Rank {
        Rank::for_xp(self.xp)
    }

    pub fn add_xp(&mut self, amount: u64) -> XpGain {
        self.xp = self.xp.saturating_add(amount);
        let earned = u32::try_from(self.xp / XP_PER_LEVEL + 1).unwrap_or(u32::MAX);
        if earned > self.level {
            self.level = earned;
            XpGain {
                leveled_up: true,
                new_level: self.level,
            }
        } else {
            XpGain {
                leveled_up: false,
                new_level: self.level,
            }
        }
    }

    pub fn owns_outfit(&self, id: u32) -> bool {
        self.owned_outfits.contains(&id)
    }

    /// Returns false if the outfit was already owned.
    pub fn unlock_outfit(&mut self, id: u32) -> bool {
        self.owned_outfits.insert(id)
    }

    pub fn select_outfit(&mut self, id: u32) -> Result<(), ProfileError> {
        if !self.owns_outfit(id) {
            return Err(ProfileError::OutfitNotOwned(id));
        }
        self.selected_outfit = id;
        Ok(())
    }

    pub fn apply_stats(&mut self, update: &StatsUpdate) {
        self.game_stats.apply(update);
    }

    /// Applies a profile edit. Nothing changes if validation fails.
    pub fn apply_update(&mut self, update: PlayerUpdate) -> Result<(), ProfileError> {
        let username = match update.username {
            Some(name) => {
                let name = name.trim().to_string();
                if name.chars().count() > MAX_USERNAME_LEN {
                    return Err(ProfileError::UsernameTooLong);
                }
                Some((!name.is_empty()).then_some(name))
            }
            None => None,
        };

        let mut owned = update.owned_outfits.unwrap_or_else(|| self.owned_outfits.clone());
        owned.insert(STARTER_OUTFIT);
        let selected = update.selected_outfit.unwrap_or(self.selected_outfit);
        if !owned.contains(&selected) {
            return Err(ProfileError::OutfitNotOwned(selected));
        }

        if let Some(name) = username {
            self.username = name;
        }
        self.owned_outfits = owned;
        self.selected_outfit = selected;
        if let Some(blocks) = update.owned_blocks {
            self.owned_blocks = blocks;
        }
        if let Some(land) = update.land_owned {
            self.land_owned = land;
        }
        if let Some(time) = update.total_play_time {
            self.total_play_time = time;
        }
        if let Some(achievements) = update.achievements {
            self.achievements = achievements;
        }
        if let Some(stats) = update.game_stats {
            self.game_stats = stats;
        }
        Ok(())
    }

    pub fn view(&self) -> PlayerView<'_> {
        PlayerView {
            address: &self.address,
            username: self.username.as_deref(),
            selected_outfit: self.selected_outfit,
            owned_outfits: &self.owned_outfits,
            owned_blocks: &self.owned_blocks,
            land_owned: &self.land_owned,
            level: self.level,
            xp: self.xp,
            rank: self.rank(),
            total_play_time: self.total_play_time,
            game_stats: &self.game_stats,
            achievements: &self.achievements,
            joined_at: self.created_at,
        }
    }
}

/// Writable profile fields. `xp` and `level` only change through `add_xp`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub username: Option<String>,
    pub selected_outfit: Option<u32>,
    pub owned_outfits: Option<BTreeSet<u32>>,
    pub owned_blocks: Option<Vec<OwnedBlock>>,
    pub land_owned: Option<Vec<LandRecord>>,
    pub total_play_time: Option<u64>,
    pub achievements: Option<Vec<Achievement>>,
    pub game_stats: Option<GameStats>,
}

/// Profile as returned by `GET /players/:address`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView<'a> {
    pub address: &'a str,
    pub username: Option<&'a str>,
    pub selected_outfit: u32,
    pub owned_outfits: &'a BTreeSet<u32>,
    pub owned_blocks: &'a [OwnedBlock],
    pub land_owned: &'a [LandRecord],
    pub level: u32,
    pub xp: u64,
    pub rank: Rank,
    pub total_play_time: u64,
    pub game_stats: &'a GameStats,
    pub achievements: &'a [Achievement],
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderboardKind {
    #[default]
    Xp,
    Level,
    Blocks,
    Playtime,
}

impl LeaderboardKind {
    /// Unknown names fall back to XP.
    pub fn from_param(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "level" => Self::Level,
            "blocks" => Self::Blocks,
            "playtime" => Self::Playtime,
            _ => Self::Xp,
        }
    }

    pub fn sort(&self, players: &mut [Player]) {
        match self {
            Self::Xp => players.sort_by_key(|p| Reverse(p.xp)),
            Self::Level => players.sort_by_key(|p| Reverse((p.level, p.xp))),
            Self::Blocks => players.sort_by_key(|p| Reverse(p.game_stats.blocks_placed)),
            Self::Playtime => players.sort_by_key(|p| Reverse(p.total_play_time)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub level: u32,
    pub xp: u64,
    pub game_stats: GameStats,
    pub total_play_time: u64,
}

impl From<Player> for LeaderboardEntry {
    fn from(p: Player) -> Self {
        Self {
            address: p.address,
            username: p.username,
            level: p.level,
            xp: p.xp,
            game_stats: p.game_stats,
            total_play_time: p.total_play_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("0xabc", Utc::now())
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.level, 1);
        assert_eq!(p.selected_outfit, 1);
        assert!(p.owns_outfit(1));
        assert_eq!(p.rank(), Rank::Beginner);
    }

    #[test]
    fn test_add_xp_levels() {
        let mut p = player();
        assert_eq!(
            p.add_xp(99),
            XpGain {
                leveled_up: false,
                new_level: 1
            }
        );
        assert_eq!(
            p.add_xp(1),
            XpGain {
                leveled_up: true,
                new_level: 2
            }
        );
        let gain = p.add_xp(250);
        assert_eq!(gain.new_level, 4);
        assert_eq!(p.xp, 350);
        assert_eq!(p.rank(), Rank::Builder);
    }

    #[test]
    fn test_add_xp_is_deterministic() {
        let mut a = player();
        let mut b = a.clone();
        for _ in 0..7 {
            assert_eq!(a.add_xp(45), b.add_xp(45));
        }
        assert_eq!(a.level, b.level);
        assert_eq!(a.level as u64, a.xp / 100 + 1);
    }

    #[test]
    fn test_level_never_drops() {
        let mut p = player();
        p.level = 9;
        let gain = p.add_xp(10);
        assert!(!gain.leveled_up);
        assert_eq!(p.level, 9);
    }

    #[test]
    fn test_rank_thresholds() {
        let ranks: Vec<Rank> = [0, 99, 100, 499, 500, 999, 1000, 4999, 5000]
            .into_iter()
            .map(Rank::for_xp)
            .collect();
        assert_eq!(
            ranks,
            vec![
                Rank::Beginner,
                Rank::Beginner,
                Rank::Builder,
                Rank::Builder,
                Rank::Architect,
                Rank::Architect,
                Rank::Master,
                Rank::Master,
                Rank::Legend
            ]
        );
    }

    #[test]
    fn test_stats_ignore_unknown_keys() {
        let mut p = player();
        let update: StatsUpdate = [
            ("blocksPlaced".to_string(), 5.0),
            ("distanceTraveled".to_string(), 12.5),
            ("jumps".to_string(), 3.0),
        ]
        .into_iter()
        .collect();
        p.apply_stats(&update);
        p.apply_stats(&update);
        assert_eq!(p.game_stats.blocks_placed, 10);
        assert_eq!(p.game_stats.distance_traveled, 25.0);
        assert_eq!(p.game_stats.blocks_destroyed, 0);
    }

    #[test]
    fn test_update_keeps_starter_outfit() {
        let mut p = player();
        p.apply_update(PlayerUpdate {
            username: Some("  Steve  ".into()),
            owned_outfits: Some(BTreeSet::from([3])),
            selected_outfit: Some(3),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.username.as_deref(), Some("Steve"));
        assert_eq!(p.owned_outfits, BTreeSet::from([1, 3]));
        assert_eq!(p.selected_outfit, 3);
    }

    #[test]
    fn test_update_validation_is_atomic() {
        let mut p = player();
        let before = p.clone();

        let long = p.apply_update(PlayerUpdate {
            username: Some("a".repeat(21)),
            total_play_time: Some(60),
            ..Default::default()
        });
        assert!(matches!(long, Err(ProfileError::UsernameTooLong)));

        let unowned = p.apply_update(PlayerUpdate {
            selected_outfit: Some(5),
            ..Default::default()
        });
        assert!(matches!(unowned, Err(ProfileError::OutfitNotOwned(5))));
        assert_eq!(p, before);
    }

    #[test]
    fn test_update_ignores_xp_fields() {
        let update: PlayerUpdate =
            serde_json::from_str(r#"{"xp": 100000, "level": 99, "totalPlayTime": 30}"#).unwrap();
        let mut p = player();
        p.apply_update(update).unwrap();
        assert_eq!((p.xp, p.level, p.total_play_time), (0, 1, 30));
    }

    #[test]
    fn test_leaderboard_sorting() {
        let now = Utc::now();
        let mut players: Vec<Player> = (0..3).map(|i| Player::new(format!("0x{i}"), now)).collect();
        players[0].add_xp(150);
        players[1].add_xp(199);
        players[1].level = 5;
        players[2].add_xp(300);
        players[2].game_stats.blocks_placed = 9;

        LeaderboardKind::Xp.sort(&mut players);
        assert_eq!(players[0].address, "0x2");
        LeaderboardKind::Level.sort(&mut players);
        assert_eq!(players[0].address, "0x1");
        LeaderboardKind::from_param("whatever").sort(&mut players);
        assert_eq!(players[2].address, "0x0");
    }

    #[test]
    fn test_view_json_shape() {
        let p = player();
        let json = serde_json::to_value(p.view()).unwrap();
        assert_eq!(json["rank"], "Beginner");
        assert_eq!(json["ownedOutfits"], serde_json::json!([1]));
        assert!(json.get("joinedAt").is_some());
        assert_eq!(json["gameStats"]["blocksPlaced"], 0);
    }
}
