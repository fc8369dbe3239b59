// src/save/src/record.rs
use serde::{Deserialize, Serialize};

use dungeon::{Zone, ZoneError, ZoneRecord};
use error::GameError;
use hero::{Hero, HeroError, HeroSnapshot};

/// 当前存档格式版本
pub const SAVE_VERSION: &str = "1.0.0";

/// 存档记录必须包含的顶层字段
pub const REQUIRED_FIELDS: [&str; 3] = ["hero", "currentZone", "version"];

/// 单个槽位中的完整存档
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub hero: HeroSnapshot,
    pub current_zone: ZoneRecord,
    pub version: String,
}

/// 读档后重建出的游戏状态
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub hero: Hero,
    pub zone: Zone,
}

impl SaveRecord {
    pub fn capture(hero: &Hero, zone: &Zone) -> Self {
        Self {
            hero: hero.snapshot(),
            current_zone: zone.to_record(),
            version: SAVE_VERSION.to_string(),
        }
    }
}

/// 版本号主版本必须与当前格式一致
pub fn check_version(version: &str) -> Result<(), GameError> {
    let major = |v: &str| v.split('.').next().map(str::trim).unwrap_or_default().to_string();
    if major(version).is_empty() || major(version) != major(SAVE_VERSION) {
        return Err(GameError::VersionMismatch(format!(
            "save is {version}, expected {SAVE_VERSION}"
        )));
    }
    Ok(())
}

/// 从存档记录重建英雄与区域，任何一步失败都不会返回半成品
pub fn reconstruct_game_state(record: SaveRecord) -> Result<GameState, GameError> {
    check_version(&record.version)?;

    let hero = Hero::from_snapshot(record.hero).map_err(|e| match e {
        HeroError::InvalidSnapshot(msg) => GameError::InvalidHeroData(msg),
        other => GameError::InvalidHeroData(other.to_string()),
    })?;
    let zone = Zone::from_record(record.current_zone).map_err(|e| match e {
        ZoneError::UnknownType(tag) => GameError::UnknownZoneType(tag),
        invalid @ ZoneError::InvalidDangerLevel { .. } => {
            GameError::InvalidZoneData(invalid.to_string())
        }
    })?;

    Ok(GameState { hero, zone })
}
