//src/dungeon/src/record.rs
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::zone::{CombatZone, SafeZone, Zone, ZoneInfo, ZoneKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("未知区域类型: {0}")]
    UnknownType(String),
    #[error("{kind} 危险等级无效: {danger_level}")]
    InvalidDangerLevel { kind: ZoneKind, danger_level: u32 },
}

/// 存档中允许的最高危险等级
pub const MAX_DANGER_LEVEL: u32 = 99;

/// 区域的存档记录
///
/// `type` is kept as a plain string so an unknown tag surfaces as a
/// reconstruction error rather than a parse error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    #[serde(flatten)]
    pub info: ZoneInfo,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_types: Option<Vec<String>>,
}

impl Zone {
    pub fn to_record(&self) -> ZoneRecord {
        ZoneRecord {
            info: self.info().clone(),
            kind: self.kind().to_string(),
            monster_types: match self {
                Zone::Safe(_) => None,
                Zone::Combat(zone) => Some(zone.monster_types.clone()),
            },
        }
    }

    /// 根据类型标签重建对应的区域
    pub fn from_record(record: ZoneRecord) -> Result<Zone, ZoneError> {
        let kind = ZoneKind::from_str(&record.kind)
            .map_err(|_| ZoneError::UnknownType(record.kind.clone()))?;

        // 安全区为0，战斗区为 1..=MAX_DANGER_LEVEL
        let danger_level = record.info.danger_level;
        let valid = match kind {
            ZoneKind::SafeZone => danger_level == 0,
            ZoneKind::CombatZone => (1..=MAX_DANGER_LEVEL).contains(&danger_level),
        };
        if !valid {
            return Err(ZoneError::InvalidDangerLevel { kind, danger_level });
        }
        Ok(match kind {
            ZoneKind::SafeZone => Zone::Safe(SafeZone { info: record.info }),
            ZoneKind::CombatZone => Zone::Combat(CombatZone {
                info: record.info,
                monster_types: record.monster_types.unwrap_or_default(),
            }),
        })
    }
}
