//src/dungeon/src/zone.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// 区域类型标签（存档中的 `type` 字段）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ZoneKind {
    SafeZone,
    CombatZone,
}

/// 区域内可执行的行动
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ZoneAction {
    Rest,
    Shop,
    Talk,
    Leave,
    Explore,
    Search,
}

/// 所有区域共有的信息
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInfo {
    pub name: String,
    pub description: String,
    pub danger_level: u32,
    pub discovered: bool,
    pub visited: bool,
}

impl ZoneInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>, danger_level: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            danger_level,
            discovered: false,
            visited: false,
        }
    }
}

/// 安全区：危险等级为0，不会发生战斗
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafeZone {
    pub info: ZoneInfo,
}

impl SafeZone {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            info: ZoneInfo::new(name, description, 0),
        }
    }
}

/// 战斗区：危险等级至少为1，带有允许出现的怪物列表
///
/// An empty `monster_types` list means the whole catalog may appear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatZone {
    pub info: ZoneInfo,
    pub monster_types: Vec<String>,
}

impl CombatZone {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        danger_level: u32,
        monster_types: Vec<String>,
    ) -> Self {
        Self {
            info: ZoneInfo::new(name, description, danger_level.max(1)),
            monster_types,
        }
    }
}

/// 可探索的区域
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Zone {
    Safe(SafeZone),
    Combat(CombatZone),
}

impl Zone {
    pub fn info(&self) -> &ZoneInfo {
        match self {
            Zone::Safe(zone) => &zone.info,
            Zone::Combat(zone) => &zone.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut ZoneInfo {
        match self {
            Zone::Safe(zone) => &mut zone.info,
            Zone::Combat(zone) => &mut zone.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn description(&self) -> &str {
        &self.info().description
    }

    pub fn danger_level(&self) -> u32 {
        self.info().danger_level
    }

    pub fn kind(&self) -> ZoneKind {
        match self {
            Zone::Safe(_) => ZoneKind::SafeZone,
            Zone::Combat(_) => ZoneKind::CombatZone,
        }
    }

    pub fn can_have_combat(&self) -> bool {
        matches!(self, Zone::Combat(_))
    }

    /// 允许出现的怪物（安全区为空）
    pub fn monster_types(&self) -> &[String] {
        match self {
            Zone::Safe(_) => &[],
            Zone::Combat(zone) => &zone.monster_types,
        }
    }

    pub fn available_actions(&self) -> &'static [ZoneAction] {
        match self {
            Zone::Safe(_) => &[
                ZoneAction::Rest,
                ZoneAction::Shop,
                ZoneAction::Talk,
                ZoneAction::Leave,
            ],
            Zone::Combat(_) => &[
                ZoneAction::Explore,
                ZoneAction::Search,
                ZoneAction::Rest,
                ZoneAction::Leave,
            ],
        }
    }

    pub fn mark_discovered(&mut self) {
        self.info_mut().discovered = true;
    }

    /// 访问过的区域同时视为已发现
    pub fn mark_visited(&mut self) {
        let info = self.info_mut();
        info.visited = true;
        info.discovered = true;
    }
}
