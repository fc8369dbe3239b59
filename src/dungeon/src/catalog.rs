//src/dungeon/src/catalog.rs
use std::sync::LazyLock;

use combat::Monster;

/// 怪物模板：遭遇时按区域危险等级缩放
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub health: u32,
    pub attack: u32,
}

/// 每高一级危险等级增加的生命
pub const HEALTH_PER_DANGER: u32 = 10;
/// 每高一级危险等级增加的攻击
pub const ATTACK_PER_DANGER: u32 = 2;

/// 只读怪物表，启动时加载一次
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterCatalog {
    templates: Vec<MonsterTemplate>,
}

static STANDARD: LazyLock<MonsterCatalog> = LazyLock::new(|| {
    MonsterCatalog::new(
        ["Goblin", "Ogre", "Orc", "Slime"]
            .into_iter()
            .map(|name| MonsterTemplate {
                name,
                health: 60,
                attack: 12,
            })
            .collect(),
    )
});

impl MonsterCatalog {
    pub fn new(templates: Vec<MonsterTemplate>) -> Self {
        Self { templates }
    }

    /// 标准怪物表
    pub fn standard() -> &'static MonsterCatalog {
        &STANDARD
    }

    pub fn get(&self, name: &str) -> Option<&MonsterTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// 生成按危险等级缩放后的怪物
    pub fn spawn(&self, name: &str, danger_level: u32) -> Option<Monster> {
        self.get(name).map(|template| template.scaled(danger_level))
    }
}

impl MonsterTemplate {
    pub fn scaled(&self, danger_level: u32) -> Monster {
        let steps = danger_level.saturating_sub(1);
        Monster::new(
            self.name,
            self.health
                .saturating_add(HEALTH_PER_DANGER.saturating_mul(steps)),
            self.attack
                .saturating_add(ATTACK_PER_DANGER.saturating_mul(steps)),
        )
    }
}
