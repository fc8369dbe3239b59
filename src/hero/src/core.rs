// src/hero/src/core.rs
use thiserror::Error;
use tracing::debug;

use items::{Item, Stat};

use crate::bag::{DEFAULT_MAX_SLOTS, Inventory, InventoryError};
use crate::leveling;

/// 新英雄的初始生命
pub const STARTING_HEALTH: u32 = 100;
/// 新英雄的初始攻击
pub const STARTING_ATTACK: u32 = 15;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeroError {
    #[error("物品不存在: {0}")]
    ItemNotFound(String),
    #[error("无法使用此物品: {0}")]
    UnusableItem(String),
    #[error("不是装备: {0}")]
    NotEquipment(String),
    #[error("等级不足: requires {required}, hero is {level}")]
    LevelTooLow { required: u32, level: u32 },
    #[error("装备已穿戴: {0}")]
    AlreadyEquipped(String),
    #[error("装备未穿戴: {0}")]
    NotEquipped(String),
    #[error("技能冷却中: {0}")]
    SkillOnCooldown(String),
    #[error("无法使用此技能: {0}")]
    SkillUnusable(String),
    #[error("无效英雄数据: {0}")]
    InvalidSnapshot(String),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// 使用物品的结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemUse {
    Consumed,
    Equipped,
    Unequipped,
}

/// 英雄核心数据结构
///
/// `attack` 始终等于 `base_attack + equipment_attack_bonus`，
/// 生命上限即 `base_health`。
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    pub name: String,
    pub(crate) health: u32,
    pub(crate) attack: u32,
    pub(crate) is_defending: bool,

    // 成长系统
    pub(crate) level: u32,
    pub(crate) experience: u32,
    pub(crate) experience_to_next: u32,
    pub(crate) skill_points: u32,
    pub(crate) base_health: u32,
    pub(crate) base_attack: u32,

    // 装备加成（防御加成也计入攻击，见 `apply_equipment_bonus`）
    pub(crate) equipment_attack_bonus: i32,
    pub(crate) equipment_defense_bonus: i32,

    pub(crate) inventory: Inventory,
}

impl Hero {
    /// 创建新英雄，默认背包槽位
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_inventory_slots(name, DEFAULT_MAX_SLOTS)
    }

    /// 创建新英雄并放入初始装备（不自动穿戴）
    pub fn with_inventory_slots(name: impl Into<String>, max_slots: usize) -> Self {
        let mut hero = Self::bare(name, Inventory::new(max_slots));
        if let Err(e) = hero.inventory.initialize_starter_gear() {
            debug!("starter gear skipped: {e}");
        }
        hero
    }

    /// 空背包的英雄
    pub(crate) fn bare(name: impl Into<String>, inventory: Inventory) -> Self {
        Self {
            name: name.into(),
            health: STARTING_HEALTH,
            attack: STARTING_ATTACK,
            is_defending: false,
            level: 1,
            experience: 0,
            experience_to_next: leveling::experience_to_next_level(1, 0),
            skill_points: 0,
            base_health: STARTING_HEALTH,
            base_attack: STARTING_ATTACK,
            equipment_attack_bonus: 0,
            equipment_defense_bonus: 0,
            inventory,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.base_health
    }

    /// 含装备加成的攻击力
    pub fn total_attack(&self) -> u32 {
        self.attack
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next(&self) -> u32 {
        self.experience_to_next
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn base_health(&self) -> u32 {
        self.base_health
    }

    pub fn base_attack(&self) -> u32 {
        self.base_attack
    }

    pub fn equipment_attack_bonus(&self) -> i32 {
        self.equipment_attack_bonus
    }

    /// 名义防御加成，仅用于展示
    pub fn equipment_defense_bonus(&self) -> i32 {
        self.equipment_defense_bonus
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// 治疗，不超过生命上限。返回实际恢复量
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.base_health).max(before);
        self.health - before
    }

    /// 完全恢复生命（在安全区休息）
    pub fn rest(&mut self) -> u32 {
        self.heal(self.base_health)
    }

    /// 按名称使用背包中的物品
    ///
    /// 消耗品生效后从背包移除；装备在穿戴与卸下之间切换并留在背包中。
    /// 失败时英雄与背包都保持不变。
    pub fn use_item(&mut self, name: &str) -> Result<ItemUse, HeroError> {
        let mut item = self
            .inventory
            .detach(name)
            .ok_or_else(|| HeroError::ItemNotFound(name.to_string()))?;

        if let Err(e) = self.check_usable(&item) {
            self.inventory.reattach(item);
            return Err(e);
        }

        let was_equipped = item.is_equipped();
        if !item.use_on(self) {
            self.inventory.reattach(item);
            return Err(HeroError::UnusableItem(name.to_string()));
        }

        let outcome = if item.is_consumable() {
            ItemUse::Consumed
        } else if was_equipped {
            ItemUse::Unequipped
        } else {
            ItemUse::Equipped
        };
        debug!(hero = %self.name, item = name, ?outcome, "item used");

        if outcome == ItemUse::Consumed {
            self.inventory.settle(name);
        } else {
            self.inventory.reattach(item);
        }
        Ok(outcome)
    }

    fn check_usable(&self, item: &Item) -> Result<(), HeroError> {
        if let Some(equipment) = item.as_equipment() {
            if !equipment.equipped && !equipment.can_equip(self.level) {
                return Err(HeroError::LevelTooLow {
                    required: equipment.required_level,
                    level: self.level,
                });
            }
        }
        if !item.can_use(self) {
            return Err(HeroError::UnusableItem(item.name.clone()));
        }
        Ok(())
    }

    /// 切换装备的穿戴状态，返回切换后是否处于穿戴状态
    pub fn toggle_equipment(&mut self, name: &str) -> Result<bool, HeroError> {
        match self.inventory.get_item(name) {
            None => return Err(HeroError::ItemNotFound(name.to_string())),
            Some(item) if !item.is_equipment() => {
                return Err(HeroError::NotEquipment(name.to_string()));
            }
            Some(_) => {}
        }
        Ok(self.use_item(name)? == ItemUse::Equipped)
    }

    /// 穿戴装备；已穿戴时报错且不做修改
    pub fn equip(&mut self, name: &str) -> Result<(), HeroError> {
        if self.inventory.get_item(name).is_some_and(Item::is_equipped) {
            return Err(HeroError::AlreadyEquipped(name.to_string()));
        }
        self.toggle_equipment(name).map(|_| ())
    }

    /// 卸下装备；未穿戴时报错且不做修改
    pub fn unequip(&mut self, name: &str) -> Result<(), HeroError> {
        match self.inventory.get_item(name) {
            Some(item) if item.is_equipment() && !item.is_equipped() => {
                Err(HeroError::NotEquipped(name.to_string()))
            }
            _ => self.toggle_equipment(name).map(|_| ()),
        }
    }

    /// 重新计算攻击力，保证 attack = base_attack + equipment_attack_bonus
    pub(crate) fn refresh_attack(&mut self) {
        let total = i64::from(self.base_attack) + i64::from(self.equipment_attack_bonus);
        self.attack = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
    }

    pub(crate) fn add_equipment_bonus(&mut self, stat: Stat, delta: i32) {
        if stat == Stat::Defense {
            self.equipment_defense_bonus += delta;
        }
        // 暂无独立防御属性，防御加成同样计入攻击
        self.equipment_attack_bonus += delta;
        self.refresh_attack();
    }
}
