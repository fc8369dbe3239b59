//src/items/src/lib.rs
//! 物品系统：消耗品与装备两类能力互斥的物品值对象。

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

pub use crate::consumable::{Consumable, ConsumableKind};
pub use crate::equipment::{Equipment, EquipmentSlot};

pub mod consumable;
pub mod equipment;

/// 物品稀有度（序列化与显示均使用小写名称）
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// 装备可以修改的属性
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stat {
    Attack,
    Defense,
}

/// 物品作用对象需要暴露的能力
///
/// Implemented by whoever carries items (the hero); the item crate never sees
/// concrete character types.
pub trait ItemTarget {
    fn target_name(&self) -> &str;

    fn is_alive(&self) -> bool;

    fn current_health(&self) -> u32;

    /// Health ceiling used by healing consumables.
    fn max_health(&self) -> u32;

    /// Restores up to `amount` health, never past `max_health`. Returns the
    /// amount actually restored.
    fn restore_health(&mut self, amount: u32) -> u32;

    fn level(&self) -> u32;

    /// Applies (positive) or reverses (negative) an equipment stat bonus.
    fn apply_equipment_bonus(&mut self, stat: Stat, delta: i32);
}

/// 基础物品结构
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub description: String,
    pub value: u32,
    pub rarity: Rarity,
    pub kind: ItemKind,
}

/// 物品能力类型，序列化时带有 `type` 标签
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemKind {
    Consumable(Consumable),
    Equipment(Equipment),
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: u32,
        rarity: Rarity,
        kind: ItemKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
            rarity,
            kind,
        }
    }

    /// 是否为消耗品
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable(_))
    }

    /// 是否为装备
    pub fn is_equipment(&self) -> bool {
        matches!(self.kind, ItemKind::Equipment(_))
    }

    pub fn as_consumable(&self) -> Option<&Consumable> {
        match &self.kind {
            ItemKind::Consumable(c) => Some(c),
            ItemKind::Equipment(_) => None,
        }
    }

    pub fn as_equipment(&self) -> Option<&Equipment> {
        match &self.kind {
            ItemKind::Equipment(e) => Some(e),
            ItemKind::Consumable(_) => None,
        }
    }

    pub fn as_equipment_mut(&mut self) -> Option<&mut Equipment> {
        match &mut self.kind {
            ItemKind::Equipment(e) => Some(e),
            ItemKind::Consumable(_) => None,
        }
    }

    /// 装备是否处于穿戴状态（消耗品恒为false）
    pub fn is_equipped(&self) -> bool {
        self.as_equipment().is_some_and(|e| e.equipped)
    }

    /// 检查物品能否作用于目标
    pub fn can_use<T: ItemTarget + ?Sized>(&self, target: &T) -> bool {
        match &self.kind {
            ItemKind::Consumable(c) => c.can_use(target),
            ItemKind::Equipment(e) => e.can_use(target),
        }
    }

    /// 使用物品：消耗品产生效果，装备切换穿戴状态
    ///
    /// Returns false without touching the target when the item cannot be
    /// used. Removing a spent consumable from the inventory is the owner's job.
    pub fn use_on<T: ItemTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        match &mut self.kind {
            ItemKind::Consumable(c) => c.apply(target),
            ItemKind::Equipment(e) => e.toggle(target),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}
