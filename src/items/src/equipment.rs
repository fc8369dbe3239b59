//src/items/src/equipment.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter};

use crate::{Item, ItemKind, ItemTarget, Rarity, Stat};

/// 装备槽位
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// 可穿戴装备：穿戴时把属性加成施加到持有者身上，卸下时撤销
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub slot: EquipmentSlot,
    pub required_level: u32,
    pub equipped: bool,
    pub stat_bonuses: BTreeMap<Stat, i32>,
}

impl Equipment {
    pub fn new(slot: EquipmentSlot, required_level: u32, stat_bonuses: BTreeMap<Stat, i32>) -> Self {
        Self {
            slot,
            required_level,
            equipped: false,
            stat_bonuses,
        }
    }

    pub fn weapon(attack_bonus: i32, required_level: u32) -> Self {
        Self::new(
            EquipmentSlot::Weapon,
            required_level,
            BTreeMap::from([(Stat::Attack, attack_bonus)]),
        )
    }

    pub fn armor(defense_bonus: i32, required_level: u32) -> Self {
        Self::new(
            EquipmentSlot::Armor,
            required_level,
            BTreeMap::from([(Stat::Defense, defense_bonus)]),
        )
    }

    pub fn bonus(&self, stat: Stat) -> i32 {
        self.stat_bonuses.get(&stat).copied().unwrap_or(0)
    }

    /// 等级是否满足穿戴要求
    pub fn can_equip(&self, level: u32) -> bool {
        level >= self.required_level
    }

    /// 装备的使用（穿戴/卸下）只要求目标存活
    pub fn can_use<T: ItemTarget + ?Sized>(&self, target: &T) -> bool {
        target.is_alive()
    }

    /// 穿戴装备。等级不足或已穿戴时返回false且不做任何修改
    pub fn equip<T: ItemTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        if self.equipped || !self.can_equip(target.level()) {
            return false;
        }
        for (&stat, &bonus) in &self.stat_bonuses {
            target.apply_equipment_bonus(stat, bonus);
        }
        self.equipped = true;
        true
    }

    /// 卸下装备并撤销全部加成
    pub fn unequip<T: ItemTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        if !self.equipped {
            return false;
        }
        for (&stat, &bonus) in &self.stat_bonuses {
            target.apply_equipment_bonus(stat, -bonus);
        }
        self.equipped = false;
        true
    }

    pub(crate) fn toggle<T: ItemTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        if !self.can_use(target) {
            return false;
        }
        if self.equipped {
            self.unequip(target)
        } else {
            self.equip(target)
        }
    }
}

/// 新手铁剑
pub fn iron_sword() -> Item {
    Item::new(
        "Iron Sword",
        "A basic iron sword for beginners",
        50,
        Rarity::Common,
        ItemKind::Equipment(Equipment::weapon(5, 1)),
    )
}

/// 新手皮甲
pub fn leather_armor() -> Item {
    Item::new(
        "Leather Armor",
        "Basic protection made from leather",
        30,
        Rarity::Common,
        ItemKind::Equipment(Equipment::armor(3, 1)),
    )
}
