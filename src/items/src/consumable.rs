//src/items/src/consumable.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::{Item, ItemKind, ItemTarget, Rarity};

/// 消耗品种类
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableKind {
    HealthPotion, // 恢复生命
    ManaPotion,   // 恢复法力（暂无法力系统）
    Food,         // 少量恢复生命
}

/// 一次性消耗品，使用后由持有者从背包中移除
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    pub kind: ConsumableKind,
    /// 效果强度：治疗量或法力恢复量
    pub potency: u32,
}

impl Consumable {
    pub fn new(kind: ConsumableKind, potency: u32) -> Self {
        Self { kind, potency }
    }

    /// 治疗类消耗品的治疗量
    pub fn heal_amount(&self) -> Option<u32> {
        match self.kind {
            ConsumableKind::HealthPotion | ConsumableKind::Food => Some(self.potency),
            ConsumableKind::ManaPotion => None,
        }
    }

    /// 活着的目标才能使用；治疗类还要求目标未满血
    pub fn can_use<T: ItemTarget + ?Sized>(&self, target: &T) -> bool {
        if !target.is_alive() {
            return false;
        }
        match self.kind {
            ConsumableKind::HealthPotion | ConsumableKind::Food => {
                target.current_health() < target.max_health()
            }
            ConsumableKind::ManaPotion => true,
        }
    }

    pub(crate) fn apply<T: ItemTarget + ?Sized>(&self, target: &mut T) -> bool {
        if !self.can_use(target) {
            return false;
        }
        if let Some(amount) = self.heal_amount() {
            target.restore_health(amount);
        }
        true
    }
}

/// 生命药水：恢复50点生命
pub fn health_potion() -> Item {
    Item::new(
        "Health Potion",
        "Restores 50 HP",
        25,
        Rarity::Common,
        ItemKind::Consumable(Consumable::new(ConsumableKind::HealthPotion, 50)),
    )
}

/// 法力药水
pub fn mana_potion() -> Item {
    Item::new(
        "Mana Potion",
        "Restores 30 MP",
        30,
        Rarity::Uncommon,
        ItemKind::Consumable(Consumable::new(ConsumableKind::ManaPotion, 30)),
    )
}

/// 面包：可在战斗外使用的食物
pub fn bread() -> Item {
    Item::new(
        "Bread",
        "Restores 20 HP",
        5,
        Rarity::Common,
        ItemKind::Consumable(Consumable::new(ConsumableKind::Food, 20)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::Dummy;

    #[test]
    fn healing_is_capped_at_max_health() {
        let mut dummy = Dummy::new();
        dummy.health = 90;
        let mut potion = health_potion();
        assert!(potion.use_on(&mut dummy));
        assert_eq!(dummy.health, 100);
    }

    #[test]
    fn full_health_rejects_healing_items() {
        let mut dummy = Dummy::new();
        dummy.health = dummy.max_health;
        let mut potion = health_potion();
        assert!(!potion.can_use(&dummy));
        assert!(!potion.use_on(&mut dummy));
        assert_eq!(dummy.health, 100);
    }

    #[test]
    fn mana_potion_succeeds_without_side_effects() {
        let mut dummy = Dummy::new();
        dummy.health = dummy.max_health;
        let mut potion = mana_potion();
        assert!(potion.use_on(&mut dummy));
        assert_eq!(dummy.health, 100);
        assert_eq!(potion.as_consumable().and_then(|c| c.heal_amount()), None);
    }

    #[test]
    fn factory_values_match_catalog() {
        assert_eq!(health_potion().value, 25);
        assert_eq!(bread().as_consumable().and_then(|c| c.heal_amount()), Some(20));
        assert_eq!(mana_potion().rarity, Rarity::Uncommon);
    }
}
