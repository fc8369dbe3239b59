// src/hero/src/combat.rs
use combat::{Champion, Combatant};
use items::{ItemTarget, Stat};

use crate::core::{Hero, ItemUse};

impl Combatant for Hero {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn attack_power(&self) -> u32 {
        self.total_attack()
    }

    fn is_defending(&self) -> bool {
        self.is_defending
    }

    fn defend(&mut self) {
        self.is_defending = true;
    }

    fn reset_defense(&mut self) {
        self.is_defending = false;
    }

    fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

impl Champion for Hero {
    fn usable_items(&self) -> Vec<String> {
        self.inventory
            .stacks()
            .filter(|(_, stack)| stack.first().is_some_and(|item| item.is_consumable()))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    fn consume_item(&mut self, name: &str) -> bool {
        if !self
            .inventory
            .get_item(name)
            .is_some_and(|item| item.is_consumable())
        {
            return false;
        }
        matches!(self.use_item(name), Ok(ItemUse::Consumed))
    }
}

impl ItemTarget for Hero {
    fn target_name(&self) -> &str {
        &self.name
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    fn current_health(&self) -> u32 {
        self.health
    }

    fn max_health(&self) -> u32 {
        self.base_health
    }

    fn restore_health(&mut self, amount: u32) -> u32 {
        self.heal(amount)
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn apply_equipment_bonus(&mut self, stat: Stat, delta: i32) {
        self.add_equipment_bonus(stat, delta);
    }
}
