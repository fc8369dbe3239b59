// src/combat/src/enemy.rs

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;

/// 怪物实体：每次遭遇时生成，战斗结束后丢弃
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub health: u32,
    pub attack: u32,
    #[serde(default)]
    pub is_defending: bool,
}

impl Monster {
    pub fn new(name: impl Into<String>, health: u32, attack: u32) -> Self {
        Self {
            name: name.into(),
            health,
            attack,
            is_defending: false,
        }
    }
}

impl Combatant for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn attack_power(&self) -> u32 {
        self.attack
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
