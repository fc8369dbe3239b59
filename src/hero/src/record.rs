// src/hero/src/record.rs
use serde::{Deserialize, Serialize};

use items::Stat;

use crate::bag::Inventory;
use crate::core::{Hero, HeroError};
use crate::leveling;

/// 英雄的存档记录
///
/// 装备加成不单独存储，读档时由已穿戴的装备重新推导。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSnapshot {
    pub name: String,
    pub health: u32,
    pub attack: u32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub skill_points: u32,
    pub base_health: u32,
    pub base_attack: u32,
    pub inventory: Inventory,
}

impl Hero {
    pub fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            name: self.name.clone(),
            health: self.health,
            attack: self.attack,
            level: self.level,
            experience: self.experience,
            experience_to_next: self.experience_to_next,
            skill_points: self.skill_points,
            base_health: self.base_health,
            base_attack: self.base_attack,
            inventory: self.inventory.clone(),
        }
    }

    /// 从存档记录重建英雄，任何不一致都会拒绝整条记录
    pub fn from_snapshot(snapshot: HeroSnapshot) -> Result<Self, HeroError> {
        let invalid = |msg: String| Err(HeroError::InvalidSnapshot(msg));

        if snapshot.level == 0 {
            return invalid("level must be at least 1".into());
        }
        if snapshot.base_health == 0 {
            return invalid("base health must be positive".into());
        }
        if snapshot.health > snapshot.base_health {
            return invalid(format!(
                "health {} exceeds max {}",
                snapshot.health, snapshot.base_health
            ));
        }
        let expected_to_next =
            leveling::experience_to_next_level(snapshot.level, snapshot.experience);
        if snapshot.experience_to_next != expected_to_next || expected_to_next == 0 {
            return invalid(format!(
                "experience {} does not fit level {}",
                snapshot.experience, snapshot.level
            ));
        }
        snapshot
            .inventory
            .validate()
            .map_err(|e| HeroError::InvalidSnapshot(e.to_string()))?;

        let mut hero = Hero::bare(snapshot.name, snapshot.inventory);
        hero.health = snapshot.health;
        hero.level = snapshot.level;
        hero.experience = snapshot.experience;
        hero.experience_to_next = snapshot.experience_to_next;
        hero.skill_points = snapshot.skill_points;
        hero.base_health = snapshot.base_health;
        hero.base_attack = snapshot.base_attack;

        for item in hero.inventory.equipped_items() {
            let Some(equipment) = item.as_equipment() else {
                continue;
            };
            for (&stat, &bonus) in &equipment.stat_bonuses {
                hero.equipment_attack_bonus += bonus;
                if stat == Stat::Defense {
                    hero.equipment_defense_bonus += bonus;
                }
            }
        }
        hero.refresh_attack();

        if hero.attack != snapshot.attack {
            return invalid(format!(
                "attack {} does not match base {} plus equipment {}",
                snapshot.attack, snapshot.base_attack, hero.equipment_attack_bonus
            ));
        }
        Ok(hero)
    }
}
