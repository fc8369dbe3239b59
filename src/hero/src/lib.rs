// src/hero/src/lib.rs
//! 英雄：属性、背包、装备、经验成长与技能。

mod bag;
mod combat;
mod core;
mod record;

pub mod leveling;
pub mod skills;

// 重新导出主要类型
pub use self::{
    bag::{DEFAULT_MAX_SLOTS, Inventory, InventoryError},
    core::{Hero, HeroError, ItemUse, STARTING_ATTACK, STARTING_HEALTH},
    leveling::{ExperienceGain, LevelProgress, LevelUp},
    record::HeroSnapshot,
    skills::{Skill, SkillEffect, SkillKind, SkillOutcome},
};
