// src/hero/src/leveling.rs
//! 经验与升级
//!
//! 升级时扣除下一级所需经验（剩余经验保留），每级 +1 技能点、
//! +10 生命上限与生命、+2 基础攻击。

use tracing::info;

use crate::core::Hero;

/// 1..=10 级的升级门槛
const REQUIREMENT_TABLE: [u32; 10] = [0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700];
/// 10级以后每级额外门槛
pub const REQUIREMENT_STEP_AFTER_TABLE: u32 = 500;

pub const HEALTH_PER_LEVEL: u32 = 10;
pub const ATTACK_PER_LEVEL: u32 = 2;
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;

/// 击败同级敌人的基础经验
pub const BASE_EXPERIENCE_REWARD: u32 = 25;

/// 升到 `level` 级所需的经验（0级与1级均为0）
pub fn experience_for_level(level: u32) -> u32 {
    match level {
        0 => 0,
        1..=10 => REQUIREMENT_TABLE[(level - 1) as usize],
        _ => {
            let last = REQUIREMENT_TABLE[REQUIREMENT_TABLE.len() - 1];
            last.saturating_add((level - 10).saturating_mul(REQUIREMENT_STEP_AFTER_TABLE))
        }
    }
}

/// 距离下一级还需的经验
pub fn experience_to_next_level(level: u32, experience: u32) -> u32 {
    experience_for_level(level.saturating_add(1)).saturating_sub(experience)
}

pub fn can_level_up(hero: &Hero) -> bool {
    hero.experience >= experience_for_level(hero.level + 1)
}

/// 击败敌人获得的经验
///
/// 越级挑战奖励更多，击败低级敌人奖励递减（最低为基础值的10%）。
pub fn experience_reward(enemy_level: u32, hero_level: u32) -> u32 {
    let diff = f64::from(enemy_level) - f64::from(hero_level);
    let multiplier = if diff > 0.0 {
        1.5 + 0.2 * diff
    } else if diff < 0.0 {
        (1.0 + 0.1 * diff).max(0.1)
    } else {
        1.0
    };
    (f64::from(BASE_EXPERIENCE_REWARD) * multiplier) as u32
}

/// 单次升级的结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub skill_points: u32,
}

/// 一次经验获取的结果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExperienceGain {
    pub amount: u32,
    pub level_ups: Vec<LevelUp>,
}

impl ExperienceGain {
    pub fn levels_gained(&self) -> u32 {
        self.level_ups.len() as u32
    }
}

/// 当前等级进度
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelProgress {
    pub level: u32,
    pub experience: u32,
    pub required: u32,
    /// 0.0 ..= 100.0
    pub percentage: f64,
    pub skill_points: u32,
}

impl Hero {
    /// 获取经验，满足门槛时连续升级
    pub fn gain_experience(&mut self, amount: u32) -> ExperienceGain {
        self.experience = self.experience.saturating_add(amount);

        let mut gain = ExperienceGain {
            amount,
            level_ups: Vec::new(),
        };
        while can_level_up(self) {
            gain.level_ups.push(self.level_up());
        }
        self.experience_to_next = experience_to_next_level(self.level, self.experience);
        gain
    }

    /// 升一级并扣除门槛经验
    pub fn level_up(&mut self) -> LevelUp {
        let requirement = experience_for_level(self.level + 1);
        self.experience = self.experience.saturating_sub(requirement);
        self.level += 1;
        self.skill_points += SKILL_POINTS_PER_LEVEL;
        self.base_health += HEALTH_PER_LEVEL;
        self.health += HEALTH_PER_LEVEL;
        self.base_attack += ATTACK_PER_LEVEL;
        self.refresh_attack();
        self.experience_to_next = experience_to_next_level(self.level, self.experience);

        info!(hero = %self.name, level = self.level, "升级到 {} 级！", self.level);
        LevelUp {
            level: self.level,
            skill_points: self.skill_points,
        }
    }

    pub fn level_progress(&self) -> LevelProgress {
        let required = experience_for_level(self.level + 1);
        let percentage = if required == 0 {
            100.0
        } else {
            (f64::from(self.experience) * 100.0 / f64::from(required)).min(100.0)
        };
        LevelProgress {
            level: self.level,
            experience: self.experience,
            required,
            percentage,
            skill_points: self.skill_points,
        }
    }
}
