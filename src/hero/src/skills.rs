// src/hero/src/skills.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use combat::Combatant;

use crate::core::{Hero, HeroError};

/// 技能类别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum SkillKind {
    Offensive,
    Defensive,
    Healing,
}

/// 技能效果
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SkillEffect {
    /// 对目标造成固定伤害
    Offensive { damage: u32 },
    /// 使用者进入防御姿态
    Defensive { defense_bonus: u32 },
    /// 治疗使用者
    Healing { heal_amount: u32 },
}

/// 技能使用结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillOutcome {
    Damaged(u32),
    Defended,
    Healed(u32),
}

/// 主动技能定义
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub required_level: u32,
    pub mana_cost: u32,
    pub cooldown: u32,
    #[serde(default)]
    pub current_cooldown: u32,
    pub effect: SkillEffect,
}

impl Skill {
    pub fn kind(&self) -> SkillKind {
        match self.effect {
            SkillEffect::Offensive { .. } => SkillKind::Offensive,
            SkillEffect::Defensive { .. } => SkillKind::Defensive,
            SkillEffect::Healing { .. } => SkillKind::Healing,
        }
    }

    /// 英雄等级是否足以学习
    pub fn can_learn(&self, level: u32) -> bool {
        level >= self.required_level
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.current_cooldown > 0
    }

    /// 每回合调用一次
    pub fn reduce_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }

    pub fn reset_cooldown(&mut self) {
        self.current_cooldown = 0;
    }

    /// 检查技能当前能否使用
    pub fn can_use(&self, user: &Hero, target: Option<&dyn Combatant>) -> bool {
        if self.is_on_cooldown() || !user.is_alive() {
            return false;
        }
        match self.effect {
            SkillEffect::Offensive { .. } => target.is_some_and(|t| t.is_alive()),
            SkillEffect::Defensive { .. } => true,
            SkillEffect::Healing { .. } => user.health() < user.max_health(),
        }
    }

    /// 使用技能并进入冷却
    pub fn use_skill(
        &mut self,
        user: &mut Hero,
        target: Option<&mut dyn Combatant>,
    ) -> Result<SkillOutcome, HeroError> {
        if self.is_on_cooldown() {
            return Err(HeroError::SkillOnCooldown(self.name.clone()));
        }
        if !self.can_use(user, target.as_deref()) {
            return Err(HeroError::SkillUnusable(self.name.clone()));
        }

        let outcome = match (self.effect, target) {
            (SkillEffect::Offensive { damage }, Some(target)) => {
                target.take_damage(damage);
                SkillOutcome::Damaged(damage)
            }
            (SkillEffect::Offensive { .. }, None) => {
                return Err(HeroError::SkillUnusable(self.name.clone()));
            }
            (SkillEffect::Defensive { .. }, _) => {
                user.defend();
                SkillOutcome::Defended
            }
            (SkillEffect::Healing { heal_amount }, _) => SkillOutcome::Healed(user.heal(heal_amount)),
        };

        self.current_cooldown = self.cooldown;
        Ok(outcome)
    }
}

/// 强力一击
pub fn power_strike() -> Skill {
    Skill {
        name: "Power Strike".into(),
        description: "A powerful attack that deals extra damage".into(),
        required_level: 2,
        mana_cost: 10,
        cooldown: 2,
        current_cooldown: 0,
        effect: SkillEffect::Offensive { damage: 25 },
    }
}

/// 盾牌格挡
pub fn shield_block() -> Skill {
    Skill {
        name: "Shield Block".into(),
        description: "Raise your guard to soften the next blow".into(),
        required_level: 1,
        mana_cost: 5,
        cooldown: 1,
        current_cooldown: 0,
        effect: SkillEffect::Defensive { defense_bonus: 5 },
    }
}

/// 治愈之光
pub fn healing_light() -> Skill {
    Skill {
        name: "Healing Light".into(),
        description: "Restore health with holy light".into(),
        required_level: 3,
        mana_cost: 15,
        cooldown: 3,
        current_cooldown: 0,
        effect: SkillEffect::Healing { heal_amount: 30 },
    }
}

/// 全部技能
pub fn skill_catalog() -> Vec<Skill> {
    vec![power_strike(), shield_block(), healing_light()]
}

/// 指定等级可以学习的技能
pub fn learnable_skills(level: u32) -> Vec<Skill> {
    skill_catalog()
        .into_iter()
        .filter(|skill| skill.can_learn(level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::Monster;

    #[test]
    fn catalog_is_gated_by_level() {
        let names = |level| {
            learnable_skills(level)
                .into_iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
        };
        assert_eq!(names(1), vec!["Shield Block"]);
        assert_eq!(names(2), vec!["Power Strike", "Shield Block"]);
        assert_eq!(names(3).len(), 3);
    }

    #[test]
    fn power_strike_damages_then_cools_down() {
        let mut hero = Hero::new("Aria");
        let mut orc = Monster::new("Orc", 60, 12);
        let mut skill = power_strike();

        let outcome = skill.use_skill(&mut hero, Some(&mut orc)).unwrap();
        assert_eq!(outcome, SkillOutcome::Damaged(25));
        assert_eq!(orc.health, 35);
        assert!(skill.is_on_cooldown());
        assert_eq!(
            skill.use_skill(&mut hero, Some(&mut orc)),
            Err(HeroError::SkillOnCooldown("Power Strike".into()))
        );

        skill.reduce_cooldown();
        skill.reduce_cooldown();
        assert!(!skill.is_on_cooldown());
    }

    #[test]
    fn offensive_skill_needs_a_living_target() {
        let hero = Hero::new("Aria");
        let dead = Monster::new("Slime", 0, 12);
        assert!(!power_strike().can_use(&hero, Some(&dead)));
        assert!(!power_strike().can_use(&hero, None));
    }

    #[test]
    fn unusable_skill_is_reported_as_a_skill_error() {
        let mut hero = Hero::new("Aria");
        let mut dead = Monster::new("Slime", 0, 12);
        let mut skill = power_strike();
        assert_eq!(
            skill.use_skill(&mut hero, Some(&mut dead)),
            Err(HeroError::SkillUnusable("Power Strike".into()))
        );
        assert_eq!(
            healing_light().use_skill(&mut hero, None),
            Err(HeroError::SkillUnusable("Healing Light".into()))
        );
        assert!(!skill.is_on_cooldown());
    }

    #[test]
    fn shield_block_raises_defense() {
        let mut hero = Hero::new("Aria");
        let outcome = shield_block().use_skill(&mut hero, None).unwrap();
        assert_eq!(outcome, SkillOutcome::Defended);
        assert!(Combatant::is_defending(&hero));
    }

    #[test]
    fn healing_light_requires_missing_health() {
        let mut hero = Hero::new("Aria");
        let mut skill = healing_light();
        assert!(!skill.can_use(&hero, None));

        hero.take_damage(50);
        assert_eq!(skill.use_skill(&mut hero, None), Ok(SkillOutcome::Healed(30)));
        assert_eq!(hero.health(), 80);
        assert_eq!(skill.kind(), SkillKind::Healing);
    }
}
