// src/combat/src/lib.rs
//! 回合制战斗：战斗者能力接口、怪物、单次攻击结算以及完整的回合状态机。

pub mod combat_manager;
pub mod combatant;
pub mod enemy;
pub mod presentation;

pub use crate::combat_manager::{CombatManager, CombatOutcome, CombatPhase, HeroAction};
pub use crate::combatant::{Champion, Combatant};
pub use crate::enemy::Monster;
pub use crate::presentation::{GameEvent, PathOption, Presentation};


/// Handles single strikes between combatants
pub struct Combat;

/// 一次攻击的结算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strike {
    pub damage: u32,
    /// 伤害是否被防御姿态减半
    pub mitigated: bool,
    pub target_defeated: bool,
}

impl Combat {
    /// 主动攻击：攻击者按自身攻击力造成全额伤害
    pub fn strike(attacker: &dyn Combatant, defender: &mut dyn Combatant) -> Strike {
        let damage = attacker.attack(defender);
        Strike {
            damage,
            mitigated: false,
            target_defeated: !defender.is_alive(),
        }
    }

    /// 反击：防御中的目标只承受一半伤害（向下取整），随后防御立即失效
    pub fn counter_attack(attacker: &dyn Combatant, defender: &mut dyn Combatant) -> Strike {
        if defender.is_defending() {
            let damage = attacker.attack_power() / 2;
            defender.take_damage(damage);
            defender.reset_defense();
            Strike {
                damage,
                mitigated: true,
                target_defeated: !defender.is_alive(),
            }
        } else {
            Self::strike(attacker, defender)
        }
    }
}
