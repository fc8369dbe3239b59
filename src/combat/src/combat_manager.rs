//! Combat manager for the turn-based duel between the hero and one monster
use strum_macros::{Display, EnumIter};
use tracing::debug;

use crate::combatant::{Champion, Combatant};
use crate::enemy::Monster;
use crate::presentation::{GameEvent, Presentation};
use crate::Combat;

/// 英雄在一个回合中可以采取的行动
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum HeroAction {
    Attack,
    Defend,
    UseItem,
    /// 技能尚未接入伤害结算：消耗回合但不产生效果
    UseSkill,
    /// 无法识别的选择，放弃本回合行动
    Forfeit,
}

impl HeroAction {
    pub fn from_choice(choice: u32) -> Self {
        match choice {
            1 => HeroAction::Attack,
            2 => HeroAction::Defend,
            3 => HeroAction::UseItem,
            4 => HeroAction::UseSkill,
            _ => HeroAction::Forfeit,
        }
    }
}

/// 战斗状态机的阶段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum CombatPhase {
    AwaitingHeroAction,
    ResolvingHeroAction(HeroAction),
    ResolvingMonsterAction,
    HeroVictory,
    HeroDefeat,
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CombatPhase::HeroVictory | CombatPhase::HeroDefeat)
    }
}

/// 一场战斗的最终结果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    pub victory: bool,
    /// 英雄完成的行动回合数（取消的物品选择不计入）
    pub hero_turns: u32,
    pub monster: String,
}

/// Drives one combat from the first hero prompt to a terminal phase.
///
/// Each call to [`CombatManager::step`] performs exactly one transition, so
/// callers (and tests) can observe every intermediate phase.
pub struct CombatManager<'a, H: Champion, P: Presentation + ?Sized> {
    hero: &'a mut H,
    monster: &'a mut Monster,
    presenter: &'a mut P,
    phase: CombatPhase,
    hero_turns: u32,
}

impl<'a, H: Champion, P: Presentation + ?Sized> CombatManager<'a, H, P> {
    pub fn new(hero: &'a mut H, monster: &'a mut Monster, presenter: &'a mut P) -> Self {
        let phase = if !hero.is_alive() {
            CombatPhase::HeroDefeat
        } else if !monster.is_alive() {
            CombatPhase::HeroVictory
        } else {
            CombatPhase::AwaitingHeroAction
        };

        Self {
            hero,
            monster,
            presenter,
            phase,
            hero_turns: 0,
        }
    }

    /// 完整执行一场战斗，英雄获胜返回true
    pub fn fight(hero: &'a mut H, monster: &'a mut Monster, presenter: &'a mut P) -> bool {
        Self::new(hero, monster, presenter).run().victory
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn hero_turns(&self) -> u32 {
        self.hero_turns
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// 运行到终止阶段
    pub fn run(mut self) -> CombatOutcome {
        self.presenter.notify(GameEvent::CombatStarted {
            hero: self.hero.name().to_string(),
            monster: self.monster.name.clone(),
        });

        while !self.is_finished() {
            self.step();
        }

        CombatOutcome {
            victory: self.phase == CombatPhase::HeroVictory,
            hero_turns: self.hero_turns,
            monster: self.monster.name.clone(),
        }
    }

    /// 执行一次状态转移并返回新的阶段
    pub fn step(&mut self) -> CombatPhase {
        let next = match self.phase {
            CombatPhase::AwaitingHeroAction => self.await_hero_action(),
            CombatPhase::ResolvingHeroAction(action) => self.resolve_hero_action(action),
            CombatPhase::ResolvingMonsterAction => self.resolve_monster_action(),
            terminal => terminal,
        };
        debug!(from = %self.phase, to = %next, "combat transition");
        self.phase = next;
        next
    }

    fn await_hero_action(&mut self) -> CombatPhase {
        self.presenter.notify(GameEvent::TurnStatus {
            hero_health: self.hero.health(),
            monster: self.monster.name.clone(),
            monster_health: self.monster.health,
        });

        // 上一回合的防御要么已经抵挡过怪物攻击，要么在此失效
        self.hero.reset_defense();

        let choice = self.presenter.request_combat_choice();
        CombatPhase::ResolvingHeroAction(HeroAction::from_choice(choice))
    }

    fn resolve_hero_action(&mut self, action: HeroAction) -> CombatPhase {
        match action {
            HeroAction::Attack => {
                let strike = Combat::strike(&*self.hero, &mut *self.monster);
                self.presenter.notify(GameEvent::AttackLanded {
                    attacker: self.hero.name().to_string(),
                    target: self.monster.name.clone(),
                    damage: strike.damage,
                });
            }
            HeroAction::Defend => {
                self.hero.defend();
                self.presenter.notify(GameEvent::DefenseRaised {
                    name: self.hero.name().to_string(),
                });
            }
            HeroAction::UseItem => {
                if !self.use_item() {
                    // 没有可用物品或选择无效：回到菜单重新选择，不消耗回合
                    return CombatPhase::AwaitingHeroAction;
                }
            }
            HeroAction::UseSkill => self.presenter.notify(GameEvent::SkillUnavailable),
            HeroAction::Forfeit => self.presenter.notify(GameEvent::InvalidChoice),
        }

        self.hero_turns += 1;

        if self.monster.is_alive() {
            CombatPhase::ResolvingMonsterAction
        } else {
            self.presenter.notify(GameEvent::Victory {
                monster: self.monster.name.clone(),
            });
            CombatPhase::HeroVictory
        }
    }

    /// 返回物品是否被成功使用
    fn use_item(&mut self) -> bool {
        let items = self.hero.usable_items();
        if items.is_empty() {
            self.presenter.notify(GameEvent::NoUsableItems);
            return false;
        }

        let choice = self.presenter.request_item_choice(&items);
        let Some(name) = (choice as usize)
            .checked_sub(1)
            .and_then(|index| items.get(index))
        else {
            if choice != 0 {
                self.presenter.notify(GameEvent::InvalidChoice);
            }
            return false;
        };

        if self.hero.consume_item(name) {
            self.presenter.notify(GameEvent::ItemUsed { item: name.clone() });
            true
        } else {
            self.presenter.notify(GameEvent::ItemRejected { item: name.clone() });
            false
        }
    }

    fn resolve_monster_action(&mut self) -> CombatPhase {
        let strike = Combat::counter_attack(&*self.monster, &mut *self.hero);
        if strike.mitigated {
            self.presenter
                .notify(GameEvent::DefenseAbsorbed { damage: strike.damage });
        } else {
            self.presenter.notify(GameEvent::FullDamageTaken {
                attacker: self.monster.name.clone(),
                damage: strike.damage,
            });
        }

        if self.hero.is_alive() {
            CombatPhase::AwaitingHeroAction
        } else {
            self.presenter.notify(GameEvent::Defeat {
                monster: self.monster.name.clone(),
            });
            CombatPhase::HeroDefeat
        }
    }
}
