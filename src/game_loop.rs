//! 游戏会话：主菜单循环，协调探索、战斗、成长与存读档。
//!
//! 每个完成的玩家行动之后都会自动保存到槽位0；无效选择、退出和战败不会触发自动保存。

use combat::{CombatManager, GameEvent, PathOption, Presentation};
use dungeon::{EncounterGenerator, MonsterCatalog, STARTING_ZONE, World, Zone};
use error::{GameError, handle_error};
use hero::{Hero, leveling};
use save::{AutoSave, GameState, MANUAL_SLOTS};
use tracing::{debug, info};

use crate::config::GameConfig;

/// 未输入名字时使用的默认英雄名
pub const DEFAULT_HERO_NAME: &str = "Hero";

/// 会话结束原因
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Defeated,
}

pub struct GameSession<'a, P: Presentation + ?Sized> {
    presenter: &'a mut P,
    hero: Hero,
    world: World,
    current: usize,
    encounters: EncounterGenerator<'a>,
    auto_save: AutoSave,
    ended: Option<SessionEnd>,
}

impl<'a, P: Presentation + ?Sized> GameSession<'a, P> {
    /// 从起始区域开始会话（空世界地图会被替换为标准世界）
    pub fn new(
        hero: Hero,
        world: World,
        encounters: EncounterGenerator<'a>,
        auto_save: AutoSave,
        presenter: &'a mut P,
    ) -> Self {
        let mut session = Self::assemble(hero, world, encounters, auto_save, presenter);
        if let Some(zone) = session.world.zone_mut(session.current) {
            zone.mark_visited();
        }
        session
    }

    fn assemble(
        hero: Hero,
        world: World,
        encounters: EncounterGenerator<'a>,
        auto_save: AutoSave,
        presenter: &'a mut P,
    ) -> Self {
        let world = if world.zones().is_empty() {
            World::standard()
        } else {
            world
        };
        let current = world.position(STARTING_ZONE).unwrap_or(0);

        Self {
            presenter,
            hero,
            world,
            current,
            encounters,
            auto_save,
            ended: None,
        }
    }

    /// 新游戏：询问英雄名字，发放初始装备，从和平小镇出发
    pub fn new_game(config: &GameConfig, auto_save: AutoSave, presenter: &'a mut P) -> Self {
        let name = presenter.prompt_hero_name();
        let name = match name.trim() {
            "" => DEFAULT_HERO_NAME,
            trimmed => trimmed,
        };
        let hero = Hero::with_inventory_slots(name, config.inventory_slots);
        info!(hero = %hero.name, "new game");

        let encounters =
            EncounterGenerator::seeded(MonsterCatalog::standard(), config.encounter_seed());
        Self::new(hero, World::standard(), encounters, auto_save, presenter)
    }

    /// 从读档得到的状态继续游戏
    pub fn resume(
        state: GameState,
        config: &GameConfig,
        auto_save: AutoSave,
        presenter: &'a mut P,
    ) -> Self {
        let encounters =
            EncounterGenerator::seeded(MonsterCatalog::standard(), config.encounter_seed());
        let mut session =
            Self::assemble(state.hero, World::standard(), encounters, auto_save, presenter);
        session.apply_state_zone(state.zone);
        info!(hero = %session.hero.name, zone = session.current_zone().name(), "game resumed");
        session
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn current_zone(&self) -> &Zone {
        &self.world.zones()[self.current]
    }

    pub fn auto_save(&self) -> &AutoSave {
        &self.auto_save
    }

    pub fn ended(&self) -> Option<SessionEnd> {
        self.ended
    }

    /// 运行到玩家退出或英雄战败
    pub fn run(&mut self) -> SessionEnd {
        self.announce_zone();
        loop {
            if let Some(end) = self.turn() {
                info!(?end, hero = %self.hero.name, level = self.hero.level(), "session over");
                return end;
            }
        }
    }

    /// 当前区域可选的行动
    pub fn path_options(&self) -> Vec<PathOption> {
        let zone = self.current_zone();
        let mut options = Vec::new();

        if zone.can_have_combat() {
            options.push(PathOption::Explore {
                zone: zone.name().to_string(),
            });
        } else {
            options.push(PathOption::Rest);
        }
        for (index, other) in self.world.zones().iter().enumerate() {
            if index != self.current {
                options.push(PathOption::Travel {
                    zone: other.name().to_string(),
                    danger_level: other.danger_level(),
                });
            }
        }
        options.push(PathOption::Save);
        options.push(PathOption::Load);
        options
    }

    /// 处理一次主菜单选择，会话结束时返回结束原因
    pub fn turn(&mut self) -> Option<SessionEnd> {
        if self.ended.is_some() {
            return self.ended;
        }

        let options = self.path_options();
        let choice = self.presenter.request_path_choice(&options);
        if choice == 0 {
            self.ended = Some(SessionEnd::Quit);
            return self.ended;
        }

        let Some(option) = (choice as usize)
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .cloned()
        else {
            self.presenter.notify(GameEvent::InvalidChoice);
            return None;
        };

        debug!(?option, "path chosen");
        self.perform(option);

        if self.ended.is_none() {
            self.auto_save
                .save(&self.hero, &self.world.zones()[self.current]);
        }
        self.ended
    }

    fn perform(&mut self, option: PathOption) {
        match option {
            PathOption::Explore { .. } => self.explore(),
            PathOption::Travel { zone, .. } => self.travel(&zone),
            PathOption::Rest => self.rest(),
            PathOption::Save => self.save_manual(),
            PathOption::Load => self.load_manual(),
        }
    }

    /// 探索当前区域：可能遭遇怪物并进入战斗
    fn explore(&mut self) {
        let zone = &self.world.zones()[self.current];
        let danger_level = zone.danger_level();
        let zone_name = zone.name().to_string();

        let Some(mut monster) = self.encounters.generate_random_encounter(zone) else {
            self.presenter
                .notify(GameEvent::QuietExploration { zone: zone_name });
            return;
        };

        self.presenter.notify(GameEvent::MonsterAppears {
            name: monster.name.clone(),
            health: monster.health,
            attack: monster.attack,
        });

        let outcome = CombatManager::new(&mut self.hero, &mut monster, &mut *self.presenter).run();
        if !outcome.victory {
            self.ended = Some(SessionEnd::Defeated);
            return;
        }

        // 区域危险等级即敌人等级
        let reward = leveling::experience_reward(danger_level, self.hero.level());
        let gain = self.hero.gain_experience(reward);
        self.presenter
            .notify(GameEvent::ExperienceGained { amount: reward });
        for up in gain.level_ups {
            self.presenter.notify(GameEvent::LevelUp {
                level: up.level,
                skill_points: up.skill_points,
            });
        }
    }

    fn travel(&mut self, name: &str) {
        let Some(index) = self.world.position(name) else {
            self.presenter.notify(GameEvent::InvalidChoice);
            return;
        };
        self.current = index;
        if let Some(zone) = self.world.zone_mut(index) {
            zone.mark_visited();
        }
        self.announce_zone();
    }

    fn rest(&mut self) {
        self.hero.rest();
        self.presenter.notify(GameEvent::Rested {
            health: self.hero.health(),
        });
    }

    fn request_manual_slot(&mut self) -> Result<u8, GameError> {
        let choice = self.presenter.request_slot_choice();
        let slot = u8::try_from(choice).unwrap_or(u8::MAX);
        if MANUAL_SLOTS.contains(&slot) {
            Ok(slot)
        } else {
            Err(GameError::InvalidSlot(slot))
        }
    }

    fn save_manual(&mut self) {
        let slot = match self.request_manual_slot() {
            Ok(slot) => slot,
            Err(e) => {
                let slot = if let GameError::InvalidSlot(slot) = e { slot } else { 0 };
                self.presenter.notify(GameEvent::SaveFailed {
                    slot,
                    reason: handle_error(&e),
                });
                return;
            }
        };

        let zone = &self.world.zones()[self.current];
        match self.auto_save.save_system.save_game(&self.hero, zone, slot) {
            Ok(()) => self.presenter.notify(GameEvent::GameSaved { slot }),
            Err(e) => self.presenter.notify(GameEvent::SaveFailed {
                slot,
                reason: handle_error(&e),
            }),
        }
    }

    fn load_manual(&mut self) {
        let slot = match self.request_manual_slot() {
            Ok(slot) => slot,
            Err(e) => {
                let slot = if let GameError::InvalidSlot(slot) = e { slot } else { 0 };
                self.presenter.notify(GameEvent::LoadFailed {
                    slot,
                    reason: handle_error(&e),
                });
                return;
            }
        };

        match self.auto_save.save_system.load_state(slot) {
            Ok(state) => {
                self.hero = state.hero;
                self.apply_state_zone(state.zone);
                self.presenter.notify(GameEvent::GameLoaded { slot });
                self.announce_zone();
            }
            Err(e) => self.presenter.notify(GameEvent::LoadFailed {
                slot,
                reason: handle_error(&e),
            }),
        }
    }

    fn apply_state_zone(&mut self, zone: Zone) {
        self.current = self.world.replace(zone);
    }

    fn announce_zone(&mut self) {
        let zone = &self.world.zones()[self.current];
        self.presenter.notify(GameEvent::ZoneEntered {
            zone: zone.name().to_string(),
            danger_level: zone.danger_level(),
        });
    }
}
