//! Scripted presenter and fixtures shared by the session tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use combat::{GameEvent, PathOption, Presentation};
use dungeon::{CombatZone, MonsterCatalog, MonsterTemplate, STARTING_ZONE, SafeZone, World, Zone};
use save::{AutoSave, SaveSystem};
use tempfile::TempDir;

/// Replays queued answers; an exhausted queue answers quit / attack / cancel.
#[derive(Default)]
pub struct ScriptedPresenter {
    pub name: String,
    pub paths: VecDeque<u32>,
    pub combat: VecDeque<u32>,
    pub items: VecDeque<u32>,
    pub slots: VecDeque<u32>,
    pub events: Vec<GameEvent>,
    pub menus: Vec<Vec<PathOption>>,
}

impl ScriptedPresenter {
    pub fn with_paths(paths: &[u32]) -> Self {
        Self {
            name: "Aria".into(),
            paths: paths.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn saw(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }
}

impl Presentation for ScriptedPresenter {
    fn prompt_hero_name(&mut self) -> String {
        self.name.clone()
    }

    fn request_path_choice(&mut self, options: &[PathOption]) -> u32 {
        self.menus.push(options.to_vec());
        self.paths.pop_front().unwrap_or(0)
    }

    fn request_combat_choice(&mut self) -> u32 {
        self.combat.pop_front().unwrap_or(1)
    }

    fn request_item_choice(&mut self, _items: &[String]) -> u32 {
        self.items.pop_front().unwrap_or(0)
    }

    fn request_slot_choice(&mut self) -> u32 {
        self.slots.pop_front().unwrap_or(0)
    }

    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Town plus one combat zone dangerous enough that every exploration fights.
pub fn arena_world(nest: &str) -> World {
    World::new(vec![
        Zone::Safe(SafeZone::new(STARTING_ZONE, "Home")),
        Zone::Combat(CombatZone::new(nest, "Always hostile", 8, vec![])),
    ])
}

pub fn single_monster(name: &'static str, health: u32, attack: u32) -> MonsterCatalog {
    MonsterCatalog::new(vec![MonsterTemplate {
        name,
        health,
        attack,
    }])
}

pub fn auto_save() -> (TempDir, AutoSave) {
    let dir = TempDir::new().unwrap();
    let system = SaveSystem::new(dir.path()).unwrap();
    (dir, AutoSave::new(system, true))
}
