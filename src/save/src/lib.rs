// src/save/src/lib.rs
//! 存档系统：槽位存档、读档校验与自动保存。

use anyhow::Context;
use std::{
    fs,
    io::Write,
    ops::RangeInclusive,
    path::{Path, PathBuf},
    time::SystemTime,
};
use tracing::{info, warn};

use dungeon::Zone;
use error::GameError;
use hero::Hero;

mod record;

pub use record::{
    GameState, REQUIRED_FIELDS, SAVE_VERSION, SaveRecord, check_version, reconstruct_game_state,
};

/// 自动存档槽位
pub const AUTO_SAVE_SLOT: u8 = 0;
/// 手动存档槽位
pub const MANUAL_SLOTS: RangeInclusive<u8> = 1..=3;

/// 槽位状态（用于存档列表）
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotStatus {
    Empty,
    Occupied {
        hero_name: String,
        level: u32,
        zone: String,
    },
    Unreadable(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSummary {
    pub slot: u8,
    pub status: SlotStatus,
}

/// 存档系统
pub struct SaveSystem {
    save_dir: PathBuf,
}

impl SaveSystem {
    /// 初始化存档系统
    pub fn new(save_dir: impl AsRef<Path>) -> Result<Self, GameError> {
        let save_dir = save_dir.as_ref();

        // 创建存档目录(如果不存在)
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).context("Failed to create save directory")?;
        }

        Ok(Self {
            save_dir: save_dir.to_path_buf(),
        })
    }

    pub fn is_valid_slot(slot: u8) -> bool {
        slot == AUTO_SAVE_SLOT || MANUAL_SLOTS.contains(&slot)
    }

    fn checked_path(&self, slot: u8) -> Result<PathBuf, GameError> {
        self.save_path(slot).ok_or(GameError::InvalidSlot(slot))
    }

    /// 获取存档文件路径
    pub fn save_path(&self, slot: u8) -> Option<PathBuf> {
        Self::is_valid_slot(slot).then(|| self.save_dir.join(format!("save_{slot}.json")))
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// 保存游戏状态，覆盖槽位中已有的存档
    pub fn save_game(&self, hero: &Hero, zone: &Zone, slot: u8) -> Result<(), GameError> {
        let path = self.checked_path(slot)?;
        let record = SaveRecord::capture(hero, zone);
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| GameError::SerializationError(e.to_string()))?;

        // 先写入临时文件，再整体替换
        let temp_path = path.with_extension("tmp");
        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary save file")?;
        file.write_all(json.as_bytes())
            .context("Failed to write save data")?;
        file.flush().context("Failed to flush save data")?;
        drop(file);

        fs::rename(&temp_path, &path).context("Failed to commit save file")?;

        info!(slot, path = %path.display(), "game saved");
        Ok(())
    }

    /// 读取并校验槽位中的存档
    ///
    /// The record is only returned when all required top-level fields are
    /// present and the format version is compatible.
    pub fn load_game(&self, slot: u8) -> Result<SaveRecord, GameError> {
        let path = self.checked_path(slot)?;
        if !path.exists() {
            return Err(GameError::EmptySlot(slot));
        }

        let raw = fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        let Some(object) = value.as_object() else {
            return Err(GameError::CorruptedSave("save record is not an object".into()));
        };
        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
            return Err(GameError::CorruptedSave(format!("missing field `{missing}`")));
        }
        if let Some(version) = object.get("version").and_then(|v| v.as_str()) {
            check_version(version)?;
        }

        let record: SaveRecord = serde_json::from_value(value)?;
        info!(slot, "save loaded");
        Ok(record)
    }

    /// 读档并重建游戏状态
    pub fn load_state(&self, slot: u8) -> Result<GameState, GameError> {
        reconstruct_game_state(self.load_game(slot)?)
    }

    /// 读取自动存档，任何失败都返回None
    pub fn quick_load(&self) -> Option<GameState> {
        match self.load_state(AUTO_SAVE_SLOT) {
            Ok(state) => Some(state),
            Err(e) => {
                if !e.is_missing_save() {
                    warn!("quick load failed: {e}");
                }
                None
            }
        }
    }

    /// 删除存档，返回是否确实删除了文件
    pub fn delete_save(&self, slot: u8) -> Result<bool, GameError> {
        let path = self.checked_path(slot)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).context("Failed to delete save file")?;
        info!(slot, "save deleted");
        Ok(true)
    }

    /// 检查指定槽位是否有存档
    pub fn has_save(&self, slot: u8) -> bool {
        self.save_path(slot).is_some_and(|path| path.exists())
    }

    /// 手动存档槽位概览
    pub fn list_saves(&self) -> Vec<SaveSummary> {
        MANUAL_SLOTS
            .map(|slot| {
                let status = match self.load_game(slot) {
                    Ok(record) => SlotStatus::Occupied {
                        hero_name: record.hero.name,
                        level: record.hero.level,
                        zone: record.current_zone.info.name,
                    },
                    Err(GameError::EmptySlot(_)) => SlotStatus::Empty,
                    Err(e) => SlotStatus::Unreadable(e.to_string()),
                };
                SaveSummary { slot, status }
            })
            .collect()
    }
}

/// 自动保存：每次玩家行动后写入槽位0，失败只记录日志
pub struct AutoSave {
    pub save_system: SaveSystem,
    enabled: bool,
    last_save: Option<SystemTime>,
}

impl AutoSave {
    pub fn new(save_system: SaveSystem, enabled: bool) -> Self {
        Self {
            save_system,
            enabled,
            last_save: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 尝试自动保存，返回是否成功写入
    pub fn save(&mut self, hero: &Hero, zone: &Zone) -> bool {
        if !self.enabled {
            return false;
        }
        match self.save_system.save_game(hero, zone, AUTO_SAVE_SLOT) {
            Ok(()) => {
                self.last_save = Some(SystemTime::now());
                true
            }
            Err(e) => {
                warn!("auto-save failed: {e}");
                false
            }
        }
    }

    /// 获取上次保存时间
    pub fn last_save_time(&self) -> Option<SystemTime> {
        self.last_save
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon::World;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn system() -> (TempDir, SaveSystem) {
        let dir = TempDir::new().unwrap();
        let system = SaveSystem::new(dir.path().join("saves")).unwrap();
        (dir, system)
    }

    fn adventurer() -> Hero {
        let mut hero = Hero::new("Aria");
        hero.equip("Iron Sword").unwrap();
        hero.gain_experience(130);
        hero.inventory_mut().add_gold(17);
        hero.inventory_mut()
            .add_item(items::consumable::mana_potion())
            .unwrap();
        hero
    }

    fn write_raw(system: &SaveSystem, slot: u8, raw: &str) {
        fs::write(system.save_path(slot).unwrap(), raw).unwrap();
    }

    #[test]
    fn round_trip_for_both_zone_kinds() {
        let (_dir, system) = system();
        let world = World::standard();
        let hero = adventurer();

        for (slot, zone) in [(1, &world.zones()[0]), (2, &world.zones()[2])] {
            system.save_game(&hero, zone, slot).unwrap();
            let state = system.load_state(slot).unwrap();
            assert_eq!(state.hero, hero);
            assert_eq!(&state.zone, zone);
        }
        assert_eq!(
            system.load_state(2).unwrap().zone.monster_types(),
            ["Goblin", "Ogre", "Orc"]
        );
    }

    #[test]
    fn saving_overwrites_slot() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&Hero::new("First"), &world.zones()[0], 1).unwrap();
        system.save_game(&Hero::new("Second"), &world.zones()[0], 1).unwrap();
        assert_eq!(system.load_game(1).unwrap().hero.name, "Second");
        assert!(!system.save_path(1).unwrap().with_extension("tmp").exists());
    }

    #[test]
    fn invalid_and_empty_slots() {
        let (_dir, system) = system();
        let world = World::standard();
        assert!(matches!(
            system.save_game(&Hero::new("Aria"), &world.zones()[0], 4),
            Err(GameError::InvalidSlot(4))
        ));
        assert!(matches!(system.load_game(3), Err(GameError::EmptySlot(3))));
        assert!(!system.has_save(3));
        assert!(!system.has_save(9));
        assert!(system.quick_load().is_none());
    }

    #[test]
    fn missing_required_field_fails_closed() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&Hero::new("Aria"), &world.zones()[0], 1).unwrap();

        let mut value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(system.save_path(1).unwrap()).unwrap())
                .unwrap();
        value.as_object_mut().unwrap().remove("currentZone");
        write_raw(&system, 1, &value.to_string());

        assert!(matches!(system.load_game(1), Err(GameError::CorruptedSave(_))));
    }

    #[test]
    fn garbage_is_corrupted() {
        let (_dir, system) = system();
        write_raw(&system, 2, "{ not json");
        assert!(matches!(system.load_game(2), Err(GameError::CorruptedSave(_))));
    }

    #[test]
    fn future_major_version_is_rejected() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&Hero::new("Aria"), &world.zones()[0], 1).unwrap();
        let raw = fs::read_to_string(system.save_path(1).unwrap()).unwrap();
        write_raw(&system, 1, &raw.replace("\"1.0.0\"", "\"2.0.0\""));

        assert!(matches!(system.load_game(1), Err(GameError::VersionMismatch(_))));
    }

    #[test]
    fn unknown_zone_type_fails_reconstruction() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&Hero::new("Aria"), &world.zones()[1], 1).unwrap();
        let raw = fs::read_to_string(system.save_path(1).unwrap()).unwrap();
        write_raw(&system, 1, &raw.replace("\"CombatZone\"", "\"DragonLair\""));

        assert!(system.load_game(1).is_ok());
        assert!(matches!(
            system.load_state(1),
            Err(GameError::UnknownZoneType(tag)) if tag == "DragonLair"
        ));
    }

    #[test]
    fn zone_danger_out_of_range_fails_reconstruction() {
        let (_dir, system) = system();
        let world = World::standard();
        let cases = [
            (&world.zones()[1], "\"dangerLevel\": 1", "\"dangerLevel\": 0"),
            (&world.zones()[0], "\"dangerLevel\": 0", "\"dangerLevel\": 5"),
            (&world.zones()[1], "\"dangerLevel\": 1", "\"dangerLevel\": 4294967295"),
        ];
        for (zone, from, to) in cases {
            system.save_game(&Hero::new("Aria"), zone, 1).unwrap();
            let raw = fs::read_to_string(system.save_path(1).unwrap()).unwrap();
            assert!(raw.contains(from));
            write_raw(&system, 1, &raw.replace(from, to));

            assert!(matches!(
                system.load_state(1),
                Err(GameError::InvalidZoneData(_))
            ));
        }
    }

    #[test]
    fn tampered_hero_fails_reconstruction() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&adventurer(), &world.zones()[0], 1).unwrap();
        let mut record = system.load_game(1).unwrap();
        record.hero.attack += 10;

        assert!(matches!(
            reconstruct_game_state(record),
            Err(GameError::InvalidHeroData(_))
        ));
    }

    #[test]
    fn list_delete_and_has_save() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&adventurer(), &world.zones()[3], 1).unwrap();
        write_raw(&system, 3, "[]");

        let summaries = system.list_saves();
        assert_eq!(summaries.len(), 3);
        assert_eq!(
            summaries[0].status,
            SlotStatus::Occupied {
                hero_name: "Aria".into(),
                level: 2,
                zone: "Snowy Mountain".into(),
            }
        );
        assert_eq!(summaries[1].status, SlotStatus::Empty);
        assert!(matches!(summaries[2].status, SlotStatus::Unreadable(_)));

        assert!(system.has_save(1));
        assert_eq!(system.delete_save(1).unwrap(), true);
        assert_eq!(system.delete_save(1).unwrap(), false);
        assert!(!system.has_save(1));
    }

    #[test]
    fn auto_save_writes_slot_zero_and_quick_load_reads_it() {
        let (_dir, system) = system();
        let world = World::standard();
        let mut auto = AutoSave::new(system, true);
        let hero = adventurer();

        assert!(auto.save(&hero, &world.zones()[1]));
        assert!(auto.last_save_time().is_some());
        let state = auto.save_system.quick_load().unwrap();
        assert_eq!(state.hero, hero);
    }

    #[test]
    fn loaded_inventory_keeps_stack_order() {
        let (_dir, system) = system();
        let world = World::standard();
        system.save_game(&adventurer(), &world.zones()[0], 2).unwrap();

        let state = system.load_state(2).unwrap();
        let names: Vec<&str> = state.hero.inventory().stacks().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["Iron Sword", "Leather Armor", "Health Potion", "Bread", "Mana Potion"]
        );
    }

    #[test]
    fn auto_save_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let system = SaveSystem::new(dir.path()).unwrap();
        // 占用临时文件路径，使写入失败
        fs::create_dir(system.save_path(AUTO_SAVE_SLOT).unwrap().with_extension("tmp")).unwrap();

        let mut auto = AutoSave::new(system, true);
        let world = World::standard();
        assert!(!auto.save(&Hero::new("Aria"), &world.zones()[0]));
        assert!(auto.last_save_time().is_none());
    }

    #[test]
    fn disabled_auto_save_does_nothing() {
        let (_dir, system) = system();
        let mut auto = AutoSave::new(system, false);
        let world = World::standard();
        assert!(!auto.save(&Hero::new("Aria"), &world.zones()[0]));
        assert!(!auto.save_system.has_save(AUTO_SAVE_SLOT));
    }
}
