// src/config.rs
use std::env;
use std::path::PathBuf;

/// 背包槽位下限（容纳全部初始装备）
pub const MIN_INVENTORY_SLOTS: usize = 4;

/// 运行时配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub save_dir: PathBuf,
    /// 遭遇随机数种子；None 时使用随机种子
    pub seed: Option<u64>,
    pub inventory_slots: usize,
    pub auto_save: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            seed: None,
            inventory_slots: hero::DEFAULT_MAX_SLOTS,
            auto_save: true,
        }
    }
}

impl GameConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ADVENTURE_SAVE_DIR` - Save directory (default: `saves`)
    /// - `ADVENTURE_SEED` - Encounter RNG seed (default: random)
    /// - `ADVENTURE_INVENTORY_SLOTS` - Inventory capacity (default: 20, min: 4)
    /// - `ADVENTURE_AUTOSAVE` - Auto-save after each action (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("ADVENTURE_SAVE_DIR") {
            config.save_dir = dir;
        }
        config.seed = read_env::<u64>("ADVENTURE_SEED");
        if let Some(slots) = read_env::<usize>("ADVENTURE_INVENTORY_SLOTS") {
            config.inventory_slots = slots.max(MIN_INVENTORY_SLOTS);
        }
        if let Some(enabled) = read_env_bool("ADVENTURE_AUTOSAVE") {
            config.auto_save = enabled;
        }

        config
    }

    /// 实际使用的遭遇种子
    pub fn encounter_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
