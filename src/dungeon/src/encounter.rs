//src/dungeon/src/encounter.rs
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tracing::debug;

use combat::Monster;

use crate::catalog::{MonsterCatalog, MonsterTemplate};
use crate::zone::Zone;

/// 遭遇基础概率
pub const BASE_ENCOUNTER_CHANCE: f64 = 0.3;
/// 每级危险等级增加的遭遇概率
pub const ENCOUNTER_CHANCE_PER_DANGER: f64 = 0.1;

/// 遭遇概率：0.3 + 0.1 × (danger − 1)
///
/// Not clamped: from danger level 8 upwards every exploration triggers.
pub fn encounter_chance(danger_level: u32) -> f64 {
    BASE_ENCOUNTER_CHANCE + ENCOUNTER_CHANCE_PER_DANGER * (f64::from(danger_level) - 1.0)
}

/// 区域遭遇生成器
pub struct EncounterGenerator<'c, R: Rng = Pcg32> {
    catalog: &'c MonsterCatalog,
    rng: R,
}

impl<'c> EncounterGenerator<'c, Pcg32> {
    /// 使用确定性种子创建
    pub fn seeded(catalog: &'c MonsterCatalog, seed: u64) -> Self {
        Self::new(catalog, Pcg32::seed_from_u64(seed))
    }

    /// 使用随机种子创建
    pub fn from_entropy(catalog: &'c MonsterCatalog) -> Self {
        Self::seeded(catalog, rand::random())
    }
}

impl<'c, R: Rng> EncounterGenerator<'c, R> {
    pub fn new(catalog: &'c MonsterCatalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    pub fn catalog(&self) -> &MonsterCatalog {
        self.catalog
    }

    /// 探索一次区域，可能遭遇怪物
    pub fn generate_random_encounter(&mut self, zone: &Zone) -> Option<Monster> {
        if !zone.can_have_combat() {
            return None;
        }
        let roll: f64 = self.rng.random();
        self.generate_with_roll(zone, roll)
    }

    /// 使用给定的掷骰结果（0.0..1.0）判断遭遇
    pub fn generate_with_roll(&mut self, zone: &Zone, roll: f64) -> Option<Monster> {
        if !zone.can_have_combat() {
            return None;
        }
        let chance = encounter_chance(zone.danger_level());
        if roll >= chance {
            debug!(zone = zone.name(), roll, chance, "no encounter");
            return None;
        }

        let pool = self.pool(zone);
        if pool.is_empty() {
            return None;
        }
        let template = pool[self.rng.random_range(0..pool.len())];
        let monster = template.scaled(zone.danger_level());
        debug!(zone = zone.name(), monster = %monster.name, "encounter");
        Some(monster)
    }

    /// 区域允许的怪物；列表为空或全部未知时退回整个怪物表
    fn pool(&self, zone: &Zone) -> Vec<&'c MonsterTemplate> {
        let catalog = self.catalog;
        let allowed: Vec<&MonsterTemplate> = zone
            .monster_types()
            .iter()
            .filter_map(|name| catalog.get(name))
            .collect();
        if allowed.is_empty() {
            catalog.templates().iter().collect()
        } else {
            allowed
        }
    }
}
