//src/dungeon/src/lib.rs
//! 区域、世界地图与怪物遭遇。

mod catalog;
mod encounter;
mod record;
mod world;
mod zone;

pub use crate::catalog::{ATTACK_PER_DANGER, HEALTH_PER_DANGER, MonsterCatalog, MonsterTemplate};
pub use crate::encounter::{EncounterGenerator, encounter_chance};
pub use crate::record::{MAX_DANGER_LEVEL, ZoneError, ZoneRecord};
pub use crate::world::{STARTING_ZONE, World};
pub use crate::zone::{CombatZone, SafeZone, Zone, ZoneAction, ZoneInfo, ZoneKind};
