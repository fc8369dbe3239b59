//src/dungeon/src/world.rs
use crate::zone::{CombatZone, SafeZone, Zone};

/// 起始区域名称
pub const STARTING_ZONE: &str = "Peaceful Town";

/// 世界地图：固定的区域列表
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    zones: Vec<Zone>,
}

fn names(monsters: &[&str]) -> Vec<String> {
    monsters.iter().map(|m| m.to_string()).collect()
}

impl World {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// 标准世界
    pub fn standard() -> Self {
        let mut town = Zone::Safe(SafeZone::new(
            STARTING_ZONE,
            "A quiet town where travellers rest between journeys",
        ));
        town.mark_discovered();

        Self::new(vec![
            town,
            Zone::Combat(CombatZone::new(
                "Peaceful Forest",
                "Sunlit woods with the odd goblin or slime",
                1,
                names(&["Goblin", "Slime"]),
            )),
            Zone::Combat(CombatZone::new(
                "Dark Cave",
                "Damp tunnels echoing with growls",
                2,
                names(&["Goblin", "Ogre", "Orc"]),
            )),
            Zone::Combat(CombatZone::new(
                "Snowy Mountain",
                "Frozen peaks patrolled by brutes",
                3,
                names(&["Ogre", "Orc"]),
            )),
            Zone::Combat(CombatZone::new(
                "Ancient Castle",
                "Crumbling halls held by an orc warband",
                4,
                names(&["Orc", "Ogre"]),
            )),
        ])
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn find(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.name() == name)
    }

    /// 新游戏的起点
    pub fn starting_zone(&self) -> Option<&Zone> {
        self.find(STARTING_ZONE).or_else(|| self.zones.first())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.zones.iter().position(|z| z.name() == name)
    }

    pub fn zone_mut(&mut self, index: usize) -> Option<&mut Zone> {
        self.zones.get_mut(index)
    }

    /// 用读档得到的区域状态替换同名区域，返回其位置
    pub fn replace(&mut self, zone: Zone) -> usize {
        match self.position(zone.name()) {
            Some(index) => {
                self.zones[index] = zone;
                index
            }
            None => {
                self.zones.push(zone);
                self.zones.len() - 1
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::standard()
    }
}
