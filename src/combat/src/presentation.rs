//! Boundary between the game core and whatever renders it.
//!
//! The core only ever asks for numeric choices and reports [`GameEvent`]s;
//! wording, colors and layout belong to the implementor.

/// 游戏核心向表现层报告的可观察事件
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CombatStarted { hero: String, monster: String },
    TurnStatus { hero_health: u32, monster: String, monster_health: u32 },
    AttackLanded { attacker: String, target: String, damage: u32 },
    DefenseRaised { name: String },
    DefenseAbsorbed { damage: u32 },
    FullDamageTaken { attacker: String, damage: u32 },
    NoUsableItems,
    ItemUsed { item: String },
    ItemRejected { item: String },
    SkillUnavailable,
    InvalidChoice,
    Victory { monster: String },
    Defeat { monster: String },
    ExperienceGained { amount: u32 },
    LevelUp { level: u32, skill_points: u32 },
    ZoneEntered { zone: String, danger_level: u32 },
    MonsterAppears { name: String, health: u32, attack: u32 },
    QuietExploration { zone: String },
    Rested { health: u32 },
    GameSaved { slot: u8 },
    SaveFailed { slot: u8, reason: String },
    GameLoaded { slot: u8 },
    LoadFailed { slot: u8, reason: String },
}

/// 主菜单中可供选择的一项
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOption {
    Explore { zone: String },
    Travel { zone: String, danger_level: u32 },
    Rest,
    Save,
    Load,
}

/// 表现层协作者接口：阻塞式请求玩家输入并接收事件通知
pub trait Presentation {
    fn prompt_hero_name(&mut self) -> String;

    /// Returns a 1-based index into `options`. 0 quits the session; any other
    /// out-of-range value is treated as an invalid choice.
    fn request_path_choice(&mut self, options: &[PathOption]) -> u32;

    /// 1 = attack, 2 = defend, 3 = item, 4 = skill
    fn request_combat_choice(&mut self) -> u32;

    /// 1-based index into `items`, 0 cancels
    fn request_item_choice(&mut self, items: &[String]) -> u32;

    /// Manual save slot, 1..=3
    fn request_slot_choice(&mut self) -> u32;

    fn notify(&mut self, event: GameEvent);
}
