// src/console.rs
//! 基于标准输入输出的简易表现层。

use std::io::{BufRead, Write};

use combat::{GameEvent, PathOption, Presentation};
use tracing::debug;

/// 读取失败或输入不是数字时返回的值，调用方将其视为无效选择
pub const UNPARSEABLE_CHOICE: u32 = u32::MAX;

pub struct ConsolePresenter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            debug!("console write failed: {e}");
        }
    }

    /// 读取一行；输入结束时返回None
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{prompt}").and_then(|()| self.output.flush()) {
            debug!("console write failed: {e}");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// 输入结束视为0（退出/取消）
    fn read_choice(&mut self, prompt: &str) -> u32 {
        match self.read_line(prompt) {
            None => 0,
            Some(line) => line.parse().unwrap_or(UNPARSEABLE_CHOICE),
        }
    }
}

fn describe_option(option: &PathOption) -> String {
    match option {
        PathOption::Explore { zone } => format!("Explore {zone}"),
        PathOption::Travel { zone, danger_level: 0 } => format!("Travel to {zone} (safe)"),
        PathOption::Travel { zone, danger_level } => {
            format!("Travel to {zone} (danger {danger_level})")
        }
        PathOption::Rest => "Rest".to_string(),
        PathOption::Save => "Save game".to_string(),
        PathOption::Load => "Load game".to_string(),
    }
}

fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::CombatStarted { hero, monster } => format!("{hero} engages the {monster}!"),
        GameEvent::TurnStatus {
            hero_health,
            monster,
            monster_health,
        } => format!("[HP {hero_health}] {monster}: {monster_health} HP"),
        GameEvent::AttackLanded {
            attacker,
            target,
            damage,
        } => format!("{attacker} hits {target} for {damage} damage"),
        GameEvent::DefenseRaised { name } => format!("{name} raises their guard"),
        GameEvent::DefenseAbsorbed { damage } => {
            format!("The guard holds! Only {damage} damage gets through")
        }
        GameEvent::FullDamageTaken { attacker, damage } => {
            format!("{attacker} strikes you for {damage} damage")
        }
        GameEvent::NoUsableItems => "You have nothing usable".to_string(),
        GameEvent::ItemUsed { item } => format!("You use the {item}"),
        GameEvent::ItemRejected { item } => format!("The {item} has no effect right now"),
        GameEvent::SkillUnavailable => "You fumble; skills are not ready yet".to_string(),
        GameEvent::InvalidChoice => "Invalid choice".to_string(),
        GameEvent::Victory { monster } => format!("The {monster} is defeated!"),
        GameEvent::Defeat { monster } => format!("You fall to the {monster}..."),
        GameEvent::ExperienceGained { amount } => format!("+{amount} XP"),
        GameEvent::LevelUp {
            level,
            skill_points,
        } => format!("Level up! Now level {level} ({skill_points} skill points)"),
        GameEvent::ZoneEntered { zone, danger_level } => {
            format!("== {zone} == (danger {danger_level})")
        }
        GameEvent::MonsterAppears {
            name,
            health,
            attack,
        } => format!("A {name} appears! ({health} HP, {attack} ATK)"),
        GameEvent::QuietExploration { zone } => format!("{zone} is quiet for now"),
        GameEvent::Rested { health } => format!("You rest and recover to {health} HP"),
        GameEvent::GameSaved { slot } => format!("Game saved to slot {slot}"),
        GameEvent::SaveFailed { slot, reason } => format!("Could not save to slot {slot}: {reason}"),
        GameEvent::GameLoaded { slot } => format!("Loaded slot {slot}"),
        GameEvent::LoadFailed { slot, reason } => format!("Could not load slot {slot}: {reason}"),
    }
}

impl<R: BufRead, W: Write> Presentation for ConsolePresenter<R, W> {
    fn prompt_hero_name(&mut self) -> String {
        self.read_line("Name your hero: ").unwrap_or_default()
    }

    fn request_path_choice(&mut self, options: &[PathOption]) -> u32 {
        self.say("");
        for (index, option) in options.iter().enumerate() {
            let line = format!("{}. {}", index + 1, describe_option(option));
            self.say(&line);
        }
        self.say("0. Quit");
        self.read_choice("> ")
    }

    fn request_combat_choice(&mut self) -> u32 {
        self.say("1. Attack  2. Defend  3. Use item  4. Use skill");
        self.read_choice("> ")
    }

    fn request_item_choice(&mut self, items: &[String]) -> u32 {
        for (index, item) in items.iter().enumerate() {
            let line = format!("{}. {item}", index + 1);
            self.say(&line);
        }
        self.say("0. Cancel");
        self.read_choice("> ")
    }

    fn request_slot_choice(&mut self) -> u32 {
        self.read_choice("Slot (1-3): ")
    }

    fn notify(&mut self, event: GameEvent) {
        let text = describe_event(&event);
        self.say(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn presenter(input: &str) -> ConsolePresenter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePresenter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn choices_parse_numbers_and_flag_garbage() {
        let mut console = presenter("2\nabc\n");
        assert_eq!(console.request_combat_choice(), 2);
        assert_eq!(console.request_combat_choice(), UNPARSEABLE_CHOICE);
        // 输入结束
        assert_eq!(console.request_combat_choice(), 0);
    }

    #[test]
    fn path_menu_lists_options_and_quit() {
        let mut console = presenter("1\n");
        let options = [
            PathOption::Rest,
            PathOption::Travel {
                zone: "Dark Cave".into(),
                danger_level: 2,
            },
        ];
        assert_eq!(console.request_path_choice(&options), 1);

        let (_, output) = console.into_inner();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1. Rest"));
        assert!(text.contains("2. Travel to Dark Cave (danger 2)"));
        assert!(text.contains("0. Quit"));
    }

    #[test]
    fn hero_name_is_trimmed() {
        let mut console = presenter("  Aria \n");
        assert_eq!(console.prompt_hero_name(), "Aria");
    }
}
