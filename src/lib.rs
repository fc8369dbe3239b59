//! 回合制文字冒险：英雄在各区域探索、战斗、成长并保存进度。

pub mod config;
pub mod console;
pub mod game_loop;

pub use combat;
pub use dungeon;
pub use error;
pub use hero;
pub use items;
pub use save;

pub use crate::config::GameConfig;
pub use crate::console::ConsolePresenter;
pub use crate::game_loop::{GameSession, SessionEnd};
