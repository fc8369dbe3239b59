//! 游戏错误处理模块
//!
//! 处理存档读写、记录校验、状态重建过程中可能出现的各种错误。

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 存档系统错误
    #[error("Save system error: {0}")]
    SaveError(#[from] anyhow::Error),

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 反序列化错误
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// 无效的存档槽位
    #[error("Invalid save slot: {0}")]
    InvalidSlot(u8),

    /// 槽位中没有存档
    #[error("Save slot {0} is empty")]
    EmptySlot(u8),

    /// 存档数据损坏（缺少必需字段等）
    #[error("Corrupted save data: {0}")]
    CorruptedSave(String),

    /// 游戏版本不兼容
    #[error("Incompatible game version: {0}")]
    VersionMismatch(String),

    /// 未知的区域类型标签
    #[error("Unknown zone type: {0}")]
    UnknownZoneType(String),

    /// 区域数据无效
    #[error("Invalid zone data: {0}")]
    InvalidZoneData(String),

    /// 英雄数据无效
    #[error("Invalid hero data: {0}")]
    InvalidHeroData(String),

    /// 用户输入错误
    #[error("Input error: {0}")]
    InputError(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        // 语法或结构错误意味着存档已损坏，IO类错误单独归类
        if err.is_io() {
            GameError::DeserializationError(err.to_string())
        } else if err.is_syntax() || err.is_eof() {
            GameError::CorruptedSave(err.to_string())
        } else {
            GameError::DeserializationError(err.to_string())
        }
    }
}

impl GameError {
    /// Whether this failure means the slot simply holds nothing usable yet.
    pub fn is_missing_save(&self) -> bool {
        match self {
            GameError::EmptySlot(_) => true,
            GameError::IoError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::CorruptedSave(_) => "Save data is corrupted and cannot be loaded".to_string(),
        GameError::InvalidSlot(slot) => format!("Save slot {} does not exist", slot),
        GameError::EmptySlot(slot) => format!("No save found in slot {}", slot),
        GameError::VersionMismatch(v) => format!("Save was written by an incompatible version: {}", v),
        GameError::UnknownZoneType(tag) => format!("Save refers to an unknown zone type: {}", tag),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "Save file does not exist".to_string(),
            std::io::ErrorKind::PermissionDenied => "No permission to access the save file".to_string(),
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}
