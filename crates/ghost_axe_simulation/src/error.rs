//! Ошибки уровня сессии (startup/config).
//!
//! Сама симуляция после старта не возвращает ошибок: stale-ссылки и
//! отсутствующие оверлеи обрабатываются как no-op.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    /// Gesture mode выбран, но устройство не найдено/отключено.
    /// Поиск устройства во время сессии не повторяется.
    #[error("gesture input device unavailable: {0}")]
    GestureDeviceUnavailable(String),

    #[error("failed to access settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Строка от устройства не является известным жестом.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gesture line: {0:?}")]
pub struct GestureParseError(pub String);
