//! Crate-wide error enum and `Result` alias
//!
//! Only battle-start preconditions and data-loading failures are fatal.
//! Mid-battle anomalies (an unknown learned art id, an unpayable roster)
//! degrade to skipped actions instead of errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot start a battle with an empty party")]
    EmptyParty,

    #[error("cannot start a battle against a defeated enemy: {0}")]
    EnemyAlreadyDefeated(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
