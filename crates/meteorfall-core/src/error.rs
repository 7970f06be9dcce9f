//! Error types.
//!
//! Nothing in the wave core returns these to a caller mid-game: configuration
//! errors stop wave progression before it begins, and purchase errors are
//! turned into `PurchaseRejected` signals.

use std::fmt;

use crate::enums::PowerUpId;

/// Problems with the runtime configuration or wiring.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required collaborator was not supplied when wiring the orchestrator.
    MissingCollaborator(&'static str),
    /// No meteor spawn points configured.
    NoSpawnPoints,
    /// A value that must be strictly positive was not.
    NonPositive {
        field: &'static str,
        value: f64,
    },
    /// Easing keyframes are not a monotonic 0→0 to 1→1 curve.
    InvalidEasingCurve(String),
    /// The configuration file could not be read.
    Io { path: String, message: String },
    /// The configuration file is not valid TOML for `GameConfig`.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCollaborator(name) => {
                write!(f, "required collaborator not configured: {name}")
            }
            ConfigError::NoSpawnPoints => write!(f, "no meteor spawn points configured"),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::InvalidEasingCurve(reason) => {
                write!(f, "invalid meteor easing curve: {reason}")
            }
            ConfigError::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            ConfigError::Parse(message) => write!(f, "failed to parse config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Why a shop purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    /// Already owned this wave cycle.
    AlreadyPurchased,
    /// The shop does not carry this item.
    NotForSale(PowerUpId),
    /// Balance below the item's cost. Purchases are never partially paid.
    InsufficientFunds { cost: u64, balance: u64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::AlreadyPurchased => write!(f, "already purchased"),
            PurchaseError::NotForSale(id) => write!(f, "{} is not for sale", id.name()),
            PurchaseError::InsufficientFunds { cost, balance } => {
                write!(f, "costs {cost}, balance is {balance}")
            }
        }
    }
}

impl std::error::Error for PurchaseError {}
