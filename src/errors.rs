//! Error types shared across the application.

use std::fmt::{Display, Formatter};

use crate::models::block::{BlockId, ClientId};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering process-level failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system or socket I/O failure.
    Io(String),
    /// HTTP, WebSocket, or line transport failure.
    Transport(String),
    /// Malformed inbound or unencodable outbound message.
    Protocol(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Transport(msg) => write!(f, "transport: {msg}"),
            Self::Protocol(msg) => write!(f, "protocol: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Protocol(err.to_string())
    }
}

/// Per-request board failures.
///
/// These are expected outcomes of racing clients, reported only to the
/// requesting connection and never fatal to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// No block with this id is on the grid.
    NotFound {
        /// Requested block.
        block_id: BlockId,
    },
    /// The block is locked by a different client.
    AlreadyLocked {
        /// Requested block.
        block_id: BlockId,
        /// Current lock holder.
        holder: ClientId,
    },
    /// A move was attempted without holding the block's lock.
    LockNotHeld {
        /// Requested block.
        block_id: BlockId,
    },
    /// Placement search found no free cell within range of the target.
    NoFreeCell {
        /// Requested block.
        block_id: BlockId,
    },
}

impl BoardError {
    /// Block the failed request referred to.
    #[must_use]
    pub fn block_id(&self) -> BlockId {
        match *self {
            Self::NotFound { block_id }
            | Self::AlreadyLocked { block_id, .. }
            | Self::LockNotHeld { block_id }
            | Self::NoFreeCell { block_id } => block_id,
        }
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { .. } => write!(f, "block not found"),
            Self::AlreadyLocked { .. } => write!(f, "block already locked by another player"),
            Self::LockNotHeld { .. } => write!(f, "you do not hold the lock for this block"),
            Self::NoFreeCell { .. } => write!(f, "no free cell available"),
        }
    }
}

impl std::error::Error for BoardError {}
