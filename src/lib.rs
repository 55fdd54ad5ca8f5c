#![forbid(unsafe_code)]

//! Shared real-time letter board.
//!
//! Many clients lock, move, and unlock letter blocks on one 10×10 grid
//! while a timer cycles the board through running and break phases.

pub mod board;
pub mod config;
pub mod errors;
pub mod models;
pub mod round;
pub mod session;
pub mod transport;

pub use config::GlobalConfig;
pub use errors::{AppError, BoardError, Result};
