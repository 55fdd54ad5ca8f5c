//! Client sessions: request coordination and the per-connection loop.

pub mod connection;
pub mod coordinator;
