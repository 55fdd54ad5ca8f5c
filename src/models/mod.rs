//! Domain model module declarations.

pub mod block;
pub mod events;
pub mod round;
