//! Network transports feeding the session layer.

pub mod codec;
pub mod lines;
pub mod ws;
