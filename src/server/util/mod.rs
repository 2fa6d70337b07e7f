//! Small helpers shared across layers.

pub mod code;
pub mod extract;
pub mod password;
