//! Utilities shared by the Watchsync binaries.

pub mod logger;
pub mod time;
