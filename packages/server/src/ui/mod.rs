//! WebSocket relay server (transport layer).

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
