//! Watch-party relay library.
//!
//! Clients join a named room; play/pause/seek/video-change actions from one
//! member are relayed to every other member, and late joiners receive the
//! room's latest playback state. All state is in-memory and single-process.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
