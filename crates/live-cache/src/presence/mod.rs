//! Presence storage module.
//!
//! Tracks which viewers are currently watching each live session.

mod viewer_presence;

pub use viewer_presence::ViewerPresenceStore;
