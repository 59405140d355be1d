//! Utility modules.

pub mod excerpt;
pub mod slug;
