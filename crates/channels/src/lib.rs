//! Channel authorization for scheduled broadcasts.
//!
//! Holds the process-lifetime set of channels that moderators have granted.
//! Grants are never persisted; a restart starts from an empty set.

pub mod registry;

pub use registry::{BroadcastRegistry, ChannelHandle};
