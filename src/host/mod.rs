//! Host environment implementations.
//!
//! The registry talks to its host only through
//! [`PrefabHost`](crate::traits::PrefabHost). [`MemoryHost`] is a complete
//! in-process scene graph for tests, tools and embedders without an engine.

pub mod arena;
pub mod memory;

pub use memory::{MemoryHost, ObjectId};
