//! Item store module.
//!
//! This module handles:
//! - The item record and request schemas
//! - The in-memory store and its id allocation policy

pub mod memory;
pub mod types;

pub use memory::{ItemStore, SharedStore};
pub use types::{Item, ItemId, ItemPatch, NewItem};
