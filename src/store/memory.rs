//! Process-local item store.
//!
//! Items are kept in insertion order in a `Vec`; lookups are linear. The id
//! counter only ever moves forward, so ids retired by `delete` are never
//! handed out again.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::types::{Item, ItemId, ItemPatch, NewItem};
use crate::error::{StoreError, NAME_REQUIRED};

/// Store shared between request handlers. Writers hold the lock for the
/// whole read-modify-write of a mutation.
pub type SharedStore = Arc<RwLock<ItemStore>>;

/// In-memory owner of the item collection and id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: ItemId,
}

impl ItemStore {
    /// Store with no items; the first id issued is 1.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Store pre-populated with the two sample items (ids 1 and 2).
    pub fn seeded() -> Self {
        Self {
            items: vec![
                Item {
                    id: 1,
                    name: "Sample Item 1".to_string(),
                    description: "This is a sample item".to_string(),
                },
                Item {
                    id: 2,
                    name: "Sample Item 2".to_string(),
                    description: "Another sample item".to_string(),
                },
            ],
            next_id: 3,
        }
    }

    /// Wrap the store for sharing across handlers.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// All items in insertion order.
    pub fn list_all(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get_by_id(&self, id: ItemId) -> Result<&Item, StoreError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Validate and append a new item, allocating the next id.
    pub fn create(&mut self, new: NewItem) -> Result<Item, StoreError> {
        let name = match new.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(StoreError::Validation(NAME_REQUIRED)),
        };

        let item = Item {
            id: self.next_id,
            name,
            description: new.description.unwrap_or_default(),
        };
        self.next_id += 1;
        self.items.push(item.clone());

        debug!(id = item.id, "item created");
        Ok(item)
    }

    /// Apply the fields present in `patch` to an existing item.
    ///
    /// Required-ness of `name` is only enforced on create, so an empty name
    /// is accepted here.
    pub fn update(&mut self, id: ItemId, patch: ItemPatch) -> Result<Item, StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }

        debug!(id, "item updated");
        Ok(item.clone())
    }

    /// Remove an item. Its id stays retired.
    pub fn delete(&mut self, id: ItemId) -> Result<(), StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;

        self.items.remove(index);
        debug!(id, "item deleted");
        Ok(())
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id the next successful create will receive.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::seeded()
    }
}
