//! In-memory meal store.

use std::cell::RefCell;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::document::{decode_collection, encode_fields};
use crate::models::Meal;
use crate::store::{MealStore, SnapshotCallback, StoreError, SubscriptionHandle};

/// Reference [`MealStore`] backed by an insertion-ordered document list.
///
/// Snapshots are delivered synchronously: on subscribe and at the end of
/// every successful mutation. Single-threaded, like the planner it feeds.
pub struct MemoryStore {
    inner: RefCell<Inner>,
}

struct Inner {
    docs: Vec<(String, Map<String, Value>)>,
    subscribers: Vec<(u64, SnapshotCallback)>,
    next_handle: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                docs: Vec::new(),
                subscribers: Vec::new(),
                next_handle: 0,
            }),
        }
    }

    /// Current decoded collection, in document order.
    pub fn snapshot(&self) -> Vec<Meal> {
        decode_collection(&self.inner.borrow().docs)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        // Collect the callbacks first so no borrow is held while they run
        let subscribers: Vec<SnapshotCallback> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in subscribers {
            callback(&snapshot);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MealStore for MemoryStore {
    fn subscribe(&self, on_snapshot: SnapshotCallback) -> SubscriptionHandle {
        let handle = {
            let mut inner = self.inner.borrow_mut();
            let handle = inner.next_handle;
            inner.next_handle += 1;
            inner.subscribers.push((handle, on_snapshot.clone()));
            SubscriptionHandle::from_raw(handle)
        };

        on_snapshot(&self.snapshot());
        handle
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(id, _)| SubscriptionHandle::from_raw(*id) != handle);
    }

    fn create(&self, meal: &Meal) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.inner
            .borrow_mut()
            .docs
            .push((id.clone(), encode_fields(meal)));
        self.notify();
        Ok(id)
    }

    fn replace(&self, id: &str, meal: &Meal) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            let doc = inner
                .docs
                .iter_mut()
                .find(|(doc_id, _)| doc_id == id)
                .ok_or_else(|| StoreError::UnknownId(id.to_string()))?;
            doc.1 = encode_fields(meal);
        }
        self.notify();
        Ok(())
    }

    fn set_available(&self, id: &str, value: bool) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.borrow_mut();
            let doc = inner
                .docs
                .iter_mut()
                .find(|(doc_id, _)| doc_id == id)
                .ok_or_else(|| StoreError::UnknownId(id.to_string()))?;
            doc.1.insert("checked".to_string(), Value::Bool(value));
        }
        self.notify();
        Ok(())
    }
}
