//! JSON file meal store.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};
use uuid::Uuid;

use dinner_plan_core::{
    decode_collection, encode_fields, Meal, MealStore, SnapshotCallback, StoreError,
    SubscriptionHandle,
};

/// [`MealStore`] over a single JSON file holding the meal collection as
/// an array of documents, each with its id inline.
///
/// The whole file is rewritten on every mutation and subscribers get a
/// fresh snapshot afterwards, so within one process the listener always
/// sees its own writes. Records that fail to decode are skipped with a
/// warning instead of failing the command.
pub struct JsonFileStore {
    path: PathBuf,
    inner: RefCell<Inner>,
}

struct Inner {
    docs: Vec<(String, Map<String, Value>)>,
    subscribers: Vec<(u64, SnapshotCallback)>,
    next_handle: u64,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading the collection if the file
    /// exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let docs = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            Self::parse_docs(&contents)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            inner: RefCell::new(Inner {
                docs,
                subscribers: Vec::new(),
                next_handle: 0,
            }),
        })
    }

    fn parse_docs(contents: &str) -> Result<Vec<(String, Map<String, Value>)>, StoreError> {
        let value: Value = serde_json::from_str(contents)?;
        let entries = match value {
            Value::Array(entries) => entries,
            _ => {
                tracing::warn!("Meal store file is not a JSON array, starting empty");
                return Ok(Vec::new());
            }
        };

        let mut docs = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut fields = match entry {
                Value::Object(map) => map,
                other => {
                    tracing::warn!("Skipping non-object store entry: {}", other);
                    continue;
                }
            };
            match fields.remove("id") {
                Some(Value::String(id)) => docs.push((id, fields)),
                _ => {
                    tracing::warn!("Skipping store entry without an id");
                }
            }
        }
        Ok(docs)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries: Vec<Value> = self
            .inner
            .borrow()
            .docs
            .iter()
            .map(|(id, fields)| {
                let mut entry = fields.clone();
                entry.insert("id".to_string(), Value::String(id.clone()));
                Value::Object(entry)
            })
            .collect();

        let contents = serde_json::to_string_pretty(&Value::Array(entries))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Current decoded collection, in document order.
    pub fn snapshot(&self) -> Vec<Meal> {
        decode_collection(&self.inner.borrow().docs)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
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

impl MealStore for JsonFileStore {
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
        self.persist()?;
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
        self.persist()?;
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
        self.persist()?;
        self.notify();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn store_path(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().join("meals.json")
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(store_path(&temp_dir)).unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_create_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);

        let store = JsonFileStore::open(&path).unwrap();
        let id = store
            .create(
                &Meal::new("Tacos")
                    .with_ingredients(vec!["Beef".into(), "Cheese".into()])
                    .with_recipe("Cook beef."),
            )
            .unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let snapshot = reopened.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id.as_deref(), Some(id.as_str()));
        assert_eq!(snapshot[0].name, "Tacos");
        assert_eq!(snapshot[0].ingredients, vec!["Beef", "Cheese"]);
    }

    #[test]
    fn test_set_available_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);

        let store = JsonFileStore::open(&path).unwrap();
        let id = store.create(&Meal::new("Pizza")).unwrap();
        store.set_available(&id, true).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.snapshot()[0].available);
    }

    #[test]
    fn test_replace_persists_full_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);

        let store = JsonFileStore::open(&path).unwrap();
        let id = store.create(&Meal::new("Pizza")).unwrap();

        let replacement = Meal::new("Margherita")
            .with_id(id.clone())
            .with_ingredients(vec!["Dough".into(), "Basil".into()]);
        store.replace(&id, &replacement).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let snapshot = reopened.snapshot();
        assert_eq!(snapshot[0].name, "Margherita");
        assert_eq!(snapshot[0].ingredients, vec!["Dough", "Basil"]);
    }

    #[test]
    fn test_malformed_entries_skipped_on_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = store_path(&temp_dir);

        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"id": "a", "name": "Good Meal"}},
                {{"name": "No Id"}},
                "not even an object",
                {{"id": "b", "checked": true}}
            ]"#
        )
        .unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        // "b" keeps its slot as a raw document but has no name, so the
        // decoded snapshot drops it too
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Good Meal");
    }

    #[test]
    fn test_subscribers_notified_on_writes() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(store_path(&temp_dir)).unwrap();

        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let handle = store.subscribe(Rc::new(move |meals: &[Meal]| {
            sink.borrow_mut().push(meals.len());
        }));

        store.create(&Meal::new("Tacos")).unwrap();
        store.create(&Meal::new("Pizza")).unwrap();
        store.unsubscribe(handle);
        store.create(&Meal::new("Salad")).unwrap();

        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_id_errors() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(store_path(&temp_dir)).unwrap();

        assert!(matches!(
            store.set_available("ghost", true),
            Err(StoreError::UnknownId(_))
        ));
    }
}
