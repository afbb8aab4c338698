//! In-memory sales record store
//!
//! Records and the id counter share one lock, so id assignment and the
//! append that follows it happen as a single step.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{SalesError, SalesResult};
use super::record::{SalesFields, SalesId, SalesPatch, SalesRecord};

const FIRST_ID: SalesId = 1;

#[derive(Debug)]
struct StoreState {
    /// Insertion order
    records: Vec<SalesRecord>,
    next_id: SalesId,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}

impl StoreState {
    fn position(&self, id: SalesId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

/// Process-lifetime sales record table.
///
/// Ids are unique and strictly increasing until `clear`, which empties the
/// table and restarts the counter at 1.
#[derive(Debug, Default)]
pub struct SalesStore {
    state: RwLock<StoreState>,
}

impl SalesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SalesResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| SalesError::StorageError("Lock poisoned".to_string()))
    }

    fn write(&self) -> SalesResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| SalesError::StorageError("Lock poisoned".to_string()))
    }

    /// All records in insertion order
    pub fn list(&self) -> SalesResult<Vec<SalesRecord>> {
        Ok(self.read()?.records.clone())
    }

    /// Number of records currently held
    pub fn len(&self) -> SalesResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> SalesResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a new record with the next id
    pub fn create(&self, fields: SalesFields) -> SalesResult<SalesRecord> {
        let mut state = self.write()?;

        let id = state.next_id;
        state.next_id += 1;

        let record = SalesRecord::from_fields(id, fields);
        state.records.push(record.clone());
        Ok(record)
    }

    /// Overwrite every field of the record with `id`, keeping its position
    pub fn replace(&self, id: SalesId, fields: SalesFields) -> SalesResult<SalesRecord> {
        let mut state = self.write()?;
        let index = state.position(id).ok_or(SalesError::NotFound)?;

        let record = SalesRecord::from_fields(id, fields);
        state.records[index] = record.clone();
        Ok(record)
    }

    /// Overwrite only the fields present in `patch`
    pub fn patch(&self, id: SalesId, patch: SalesPatch) -> SalesResult<SalesRecord> {
        let mut state = self.write()?;
        let index = state.position(id).ok_or(SalesError::NotFound)?;

        let record = &mut state.records[index];
        record.apply(patch);
        Ok(record.clone())
    }

    /// Remove the record with `id`, returning it
    pub fn delete(&self, id: SalesId) -> SalesResult<SalesRecord> {
        let mut state = self.write()?;
        let index = state.position(id).ok_or(SalesError::NotFound)?;
        Ok(state.records.remove(index))
    }

    /// Remove every record and restart ids at 1. Returns how many were removed.
    pub fn clear(&self) -> SalesResult<usize> {
        let mut state = self.write()?;
        let removed = state.records.len();
        *state = StoreState::default();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn fields(buyer: &str, item: &str) -> SalesFields {
        SalesFields {
            buyer_name: buyer.to_string(),
            item_name: item.to_string(),
            transaction_date: "2024-01-05".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = SalesStore::new();
        let a = store.create(fields("Ann", "Pen")).unwrap();
        let b = store.create(fields("Bob", "Ink")).unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = SalesStore::new();
        store.create(fields("Ann", "Pen")).unwrap();
        let b = store.create(fields("Bob", "Ink")).unwrap();
        store.delete(b.id).unwrap();

        let c = store.create(fields("Cid", "Cap")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = SalesStore::new();
        for name in ["c", "a", "b"] {
            store.create(fields(name, "x")).unwrap();
        }

        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.buyer_name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_replace_keeps_id_and_position() {
        let store = SalesStore::new();
        store.create(fields("Ann", "Pen")).unwrap();
        store.create(fields("Bob", "Ink")).unwrap();

        let replaced = store.replace(1, fields("Zed", "Cap")).unwrap();
        assert_eq!(replaced.id, 1);

        let list = store.list().unwrap();
        assert_eq!(list[0].buyer_name, "Zed");
        assert_eq!(list[1].buyer_name, "Bob");
    }

    #[test]
    fn test_replace_missing_is_not_found() {
        let store = SalesStore::new();
        assert!(matches!(
            store.replace(99, fields("Ann", "Pen")),
            Err(SalesError::NotFound)
        ));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_patch_updates_only_supplied_fields() {
        let store = SalesStore::new();
        store.create(fields("Ann", "Pen")).unwrap();

        let patched = store
            .patch(
                1,
                SalesPatch {
                    item_name: Some("Pencil".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(patched.buyer_name, "Ann");
        assert_eq!(patched.item_name, "Pencil");
        assert_eq!(store.list().unwrap()[0], patched);
    }

    #[test]
    fn test_patch_and_delete_missing() {
        let store = SalesStore::new();
        assert!(matches!(
            store.patch(1, SalesPatch::default()),
            Err(SalesError::NotFound)
        ));
        assert!(matches!(store.delete(1), Err(SalesError::NotFound)));
    }

    #[test]
    fn test_clear_resets_counter() {
        let store = SalesStore::new();
        store.create(fields("Ann", "Pen")).unwrap();
        store.create(fields("Bob", "Ink")).unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.is_empty().unwrap());
        assert_eq!(store.create(fields("Cid", "Cap")).unwrap().id, 1);
    }

    #[test]
    fn test_clear_on_empty_store() {
        let store = SalesStore::new();
        assert_eq!(store.clear().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_creates_yield_unique_ids() {
        let store = Arc::new(SalesStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..100)
                        .map(|i| {
                            store
                                .create(fields(&format!("t{}-{}", t, i), "x"))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<SalesId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 800);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&800));
    }
}
