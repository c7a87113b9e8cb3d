//! Sled-backed store: one tree per member namespace.

use crate::error::{DailyCheckError, Result};
use sled::transaction::{ConflictableTransactionResult, TransactionError, TransactionalTree};
use sled::Tree;
use std::path::Path;

pub struct Store {
    db: sled::Db,
}

impl Store {
    /// Opens or creates the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DailyCheckError::StorageUnavailable(sled::Error::Io(e))
                })?;
            }
        }
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Creates the namespace if it does not exist yet and returns its tree.
    /// Idempotent.
    pub fn ensure_namespace(&self, name: &str) -> Result<Tree> {
        Ok(self.db.open_tree(name)?)
    }

    /// Runs `f` in an atomic write transaction on the namespace, then flushes.
    ///
    /// sled may re-run `f` on conflict, so it must not have side effects
    /// outside the transactional tree.
    pub fn update<A, F>(&self, tree: &Tree, f: F) -> Result<A>
    where
        F: Fn(&TransactionalTree) -> ConflictableTransactionResult<A, DailyCheckError>,
    {
        let out = tree.transaction(f).map_err(|e| match e {
            TransactionError::Abort(e) => e,
            TransactionError::Storage(e) => DailyCheckError::StorageUnavailable(e),
        })?;
        tree.flush()?;
        Ok(out)
    }

    /// Runs a read-only closure over the namespace.
    pub fn view<A, F>(&self, tree: &Tree, f: F) -> Result<A>
    where
        F: FnOnce(&Tree) -> Result<A>,
    {
        f(tree)
    }

    #[cfg(test)]
    pub fn has_namespace(&self, name: &str) -> bool {
        self.db
            .tree_names()
            .iter()
            .any(|n| n.as_ref() == name.as_bytes())
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dailycheck.db");
        let _store = Store::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_ensure_namespace_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();

        assert!(!store.has_namespace("alice"));

        let first = store.ensure_namespace("alice").unwrap();
        store
            .update(&first, |tx| {
                tx.insert("2024-01-10", "kept")?;
                Ok(())
            })
            .unwrap();

        let again = store.ensure_namespace("alice").unwrap();
        assert!(store.has_namespace("alice"));
        let value = store.view(&again, |tree| Ok(tree.get("2024-01-10")?)).unwrap();
        assert_eq!(value.unwrap().as_ref(), b"kept");
    }

    #[test]
    fn test_update_then_view() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        let alice = store.ensure_namespace("alice").unwrap();

        store
            .update(&alice, |tx| {
                tx.insert("2024-01-10", "first")?;
                Ok(())
            })
            .unwrap();
        store
            .update(&alice, |tx| {
                tx.insert("2024-01-10", "second")?;
                Ok(())
            })
            .unwrap();

        let value = store
            .view(&alice, |tree| Ok(tree.get("2024-01-10")?))
            .unwrap()
            .unwrap();
        assert_eq!(value.as_ref(), b"second");
    }

    #[test]
    fn test_aborted_update_writes_nothing() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        let alice = store.ensure_namespace("alice").unwrap();

        let result: Result<()> = store.update(&alice, |tx| {
            tx.insert("2024-01-10", "partial")?;
            Err(sled::transaction::ConflictableTransactionError::Abort(
                DailyCheckError::InvalidInput("abort".into()),
            ))
        });
        assert!(matches!(result, Err(DailyCheckError::InvalidInput(_))));

        let value = store.view(&alice, |tree| Ok(tree.get("2024-01-10")?)).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("test.db")).unwrap();
        let alice = store.ensure_namespace("alice").unwrap();
        let bob = store.ensure_namespace("bob").unwrap();

        store
            .update(&alice, |tx| {
                tx.insert("2024-01-10", "alice's")?;
                Ok(())
            })
            .unwrap();

        let value = store.view(&bob, |tree| Ok(tree.get("2024-01-10")?)).unwrap();
        assert!(value.is_none());
    }
}
