//! Single-writer discipline per repository root.
//!
//! Every operation on a [`Repository`](crate::Repository) holds the async
//! mutex for its root while it touches the working tree, the backend index
//! or scratch artifacts. Handles opened on the same root through the same
//! [`RootLocks`] share one mutex, so two handles cannot interleave either.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// The per-root mutex handed to repository handles.
pub type RootLock = Arc<tokio::sync::Mutex<()>>;

/// Registry of per-root mutexes keyed by canonical root path.
#[derive(Debug, Clone, Default)]
pub struct RootLocks {
    inner: Arc<Mutex<HashMap<PathBuf, RootLock>>>,
}

impl RootLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by [`Repository::open`](crate::Repository::open).
    pub fn shared() -> &'static RootLocks {
        static SHARED: OnceLock<RootLocks> = OnceLock::new();
        SHARED.get_or_init(RootLocks::new)
    }

    /// Returns the mutex for `root`, creating it on first use.
    ///
    /// Roots that exist are keyed by their canonical path so `a/../a` and
    /// `a` share a lock.
    pub fn for_root(&self, root: &Path) -> RootLock {
        let key = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        self.inner.lock().entry(key).or_default().clone()
    }

    /// Number of distinct roots seen so far.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_root_shares_one_lock() {
        let dir = tempfile::tempdir().unwrap();
        let locks = RootLocks::new();

        let a = locks.for_root(dir.path());
        let b = locks.for_root(&dir.path().join(".").join("..").join(
            dir.path().file_name().unwrap(),
        ));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn different_roots_get_different_locks() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let locks = RootLocks::new();

        let a = locks.for_root(first.path());
        let b = locks.for_root(second.path());
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn lock_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let locks = RootLocks::new();
        let lock = locks.for_root(dir.path());

        let guard = lock.lock().await;
        assert!(locks.for_root(dir.path()).try_lock().is_err());
        drop(guard);
        assert!(locks.for_root(dir.path()).try_lock().is_ok());
    }
}
