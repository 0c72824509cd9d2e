//! Current-working-directory handle.
//!
//! Out of scope for the core: there is no real filesystem here, only the `cwd` slot every `Proc`
//! carries and that `fork` must duplicate. Modeled as an opaque, cheaply cloned inode reference so
//! the process bookkeeping that touches it doesn't need a filesystem to exist.

extern crate alloc;
use alloc::sync::Arc;

/// Opaque handle standing in for a real on-disk inode reference.
#[derive(Debug, Clone)]
pub struct Inode {
    path: Arc<str>,
}

impl Inode {
    pub fn root() -> Self {
        Self { path: Arc::from("/") }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
