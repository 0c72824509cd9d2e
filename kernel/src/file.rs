//! Open-file handle.
//!
//! Out of scope for the core (the real file table belongs to the filesystem), but `Proc` owns an
//! `ofile[NOFILE]` of these and `fork`/`exit` must dup/close them, so the refcounted handle
//! itself is part of what the core depends on.

extern crate alloc;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

/// A reference-counted open-file handle. The real kernel's version distinguishes pipes, inodes,
/// and devices; the core only ever dups, closes, and drops these, so that distinction is left to
/// the filesystem and not modeled here.
#[derive(Debug, Clone)]
pub struct File {
    refcount: Arc<AtomicUsize>,
}

impl File {
    pub fn new() -> Self {
        Self {
            refcount: Arc::new(AtomicUsize::new(1)),
        }
    }

    /// Increments the refcount and returns a new handle sharing it, as `fork` does for every
    /// entry in `ofile`.
    pub fn dup(&self) -> Self {
        self.refcount.fetch_add(1, Ordering::Relaxed);
        Self {
            refcount: Arc::clone(&self.refcount),
        }
    }

    /// Decrements the refcount; the underlying resource is released once it reaches zero.
    pub fn close(self) {
        self.refcount.fetch_sub(1, Ordering::AcqRel);
    }

    pub fn ref_count(&self) -> usize {
        self.refcount.load(Ordering::Acquire)
    }
}

impl Default for File {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dup_shares_refcount() {
        let f = File::new();
        let g = f.dup();
        assert_eq!(f.ref_count(), 2);
        g.close();
        assert_eq!(f.ref_count(), 1);
    }
}
