//! Address space primitive.
//!
//! Out of scope for the core (virtual-memory setup belongs to a real page-table walker), so this
//! is the narrow stand-in the core actually depends on: something that can grow, shrink, and be
//! duplicated byte-for-byte, the way `setupkvm`/`copyuvm`/`freevm` would be used by `proc.rs`.
//! No page tables, no MMU — just enough surface to drive `growproc`/`fork`/reaping and let them be
//! unit tested on the host.

use core::fmt::Display;

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    OutOfMemory,
    ShrinkBelowZero,
}

impl Display for VmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VmError::OutOfMemory => write!(f, "out of memory"),
            VmError::ShrinkBelowZero => write!(f, "shrink below zero"),
        }
    }
}

/// A process's user address space.
///
/// Stands in for the real page table; `bytes.len()` is `proc.sz`.
#[derive(Debug, Default)]
pub struct AddrSpace {
    bytes: Vec<u8>,
}

impl AddrSpace {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Grows the address space by `n` bytes, zero-filled. Does not mutate on failure.
    pub fn grow(&mut self, n: usize) -> Result<(), VmError> {
        let mut grown = vec![0u8; n];
        self.bytes
            .try_reserve(n)
            .map_err(|_| VmError::OutOfMemory)?;
        self.bytes.append(&mut grown);
        Ok(())
    }

    /// Shrinks the address space by `n` bytes.
    pub fn shrink(&mut self, n: usize) -> Result<(), VmError> {
        if n > self.bytes.len() {
            return Err(VmError::ShrinkBelowZero);
        }
        self.bytes.truncate(self.bytes.len() - n);
        Ok(())
    }

    /// Duplicates this address space byte-for-byte, as `copyuvm` would for `fork`.
    pub fn duplicate(&self) -> Result<Self, VmError> {
        let mut copy = Vec::new();
        copy.try_reserve(self.bytes.len())
            .map_err(|_| VmError::OutOfMemory)?;
        copy.extend_from_slice(&self.bytes);
        Ok(Self { bytes: copy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_then_shrink_tracks_size() {
        let mut space = AddrSpace::new();
        space.grow(100).unwrap();
        assert_eq!(space.size(), 100);
        space.shrink(40).unwrap();
        assert_eq!(space.size(), 60);
    }

    #[test]
    fn shrink_past_zero_fails_without_mutating() {
        let mut space = AddrSpace::new();
        space.grow(10).unwrap();
        assert_eq!(space.shrink(20), Err(VmError::ShrinkBelowZero));
        assert_eq!(space.size(), 10);
    }

    #[test]
    fn duplicate_is_independent_copy() {
        let mut space = AddrSpace::new();
        space.grow(8).unwrap();
        let mut dup = space.duplicate().unwrap();
        dup.grow(8).unwrap();
        assert_eq!(space.size(), 8);
        assert_eq!(dup.size(), 16);
    }
}
