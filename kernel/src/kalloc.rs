//! Global heap allocator and kernel stack allocation.
//!
//! The real kernel carves its heap out of physical memory left over after the kernel image,
//! sized from the `end` linker symbol up to `PHYSTOP`. Booting real physical memory is out of
//! scope for the core (no `entry.S`/linker script here), so the arena below is a fixed-size
//! static array instead; everything downstream of `init()` — the buddy allocator itself, the
//! `GlobalAlloc` impl, the lock discipline — is the teacher's.

#[cfg(not(test))]
use core::alloc::{GlobalAlloc, Layout};

extern crate alloc;
use alloc::boxed::Box;

#[cfg(not(test))]
use buddy_alloc::{BuddyAllocParam, buddy_alloc::BuddyAlloc};

use crate::param::KSTACK_SIZE;
#[cfg(not(test))]
use crate::spinlock::SpinLock;

/// Backing arena for the kernel heap. Sized generously for a handful of process stacks and the
/// small `Vec`/`String`/`Arc` allocations the process table makes; not meant to model a real
/// machine's physical memory size.
const HEAP_SIZE: usize = 4 * 1024 * 1024;

#[repr(align(4096))]
struct Heap([u8; HEAP_SIZE]);
#[cfg(not(test))]
static mut HEAP: Heap = Heap([0; HEAP_SIZE]);

// The host test target builds with `std` already linked, which brings its own global allocator;
// only the real `no_std` target needs this one.
#[cfg(not(test))]
#[global_allocator]
static KMEM: Kmem = Kmem(SpinLock::new(None, "kmem"));

#[cfg(not(test))]
struct Kmem(SpinLock<Option<BuddyAlloc>>);
#[cfg(not(test))]
unsafe impl Sync for Kmem {}

#[cfg(not(test))]
unsafe impl GlobalAlloc for Kmem {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.0
            .lock()
            .as_mut()
            .expect("kmem to be init")
            .malloc(layout.size())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        unsafe { self.0.lock().as_mut().expect("kmem to be init").free(ptr) }
    }
}

/// Initializes the global allocator. Must run once, before the first allocation, from hart 0.
#[cfg(not(test))]
pub fn init() {
    let mut guard = KMEM.0.lock();
    let base = &raw mut HEAP as *mut u8;
    let alloc_param = BuddyAllocParam::new(base, HEAP_SIZE, 0x1000);
    *guard = Some(unsafe { BuddyAlloc::new(alloc_param) });
}

/// An owned kernel stack. Freed (via `Drop`) when the owning `Proc` is reaped.
#[derive(Debug)]
pub struct KernelStack(Box<[u8]>);

impl KernelStack {
    /// Allocates a zeroed kernel stack, or `None` on allocation failure.
    pub fn alloc() -> Option<Self> {
        let mut mem = alloc::vec::Vec::new();
        mem.try_reserve_exact(KSTACK_SIZE).ok()?;
        mem.resize(KSTACK_SIZE, 0);
        Some(Self(mem.into_boxed_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Address of the top of the stack (stacks grow down), for seeding `Context::sp`.
    pub fn top(&self) -> usize {
        self.0.as_ptr() as usize + self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_yields_requested_size() {
        let stack = KernelStack::alloc().expect("alloc");
        assert_eq!(stack.len(), KSTACK_SIZE);
        assert!(stack.top() > 0);
    }
}
