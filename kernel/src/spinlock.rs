//! A spinlock guarding a `T`, in the style of a `Mutex`.
//!
//! Used for `Proc::inner`, the MLFQ queues, and the ticks counter. Every acquire disables
//! interrupts on this hart for as long as the lock is held, the same `push_off`/`pop_off`
//! nesting discipline the teacher's `spinlock.rs` applies: the timer tick handler walks the
//! whole process table (`proc::on_tick`), and without this a tick interrupt landing on a hart
//! that already holds one of these locks (mid-`fork`, mid-`wait`) would spin against itself
//! forever. `push_off`/`pop_off` go through `current_cpu()`/`interrupts::{get,enable,disable}`,
//! both already host-test stand-ins, so this still runs under `#[cfg(test)]`.

use core::cell::UnsafeCell;
use core::hint;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

use crate::proc::current_cpu;
use crate::riscv::interrupts;

/// Disables interrupts on this hart and records nesting depth, mirroring the teacher's
/// `push_off`: the outermost call remembers whether interrupts were enabled so the matching
/// `pop_off` can restore that state once every nested lock has released.
fn push_off() {
    let was_enabled = interrupts::get();
    interrupts::disable();

    let cpu = unsafe { current_cpu() };
    if cpu.num_off == 0 {
        cpu.interrupt_enabled = was_enabled;
    }
    cpu.num_off += 1;
}

/// Reverses one `push_off`; once nesting returns to zero, restores the interrupt state the
/// outermost `push_off` observed.
fn pop_off() {
    let cpu = unsafe { current_cpu() };
    assert!(cpu.num_off >= 1, "pop_off without matching push_off");

    cpu.num_off -= 1;
    if cpu.num_off == 0 && cpu.interrupt_enabled {
        interrupts::enable();
    }
}

pub struct SpinLock<T> {
    name: &'static str,
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(value: T, name: &'static str) -> Self {
        Self {
            name,
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        push_off();

        while self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }

        SpinLockGuard { lock: self }
    }

    /// Releases a lock held by `guard` without dropping it normally, and returns a reference to
    /// the lock so the caller can `.lock()` it again later.
    ///
    /// Used by `proc::sleep` to atomically hand off between the caller's condition lock and the
    /// table lock.
    pub fn unlock(guard: SpinLockGuard<'_, T>) -> &'_ SpinLock<T> {
        let lock = guard.lock;
        core::mem::forget(guard);
        lock.locked.store(false, Ordering::Release);
        pop_off();
        lock
    }

    /// Releases the lock without going through a held guard.
    ///
    /// # Safety
    /// The caller must be certain the lock is actually held (e.g. inherited across a context
    /// switch, as in `fork_ret`) and that no other code still believes it holds a `SpinLockGuard`
    /// for this lock.
    pub unsafe fn force_unlock(&self) {
        self.locked.store(false, Ordering::Release);
        pop_off();
    }

    /// Bypasses locking entirely. Used only by lock-free, best-effort diagnostics (`procdump`)
    /// that tolerate inconsistent reads.
    ///
    /// # Safety
    /// The caller must tolerate a torn read/write racing with a concurrent lock holder.
    pub unsafe fn get_mut_unchecked(&self) -> &mut T {
        unsafe { &mut *self.value.get() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<'a, T> Deref for SpinLockGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.value.get() }
    }
}

impl<'a, T> DerefMut for SpinLockGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<'a, T> Drop for SpinLockGuard<'a, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
        pop_off();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_excludes_and_releases_on_drop() {
        let lock = SpinLock::new(0usize, "test");
        {
            let mut guard = lock.lock();
            *guard += 1;
        }
        assert_eq!(*lock.lock(), 1);
    }

    #[test]
    fn unlock_allows_relock() {
        let lock = SpinLock::new(5usize, "test");
        let guard = lock.lock();
        let reopened = SpinLock::unlock(guard);
        assert_eq!(*reopened.lock(), 5);
    }
}
