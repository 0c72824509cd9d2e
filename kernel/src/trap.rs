//! Timer interrupt handling.
//!
//! Out of scope for the core: with `AddrSpace` a plain byte buffer rather than a real page table,
//! there is no trampoline/trapframe dance to reproduce. What the core actually depends on is the
//! tick counter and the fact that a timer interrupt is the one place preemption gets decided, so
//! that much is kept, grounded the same way the teacher's `clock_intr` is: a locked counter,
//! `proc::wakeup` on every tick, and a yield when the current policy says the slice is up.

use crate::proc;
use crate::spinlock::SpinLock;

/// Ticks since boot. Processes sleeping on `sleep::UPTIME_CHANNEL` (the address of this lock) are
/// woken every tick, the same hook `wait`/`sleep` syscalls use to implement timeouts.
pub static TICKS: SpinLock<usize> = SpinLock::new(0, "time");

/// Channel identity for "a tick has elapsed" — any sleeper parked on this address wakes once per
/// tick, mirroring the teacher's `wakeup(&ticks as *const _ as usize)`.
pub fn uptime_channel() -> usize {
    &TICKS as *const _ as usize
}

pub fn uptime() -> usize {
    *TICKS.lock()
}

/// Advances the clock by one tick, wakes anything sleeping on it, and tells the scheduler whether
/// the currently running process has exhausted its slice under the active policy.
///
/// Returns `true` if the caller should yield the CPU.
pub fn tick() -> bool {
    {
        let mut ticks = TICKS.lock();
        *ticks += 1;
    }
    proc::wakeup(uptime_channel());
    proc::on_tick()
}

/// Real timer-interrupt entry point. Reprograms the next interrupt and yields if the scheduler
/// policy calls for it.
///
/// # Safety
/// Only valid as the target of the timer-interrupt vector on the real hart.
#[cfg(not(test))]
pub unsafe fn timer_intr() {
    const INTERVAL: u64 = 1_000_000;
    unsafe {
        let now: u64;
        core::arch::asm!("rdtime {}", out(reg) now);
        core::arch::asm!("csrw stimecmp, {}", in(reg) now + INTERVAL);
    }
    if tick() {
        proc::r#yield();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_uptime() {
        let before = uptime();
        tick();
        assert_eq!(uptime(), before + 1);
    }
}
