//! Minimal RISC-V register access.
//!
//! Out of scope for the core: real CSR access requires a RISC-V target. Kept to the handful of
//! primitives `proc.rs`/`trap.rs` actually call. Each is gated behind `#[cfg(not(test))]` with a
//! host-side fallback so the portable parts of `proc.rs` (everything except the per-CPU
//! `scheduler()` loop) can be exercised by `#[cfg(test)]` on a non-RISC-V host.

pub const PGSIZE: usize = 4096;

pub mod interrupts {
    use core::sync::atomic::{AtomicBool, Ordering};

    /// Host-test stand-in for the hardware interrupt-enable CSR bit.
    #[cfg(test)]
    static HOST_INTERRUPTS_ENABLED: AtomicBool = AtomicBool::new(false);

    #[cfg(not(test))]
    pub fn get() -> bool {
        let bits: usize;
        unsafe { core::arch::asm!("csrr {}, sstatus", out(reg) bits) };
        bits & (1 << 1) != 0
    }

    #[cfg(test)]
    pub fn get() -> bool {
        HOST_INTERRUPTS_ENABLED.load(Ordering::Relaxed)
    }

    #[cfg(not(test))]
    pub fn enable() {
        unsafe { core::arch::asm!("csrsi sstatus, {}", const 1 << 1) };
    }

    #[cfg(test)]
    pub fn enable() {
        HOST_INTERRUPTS_ENABLED.store(true, Ordering::Relaxed);
    }

    #[cfg(not(test))]
    pub fn disable() {
        unsafe { core::arch::asm!("csrci sstatus, {}", const 1 << 1) };
    }

    #[cfg(test)]
    pub fn disable() {
        HOST_INTERRUPTS_ENABLED.store(false, Ordering::Relaxed);
    }
}

pub mod registers {
    pub mod tp {
        /// Reads the hart ID out of the `tp` register, where the boot code stashed it.
        ///
        /// # Safety
        /// Must be called with interrupts disabled, as with the teacher's `current_id`.
        #[cfg(not(test))]
        pub unsafe fn read() -> usize {
            let id: usize;
            unsafe { core::arch::asm!("mv {}, tp", out(reg) id) };
            id
        }

        /// Host tests are single-hart by construction; hart 0 always.
        #[cfg(test)]
        pub unsafe fn read() -> usize {
            0
        }
    }
}
