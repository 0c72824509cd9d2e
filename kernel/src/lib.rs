//! Process table and scheduler core for a teaching kernel.
//!
//! `#[cfg(test)]` builds link `std` so the portable scheduling logic (everything except the
//! per-CPU `scheduler()` loop, the timer trap, and the raw `swtch`) can run as ordinary host
//! unit tests; the real target is `no_std`, boots on a single RISC-V hart group, and wires the
//! same modules into `main()` below.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod abi;
pub mod console;
pub mod error;
pub mod file;
pub mod fs;
pub mod kalloc;
pub mod param;
pub mod printf;
pub mod proc;
pub mod riscv;
pub mod spinlock;
pub mod swtch;
pub mod sync;
pub mod syscall;
pub mod sysproc;
pub mod trap;
pub mod uart;
pub mod vm;

#[cfg(not(test))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(test))]
use proc::SchedulerPolicy as _;

#[cfg(not(test))]
use crate::println;

#[cfg(not(test))]
static STARTED: AtomicBool = AtomicBool::new(false);

/// Kernel entry point, called once per hart by `main.rs`.
///
/// Hart 0 brings up the heap and the process table, starts `init`, and then falls into the
/// scheduler like every other hart; the others spin until hart 0 signals it's safe to join.
#[cfg(not(test))]
pub fn main() -> ! {
    let cpu_id = unsafe { riscv::registers::tp::read() };

    if cpu_id == 0 {
        kalloc::init();

        println!();
        println!("nucleos kernel is booting");
        println!("scheduler policy: {}", proc::ACTIVE.name());
        println!();

        proc::user_init();

        STARTED.store(true, Ordering::SeqCst);
    } else {
        while !STARTED.load(Ordering::SeqCst) {
            core::hint::spin_loop();
        }
    }

    println!("hart {} entering scheduler", cpu_id);

    unsafe { proc::scheduler() }
}

#[cfg(not(test))]
pub fn panic_handler(info: &core::panic::PanicInfo<'_>) -> ! {
    printf::panic(info)
}
