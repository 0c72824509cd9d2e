//! Minimal polled UART driver.
//!
//! Out of scope for the core: kept to the single synchronous byte-write call `console.rs` needs.
//! Real register offsets for a 16550-compatible UART at a fixed MMIO base, matching the teacher's
//! QEMU `virt` machine layout.

const UART_BASE: usize = 0x1000_0000;
const THR_OFFSET: usize = 0;
const LSR_OFFSET: usize = 5;
const LSR_TX_IDLE: u8 = 1 << 5;

/// Writes one byte to the UART, busy-waiting until the transmit holding register is empty.
///
/// # Safety
/// Only valid when `UART_BASE` is actually mapped, i.e. on the real hardware/QEMU target.
#[cfg(not(test))]
pub fn putc_sync(c: u8) {
    unsafe {
        let lsr = (UART_BASE + LSR_OFFSET) as *const u8;
        while core::ptr::read_volatile(lsr) & LSR_TX_IDLE == 0 {
            core::hint::spin_loop();
        }
        let thr = (UART_BASE + THR_OFFSET) as *mut u8;
        core::ptr::write_volatile(thr, c);
    }
}
