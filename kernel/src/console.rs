//! Console output sink.
//!
//! Out of scope for the core: a real console multiplexes UART interrupts and a line-editing
//! input buffer. The core only needs somewhere for `println!`/`procdump` to write, so this is a
//! byte sink backed by the UART on real hardware and, on the host test target, an in-memory
//! buffer so diagnostics can be asserted on in tests if ever needed.

extern crate alloc;

use crate::spinlock::SpinLock;

pub static CONSOLE: SpinLock<Console> = SpinLock::new(Console::new(), "console");

pub struct Console {
    #[cfg(test)]
    captured: alloc::vec::Vec<u8>,
}

impl Console {
    pub const fn new() -> Self {
        Self {
            #[cfg(test)]
            captured: alloc::vec::Vec::new(),
        }
    }

    #[cfg(not(test))]
    pub fn putc(&mut self, c: u8) {
        crate::uart::putc_sync(c);
    }

    #[cfg(test)]
    pub fn putc(&mut self, c: u8) {
        self.captured.push(c);
    }
}
