//! ABI surface shared between the kernel and user-space programs.

pub use crate::proc::PInfo;
pub use crate::syscall::{Syscall, SyscallError};

pub const MAX_PRIORITY: usize = crate::param::MAX_PRIORITY;
pub const MIN_PRIORITY: usize = crate::param::MIN_PRIORITY;
