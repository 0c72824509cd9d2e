use core::fmt::Display;

use crate::syscall::SyscallError;
use crate::vm::VmError;

/// Kernel error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    Alloc,
    InvalidArgument,
    OutOfProc,
    Vm(VmError),
    Syscall(SyscallError),
}

impl From<core::alloc::AllocError> for KernelError {
    fn from(_value: core::alloc::AllocError) -> Self {
        Self::Alloc
    }
}

impl From<VmError> for KernelError {
    fn from(value: VmError) -> Self {
        Self::Vm(value)
    }
}

impl From<SyscallError> for KernelError {
    fn from(value: SyscallError) -> Self {
        Self::Syscall(value)
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KernelError::Alloc => write!(f, "alloc error"),
            KernelError::InvalidArgument => write!(f, "invalid argument"),
            KernelError::OutOfProc => write!(f, "out of proc"),
            KernelError::Syscall(e) => write!(f, "syscall error: {}", e),
            KernelError::Vm(e) => write!(f, "vm error: {}", e),
        }
    }
}

/// Return an error, logging file:line. Use instead of `return Err(...)`.
#[macro_export]
macro_rules! err {
    ($e:expr) => {{
        #[cfg(debug_assertions)]
        {
            $crate::println!("! errored at {}:{}: {}", file!(), line!(), $e);
        }
        return Err($e.into());
    }};
}

/// Log error.
#[macro_export]
macro_rules! log {
    ($e:expr) => {
        match $e {
            Ok(v) => Ok(v),
            Err(e) => {
                #[cfg(debug_assertions)]
                $crate::println!("  at {}:{}", file!(), line!());
                Err(e)
            }
        }
    };
}

/// Propagate error with location logging. Use instead of `?`.
#[macro_export]
macro_rules! try_log {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => {
                #[cfg(debug_assertions)]
                $crate::println!("  at {}:{}", file!(), line!());
                return Err(e.into());
            }
        }
    };
}
