//! System call numbering, argument fetching, and dispatch.
//!
//! Out of scope for the core in its full original form: a real dispatcher fetches pointer
//! arguments out of user memory via the page table. With no MMU modeled (see `vm.rs`), syscalls
//! here read straight out of the `TrapFrame` register slots and return values directly, rather
//! than writing through user-space out-pointers the way `getpinfo(stat*, pid)`/`waitx(wtime*,
//! rtime*)` do in the original ABI.

use core::fmt::Display;

use crate::println;
use crate::proc::TrapFrame;
use crate::sysproc::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallError {
    Unknown(usize),
    InvalidArgument(&'static str),
    Proc(&'static str),
}

impl Display for SyscallError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SyscallError::Unknown(i) => write!(f, "unknown syscall {i}"),
            SyscallError::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            SyscallError::Proc(s) => write!(f, "{s}"),
        }
    }
}

/// The scheduler-relevant syscall surface. Numbers match the original's values for the
/// operations that survive here; file-system-related calls (`open`, `read`, `exec`, …) are out of
/// scope and were dropped rather than renumbered around, so there are gaps. `Write` survives
/// despite the file system being out of scope because it is the only way user-space CLI programs
/// (`changeP`, `time`, `pinfo_tester`) can report anything; it is narrowed to the console sink
/// `println!`/`procdump` already use rather than a real per-fd file table (see `sysproc::sys_write`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syscall {
    Fork = 1,
    Exit = 2,
    Wait = 3,
    Kill = 6,
    Getpid = 11,
    Sbrk = 12,
    Sleep = 13,
    Uptime = 14,
    Write = 16,
    Yield = 22,
    Waitx = 23,
    SetPriority = 24,
    GetPinfo = 25,
}

impl TryFrom<usize> for Syscall {
    type Error = SyscallError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Syscall::Fork),
            2 => Ok(Syscall::Exit),
            3 => Ok(Syscall::Wait),
            6 => Ok(Syscall::Kill),
            11 => Ok(Syscall::Getpid),
            12 => Ok(Syscall::Sbrk),
            13 => Ok(Syscall::Sleep),
            14 => Ok(Syscall::Uptime),
            16 => Ok(Syscall::Write),
            22 => Ok(Syscall::Yield),
            23 => Ok(Syscall::Waitx),
            24 => Ok(Syscall::SetPriority),
            25 => Ok(Syscall::GetPinfo),
            _ => Err(SyscallError::Unknown(value)),
        }
    }
}

/// Typed view over a trapframe's argument registers.
pub struct SyscallArgs<'a> {
    trapframe: &'a TrapFrame,
}

impl<'a> SyscallArgs<'a> {
    fn new(trapframe: &'a TrapFrame) -> Self {
        Self { trapframe }
    }

    pub fn get_raw(&self, index: usize) -> usize {
        match index {
            0 => self.trapframe.a0,
            1 => self.trapframe.a1,
            2 => self.trapframe.a2,
            3 => self.trapframe.a3,
            4 => self.trapframe.a4,
            _ => panic!("invalid syscall argument index {index}"),
        }
    }

    pub fn get_int(&self, index: usize) -> isize {
        self.get_raw(index) as isize
    }
}

/// Dispatches the syscall numbered in `trapframe.a5` and writes the result into `trapframe.a0`.
/// The original places the syscall number in `a7`; with no full register file modeled, `a5` is
/// the dedicated syscall-number slot here (one past the last argument register).
pub fn syscall(trapframe: &mut TrapFrame) {
    let args = SyscallArgs::new(trapframe);

    #[cfg(debug_assertions)]
    println!("syscall {} dispatched", trapframe.a5);

    let result: Result<usize, SyscallError> = match Syscall::try_from(trapframe.a5) {
        Ok(Syscall::Fork) => sys_fork(&args),
        Ok(Syscall::Exit) => sys_exit(&args),
        Ok(Syscall::Wait) => sys_wait(&args),
        Ok(Syscall::Kill) => sys_kill(&args),
        Ok(Syscall::Getpid) => sys_getpid(&args),
        Ok(Syscall::Sbrk) => sys_sbrk(&args),
        Ok(Syscall::Sleep) => sys_sleep(&args),
        Ok(Syscall::Uptime) => sys_uptime(&args),
        Ok(Syscall::Write) => sys_write(&args),
        Ok(Syscall::Yield) => sys_yield(&args),
        Ok(Syscall::Waitx) => sys_waitx(&args),
        Ok(Syscall::SetPriority) => sys_set_priority(&args),
        Ok(Syscall::GetPinfo) => sys_getpinfo(&args),
        Err(e) => Err(e),
    };

    trapframe.a0 = result.unwrap_or(usize::MAX);

    #[cfg(debug_assertions)]
    println!("syscall {} -> {}", trapframe.a5, trapframe.a0);
}
