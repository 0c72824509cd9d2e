//! Scheduler-facing syscall bodies.
//!
//! Out of scope in their original form: `waitx`/`getpinfo` report through out-pointers in user
//! memory. With no copyout primitive modeled (see `syscall.rs`), the syscall wrappers here return
//! only the hit/miss sentinel the original ABI table documents; the full `PInfo`/timing data is
//! available to in-kernel callers (tests, `procdump`, the `user/bin` integration harness) via
//! `proc::getpinfo`/`proc::waitx` directly.

use crate::console::CONSOLE;
use crate::proc::{self, Pid};
use crate::syscall::{SyscallArgs, SyscallError};
use crate::trap;

pub fn sys_exit(args: &SyscallArgs) -> ! {
    proc::exit(args.get_int(0))
}

pub fn sys_getpid(_args: &SyscallArgs) -> Result<usize, SyscallError> {
    Ok(proc::current_proc().inner.lock().pid.as_usize())
}

pub fn sys_fork(_args: &SyscallArgs) -> Result<usize, SyscallError> {
    proc::fork()
        .map(Pid::as_usize)
        .map_err(|_| SyscallError::Proc("sys_fork"))
}

pub fn sys_wait(_args: &SyscallArgs) -> Result<usize, SyscallError> {
    proc::wait()
        .map(|(pid, _status)| pid.as_usize())
        .ok_or(SyscallError::Proc("sys_wait: no children"))
}

pub fn sys_waitx(_args: &SyscallArgs) -> Result<usize, SyscallError> {
    proc::waitx()
        .map(|(pid, _status, _rtime, _wtime)| pid.as_usize())
        .ok_or(SyscallError::Proc("sys_waitx: no children"))
}

pub fn sys_sbrk(args: &SyscallArgs) -> Result<usize, SyscallError> {
    let n = args.get_int(0);
    let previous = proc::current_proc().data().addr_space.size();
    proc::grow(n).map_err(|_| SyscallError::Proc("sys_sbrk"))?;
    Ok(previous)
}

pub fn sys_sleep(args: &SyscallArgs) -> Result<usize, SyscallError> {
    let duration = args.get_int(0).max(0) as usize;

    let mut ticks = trap::TICKS.lock();
    let start = *ticks;

    while *ticks - start < duration {
        if proc::current_proc().is_killed() {
            return Err(SyscallError::Proc("sys_sleep: killed"));
        }
        ticks = proc::sleep(trap::uptime_channel(), ticks);
    }

    Ok(0)
}

/// Writes `len` bytes starting at `ptr` to the console, for fds 1 (stdout) and 2 (stderr) only.
/// There is no per-fd file table here (see `file.rs`); this exists solely so the user-space CLI
/// programs can report what they observe. With no MMU modeled, `ptr` is read directly rather than
/// copied in through a page table, the same simplification `grow`/`fork` make for the address
/// space elsewhere.
///
/// # Safety
/// Valid only because user and kernel share one flat address space in this core; a real kernel
/// would never dereference a user-supplied pointer this way.
pub fn sys_write(args: &SyscallArgs) -> Result<usize, SyscallError> {
    let fd = args.get_raw(0);
    if fd != 1 && fd != 2 {
        return Err(SyscallError::InvalidArgument("sys_write: bad fd"));
    }

    let ptr = args.get_raw(1) as *const u8;
    let len = args.get_raw(2);
    let bytes = unsafe { core::slice::from_raw_parts(ptr, len) };

    let mut console = CONSOLE.lock();
    for &b in bytes {
        console.putc(b);
    }
    Ok(len)
}

pub fn sys_kill(args: &SyscallArgs) -> Result<usize, SyscallError> {
    let pid = Pid::from_raw(args.get_int(0).max(0) as usize);
    Ok(proc::kill(pid) as usize)
}

pub fn sys_uptime(_args: &SyscallArgs) -> Result<usize, SyscallError> {
    Ok(trap::uptime())
}

pub fn sys_yield(_args: &SyscallArgs) -> Result<usize, SyscallError> {
    proc::r#yield();
    Ok(0)
}

pub fn sys_set_priority(args: &SyscallArgs) -> Result<usize, SyscallError> {
    let new = args.get_int(0).max(0) as usize;
    let pid = Pid::from_raw(args.get_int(1).max(0) as usize);
    let previous = proc::set_priority(new, pid);
    if previous < 0 {
        Err(SyscallError::InvalidArgument("set_priority: unknown pid"))
    } else {
        Ok(previous as usize)
    }
}

pub fn sys_getpinfo(args: &SyscallArgs) -> Result<usize, SyscallError> {
    let pid = Pid::from_raw(args.get_int(0).max(0) as usize);
    Ok(proc::getpinfo(pid).is_some() as usize)
}
