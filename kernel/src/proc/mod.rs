//! Process table, lifecycle operations, and the per-CPU scheduler loop.
//!
//! The table lock in the original design (one mutex guarding every PCB transition) is realized
//! here, as in the teacher kernel, as one `SpinLock<ProcInner>` per slot plus a single
//! `SpinLock<[Option<usize>; NPROC]>` for parent back-references — finer-grained than a single
//! giant mutex, but every transition this module performs still holds the owning slot's lock for
//! its whole duration, so the atomicity the original's single lock guaranteed is preserved.

mod mlfq;
mod policy;

extern crate alloc;

use core::cell::UnsafeCell;
use core::mem::{MaybeUninit, transmute};
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering};

use alloc::string::String;

use crate::error::KernelError;
use crate::file::File;
use crate::fs::Inode;
use crate::kalloc::KernelStack;
use crate::param::{NAME_LEN, NCPU, NMLFQ, NOFILE, NPROC};
use crate::println;
use crate::riscv::interrupts;
use crate::spinlock::{SpinLock, SpinLockGuard};
use crate::swtch::{Context, swtch};
use crate::sync::OnceLock;
use crate::trap;
use crate::vm::AddrSpace;

pub use policy::{ACTIVE, SchedulerPolicy};

pub static PROC_TABLE: ProcTable = ProcTable::new();
pub static CPU_TABLE: CpuTable = CpuTable::new();
pub static INIT_PROC: OnceLock<&'static Proc> = OnceLock::new();

/// Sleep/wakeup channel: an opaque key, conventionally a process table index or the address of
/// some kernel object (see `trap::uptime_channel`).
pub type Channel = usize;

/// A process identifier, distinct from the table index used internally to address a `Proc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pid(usize);

impl Pid {
    pub fn alloc() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        Pid(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_usize(self) -> usize {
        self.0
    }

    /// Builds a `Pid` from a raw value supplied across the syscall boundary (`kill(pid)`,
    /// `set_priority(new, pid)`, `getpinfo(stat*, pid)`), to compare against allocated pids.
    pub fn from_raw(value: usize) -> Self {
        Pid(value)
    }
}

/// Register slots the ABI layer reads and writes: syscall arguments/return value and the saved
/// program counter. Stands in for a real trap frame, which would also carry the full user
/// register file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrapFrame {
    pub a0: usize,
    pub a1: usize,
    pub a2: usize,
    pub a3: usize,
    pub a4: usize,
    pub a5: usize,
    pub epc: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcState {
    #[default]
    Unused,
    Embryo,
    Sleeping,
    Runnable,
    Running,
    Zombie,
}

/// Snapshot returned by `getpinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PInfo {
    pub pid: usize,
    pub runtime: usize,
    pub num_run: usize,
    pub current_queue: usize,
    pub time: [usize; NMLFQ],
}

/// Fields guarded by `Proc::inner`'s lock. Every PCB state transition happens with this held.
#[derive(Debug)]
pub struct ProcInner {
    pub state: ProcState,
    pub pid: Pid,
    pub channel: Option<Channel>,
    pub killed: bool,
    pub xstate: isize,

    pub start_time: usize,
    pub end_time: usize,
    pub run_time: usize,
    pub wait_queue_time: usize,

    pub priority: usize,
    pub queue: usize,
    pub cur_time: usize,
    pub num_run: usize,
    pub time: [usize; NMLFQ],
    /// `Some(level)` iff this process currently occupies a slot in the MLFQ ring queues, letting
    /// `enqueue` dedup in O(1) instead of scanning all five levels (see `proc/mlfq.rs`).
    pub queued_at: Option<usize>,
}

impl ProcInner {
    const fn new() -> Self {
        Self {
            state: ProcState::Unused,
            pid: Pid(0),
            channel: None,
            killed: false,
            xstate: 0,
            start_time: 0,
            end_time: 0,
            run_time: 0,
            wait_queue_time: 0,
            priority: crate::param::DEFAULT_PRIORITY,
            queue: 0,
            cur_time: 0,
            num_run: 0,
            time: [0; NMLFQ],
            queued_at: None,
        }
    }
}

/// Fields owned exclusively by whichever code currently has the right to touch this process:
/// the process itself when running, or the allocating/forking code before it is published as
/// runnable.
#[derive(Debug)]
pub struct ProcData {
    pub addr_space: AddrSpace,
    pub kstack: Option<KernelStack>,
    pub context: Context,
    pub trapframe: TrapFrame,
    pub open_files: [Option<File>; NOFILE],
    pub cwd: Option<Inode>,
    pub name: String,
}

impl ProcData {
    const fn new() -> Self {
        Self {
            addr_space: AddrSpace::new(),
            kstack: None,
            context: Context::new(),
            trapframe: TrapFrame {
                a0: 0,
                a1: 0,
                a2: 0,
                a3: 0,
                a4: 0,
                a5: 0,
                epc: 0,
            },
            open_files: [const { None }; NOFILE],
            cwd: None,
            name: String::new(),
        }
    }
}

pub struct Proc {
    /// Table index. Distinct from `Pid`: stable for the slot's lifetime, reused once reaped.
    pub id: usize,
    pub inner: SpinLock<ProcInner>,
    data: UnsafeCell<ProcData>,
}

impl Proc {
    const fn new(id: usize) -> Self {
        Self {
            id,
            inner: SpinLock::new(ProcInner::new(), "proc"),
            data: UnsafeCell::new(ProcData::new()),
        }
    }

    pub fn data(&self) -> &ProcData {
        unsafe { &*self.data.get() }
    }

    /// # Safety
    /// Caller must have exclusive access: either this is the current process, or its slot hasn't
    /// been published (state still `Embryo`) to any other CPU yet.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn data_mut(&self) -> &mut ProcData {
        unsafe { &mut *self.data.get() }
    }

    pub fn is_init_proc(&self) -> bool {
        INIT_PROC.get().is_some_and(|p| ptr::eq(*p, self))
    }

    pub fn is_killed(&self) -> bool {
        self.inner.lock().killed
    }

    /// Resets a reaped slot to `Unused`, dropping its owned resources.
    fn free(&self, mut inner: SpinLockGuard<'_, ProcInner>) {
        let data = unsafe { self.data_mut() };
        data.kstack = None;
        data.addr_space = AddrSpace::new();
        for f in data.open_files.iter_mut() {
            if let Some(file) = f.take() {
                file.close();
            }
        }
        data.cwd = None;
        data.name.clear();

        *inner = ProcInner::new();
    }
}

unsafe impl Sync for Proc {}
unsafe impl Sync for ProcData {}

pub struct ProcTable {
    table: [UnsafeCell<Proc>; NPROC],
    parents: SpinLock<[Option<usize>; NPROC]>,
}

impl ProcTable {
    const fn new() -> Self {
        let mut table: [MaybeUninit<UnsafeCell<Proc>>; NPROC] =
            unsafe { MaybeUninit::uninit().assume_init() };
        let mut i = 0;
        while i < NPROC {
            table[i] = MaybeUninit::new(UnsafeCell::new(Proc::new(i)));
            i += 1;
        }
        Self {
            table: unsafe { transmute_copy_table(table) },
            parents: SpinLock::new([None; NPROC], "parents"),
        }
    }

    pub fn get(&self, index: usize) -> &Proc {
        unsafe { &*self.table[index].get() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proc> {
        (0..NPROC).map(|i| self.get(i))
    }

    /// Scans for an `Unused` slot and promotes it to `Embryo`, allocating its kernel stack.
    pub fn alloc(&self) -> Result<(&Proc, SpinLockGuard<'_, ProcInner>), KernelError> {
        for proc in self.iter() {
            let mut inner = proc.inner.lock();
            if inner.state != ProcState::Unused {
                continue;
            }

            inner.pid = Pid::alloc();
            inner.state = ProcState::Embryo;
            inner.start_time = trap::uptime();
            inner.priority = crate::param::DEFAULT_PRIORITY;
            inner.queue = 0;
            inner.queued_at = None;

            let data = unsafe { proc.data_mut() };
            let stack = match KernelStack::alloc() {
                Some(stack) => stack,
                None => {
                    proc.free(inner);
                    return Err(KernelError::Alloc);
                }
            };
            data.context.zero();
            data.context.ra = fork_ret as *const () as usize;
            data.context.sp = stack.top();
            data.kstack = Some(stack);

            return Ok((proc, inner));
        }

        Err(KernelError::OutOfProc)
    }

    /// Lock-free best-effort process listing, tolerating torn reads, for keyboard-interrupt
    /// diagnostics.
    pub fn dump(&self) {
        println!();
        for proc in self.iter() {
            let inner = unsafe { proc.inner.get_mut_unchecked() };
            if inner.state == ProcState::Unused {
                continue;
            }
            println!(
                "{} {:?} queue={} prio={} {}",
                inner.pid.0,
                inner.state,
                inner.queue,
                inner.priority,
                proc.data().name,
            );
        }
    }
}

unsafe impl Sync for ProcTable {}

const fn transmute_copy_table(
    table: [MaybeUninit<UnsafeCell<Proc>>; NPROC],
) -> [UnsafeCell<Proc>; NPROC] {
    unsafe { transmute(table) }
}

/// Per-CPU scheduler state.
pub struct Cpu {
    pub proc: Option<&'static Proc>,
    pub context: Context,
    /// `push_off`/`pop_off` nesting depth, so a lock taken while already holding one doesn't
    /// re-enable interrupts on release.
    pub num_off: usize,
    /// Interrupt-enable state observed by the outermost `push_off`, restored once `num_off`
    /// returns to zero.
    pub interrupt_enabled: bool,
}

impl Cpu {
    const fn new() -> Self {
        Self {
            proc: None,
            context: Context::new(),
            num_off: 0,
            interrupt_enabled: false,
        }
    }
}

pub struct CpuTable([UnsafeCell<Cpu>; NCPU]);

impl CpuTable {
    const fn new() -> Self {
        let mut array: [MaybeUninit<UnsafeCell<Cpu>>; NCPU] =
            unsafe { MaybeUninit::uninit().assume_init() };
        let mut i = 0;
        while i < NCPU {
            array[i] = MaybeUninit::new(UnsafeCell::new(Cpu::new()));
            i += 1;
        }
        Self {
            0: unsafe { transmute(array) },
        }
    }
}

unsafe impl Sync for CpuTable {}

/// # Safety
/// Must be called with interrupts disabled; the returned reference is only valid until the next
/// time this hart's interrupts are re-enabled.
pub unsafe fn current_cpu() -> &'static mut Cpu {
    unsafe {
        let id = crate::riscv::registers::tp::read();
        &mut *CPU_TABLE.0[id].get()
    }
}

pub fn current_proc_opt() -> Option<&'static Proc> {
    let was_enabled = interrupts::get();
    interrupts::disable();
    let proc = unsafe { current_cpu() }.proc;
    if was_enabled {
        interrupts::enable();
    }
    proc
}

pub fn current_proc() -> &'static Proc {
    current_proc_opt().expect("no current proc")
}

fn current_proc_and_data_mut() -> (&'static Proc, &'static mut ProcData) {
    let proc = current_proc();
    (proc, unsafe { proc.data_mut() })
}

/// Sets up the first user process.
pub fn user_init() {
    let (proc, mut inner) = PROC_TABLE.alloc().expect("user_init allocproc");
    INIT_PROC.initialize(|| Ok::<_, ()>(proc));

    let data = unsafe { proc.data_mut() };
    data.cwd = Some(Inode::root());
    data.name = String::from("init");

    inner.state = ProcState::Runnable;
    policy::ACTIVE.on_runnable(proc.id, &mut inner);
}

/// Grows or shrinks the current process's address space by `n` bytes (negative shrinks).
pub fn grow(n: isize) -> Result<usize, KernelError> {
    let (_proc, data) = current_proc_and_data_mut();

    if n >= 0 {
        data.addr_space.grow(n as usize)?;
    } else {
        data.addr_space.shrink((-n) as usize)?;
    }

    Ok(data.addr_space.size())
}

/// Forks the current process, returning the child's pid to the parent.
pub fn fork() -> Result<Pid, KernelError> {
    let (proc, data) = current_proc_and_data_mut();

    let (new_proc, new_inner) = PROC_TABLE.alloc()?;
    let new_data = unsafe { new_proc.data_mut() };

    match data.addr_space.duplicate() {
        Ok(copy) => new_data.addr_space = copy,
        Err(e) => {
            new_proc.free(new_inner);
            return Err(e.into());
        }
    }

    new_data.trapframe = data.trapframe;
    new_data.trapframe.a0 = 0; // fork returns 0 in the child

    for (i, file) in data.open_files.iter().enumerate() {
        new_data.open_files[i] = file.as_ref().map(File::dup);
    }
    new_data.cwd = data.cwd.clone();
    new_data.name = data.name.clone();

    let pid = new_inner.pid;
    drop(new_inner);

    PROC_TABLE.parents.lock()[new_proc.id] = Some(proc.id);

    let mut new_inner = new_proc.inner.lock();
    new_inner.state = ProcState::Runnable;
    policy::ACTIVE.on_runnable(new_proc.id, &mut new_inner);

    Ok(pid)
}

/// Re-parents `original`'s children to `initproc`, waking it if any are already zombies.
fn reparent(original: &Proc, parents: &mut [Option<usize>; NPROC]) {
    let init_id = INIT_PROC.get().expect("no init proc").id;
    for slot in parents.iter_mut() {
        if *slot == Some(original.id) {
            *slot = Some(init_id);
            wakeup(init_id);
        }
    }
}

/// Terminates the current process. Never returns.
pub fn exit(status: isize) -> ! {
    let (proc, data) = current_proc_and_data_mut();
    assert!(!proc.is_init_proc(), "init exiting");

    for f in data.open_files.iter_mut() {
        if let Some(file) = f.take() {
            file.close();
        }
    }
    data.cwd = None;

    let mut parents = PROC_TABLE.parents.lock();
    reparent(proc, &mut parents);
    let parent_id = parents[proc.id].expect("exit with no parent");
    wakeup(parent_id);

    let mut inner = proc.inner.lock();
    inner.xstate = status;
    inner.end_time = trap::uptime();
    inner.state = ProcState::Zombie;

    drop(parents);

    let inner = sched(inner, &mut data.context);
    drop(inner);
    unreachable!("zombie process rescheduled");
}

/// Scans for a zombie child, reaps it, and returns its pid and exit status.
pub fn wait() -> Option<(Pid, isize)> {
    wait_inner(false).map(|(pid, status, _)| (pid, status))
}

/// Like `wait`, but also reports the reaped child's run time and wait time.
pub fn waitx() -> Option<(Pid, isize, usize, usize)> {
    wait_inner(true).map(|(pid, status, times)| {
        let (rtime, wtime) = times.unwrap_or((0, 0));
        (pid, status, rtime, wtime)
    })
}

fn wait_inner(want_times: bool) -> Option<(Pid, isize, Option<(usize, usize)>)> {
    let current = current_proc();
    let mut parents = PROC_TABLE.parents.lock();

    loop {
        let mut have_kids = false;

        for proc in PROC_TABLE.iter() {
            if parents[proc.id] != Some(current.id) {
                continue;
            }
            have_kids = true;

            let inner = proc.inner.lock();
            if inner.state == ProcState::Zombie {
                let pid = inner.pid;
                let status = inner.xstate;
                let times = want_times.then(|| {
                    let rtime = inner.run_time;
                    let wtime = inner
                        .end_time
                        .saturating_sub(inner.start_time)
                        .saturating_sub(rtime);
                    (rtime, wtime)
                });

                parents[proc.id] = None;
                proc.free(inner);

                return Some((pid, status, times));
            }
        }

        if !have_kids || current.inner.lock().killed {
            return None;
        }

        parents = sleep(current.id, parents);
    }
}

/// Per-CPU scheduler loop. Never returns.
///
/// # Safety
/// Must be called with interrupts disabled, once per hart, after this CPU's state is set up.
#[cfg(not(test))]
pub unsafe fn scheduler() -> ! {
    let cpu = unsafe { current_cpu() };
    cpu.proc = None;

    loop {
        interrupts::enable();
        interrupts::disable();

        if let Some(id) = policy::ACTIVE.pick_next() {
            let proc = PROC_TABLE.get(id);
            let inner = proc.inner.lock();
            if inner.state == ProcState::Runnable {
                let mut inner = inner;
                inner.state = ProcState::Running;
                inner.num_run += 1;
                inner.cur_time = 0;
                cpu.proc = Some(proc);

                // The lock stays held across the switch: `fork_ret` releases it for a process
                // running for the first time, and the `force_unlock` below releases it for one
                // that's called back in through `sched`.
                core::mem::forget(inner);
                unsafe { swtch(&mut cpu.context, &proc.data().context) };
                unsafe { proc.inner.force_unlock() };

                cpu.proc = None;
            }
        } else {
            unsafe { core::arch::asm!("wfi") };
        }
    }
}

/// Switches to the scheduler. Caller must hold only `proc_inner`'s lock, with state already
/// updated away from `Running`.
pub fn sched<'a>(
    proc_inner: SpinLockGuard<'a, ProcInner>,
    context: &mut Context,
) -> SpinLockGuard<'a, ProcInner> {
    assert_ne!(proc_inner.state, ProcState::Running, "sched: still running");
    assert!(!interrupts::get(), "sched: interruptible");

    let cpu = unsafe { current_cpu() };
    unsafe { swtch(context, &cpu.context) };

    proc_inner
}

/// Gives up the CPU for one scheduling round.
pub fn r#yield() {
    let (proc, data) = current_proc_and_data_mut();

    let mut inner = proc.inner.lock();
    inner.state = ProcState::Runnable;
    policy::ACTIVE.on_yield(proc.id, &mut inner);
    policy::ACTIVE.on_runnable(proc.id, &mut inner);

    let inner = sched(inner, &mut data.context);
    drop(inner);
}

/// Context-switch target for a freshly forked/allocated process.
///
/// # Safety
/// Never called directly; installed as `Context::ra` by `ProcTable::alloc`.
#[cfg(not(test))]
pub unsafe extern "C" fn fork_ret() -> ! {
    // Exec/user-return are out of scope for the core (see module docs); a real kernel would hand
    // off to `exec("/init")` and `usertrapret` here.
    unsafe { current_proc().inner.force_unlock() };
    loop {
        core::hint::spin_loop();
    }
}

/// Atomically releases `condition_lock` and sleeps on `channel`, reacquiring it on wake.
pub fn sleep<T>(channel: Channel, condition_lock: SpinLockGuard<'_, T>) -> SpinLockGuard<'_, T> {
    let proc = current_proc();
    let condition_mutex;
    {
        let mut inner = proc.inner.lock();
        condition_mutex = SpinLock::unlock(condition_lock);

        inner.channel = Some(channel);
        inner.state = ProcState::Sleeping;

        let data = unsafe { proc.data_mut() };
        let mut inner = sched(inner, &mut data.context);
        inner.channel = None;
    }
    condition_mutex.lock()
}

/// Wakes every process sleeping on `channel`. Must be called without holding any proc lock.
pub fn wakeup(channel: Channel) {
    let current = current_proc_opt();

    for proc in PROC_TABLE.iter() {
        if current.is_some_and(|p| ptr::eq(p, proc)) {
            continue;
        }

        let mut inner = proc.inner.lock();
        if inner.state == ProcState::Sleeping && inner.channel == Some(channel) {
            inner.state = ProcState::Runnable;
            policy::ACTIVE.on_runnable(proc.id, &mut inner);
        }
    }
}

/// Flags the process `pid` for termination, waking it if sleeping.
pub fn kill(pid: Pid) -> bool {
    for proc in PROC_TABLE.iter() {
        let mut inner = proc.inner.lock();
        if inner.pid == pid {
            inner.killed = true;
            if inner.state == ProcState::Sleeping {
                inner.state = ProcState::Runnable;
                policy::ACTIVE.on_runnable(proc.id, &mut inner);
            }
            return true;
        }
    }
    false
}

/// Installs `new` as the priority of `pid`, returning the previous value, or `-1` if unknown.
///
/// If `pid` is the process currently running on this hart and the new priority is no longer
/// strictly better than some already-runnable peer, yields immediately: under PBS a process that
/// lowers its own priority below a runnable peer must not keep running uninterrupted until its
/// next tick, the same `higherPriority` check the original `set_priority` path performs.
pub fn set_priority(new: usize, pid: Pid) -> isize {
    let current = current_proc_opt();
    let mut previous = -1isize;
    let mut lowered_current = false;

    for proc in PROC_TABLE.iter() {
        let mut inner = proc.inner.lock();
        if inner.pid == pid {
            previous = inner.priority as isize;
            inner.priority = new;
            lowered_current = inner.state == ProcState::Running
                && current.is_some_and(|cur| ptr::eq(cur, proc));
            break;
        }
    }

    if previous >= 0 && lowered_current && runnable_with_better_priority_exists(new) {
        r#yield();
    }

    previous
}

/// Whether some runnable process has a strictly better (lower-numbered) priority than `priority`.
fn runnable_with_better_priority_exists(priority: usize) -> bool {
    for proc in PROC_TABLE.iter() {
        let inner = proc.inner.lock();
        if inner.state == ProcState::Runnable && inner.priority < priority {
            return true;
        }
    }
    false
}

/// Snapshots scheduling stats for `pid`.
pub fn getpinfo(pid: Pid) -> Option<PInfo> {
    for proc in PROC_TABLE.iter() {
        let inner = proc.inner.lock();
        if inner.pid == pid {
            return Some(PInfo {
                pid: inner.pid.as_usize(),
                runtime: inner.run_time,
                num_run: inner.num_run,
                current_queue: inner.queue,
                time: inner.time,
            });
        }
    }
    None
}

/// Timer-tick bookkeeping: advances run/wait counters for every process and lets the active
/// policy perform any extra accounting (MLFQ aging, quantum expiry). Returns whether the
/// currently running process should be preempted this tick.
pub fn on_tick() -> bool {
    for (i, proc) in PROC_TABLE.iter().enumerate() {
        let mut inner = proc.inner.lock();
        match inner.state {
            ProcState::Running => inner.run_time += 1,
            ProcState::Unused | ProcState::Zombie => {}
            _ => inner.wait_queue_time += 1,
        }
        policy::ACTIVE.on_tick(i, &mut inner);
    }
    policy::ACTIVE.preempt_on_tick()
}

pub fn procdump() {
    PROC_TABLE.dump();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reset_table() {
        for proc in PROC_TABLE.iter() {
            let mut inner = proc.inner.lock();
            *inner = ProcInner::new();
        }
        *PROC_TABLE.parents.lock() = [None; NPROC];
    }

    #[test]
    fn alloc_assigns_unique_pids_and_embryo_state() {
        reset_table();
        let (p1, inner1) = PROC_TABLE.alloc().unwrap();
        let pid1 = inner1.pid;
        assert_eq!(inner1.state, ProcState::Embryo);
        drop(inner1);

        let (p2, inner2) = PROC_TABLE.alloc().unwrap();
        assert_ne!(pid1, inner2.pid);
        assert_ne!(p1.id, p2.id);
    }

    #[test]
    fn set_priority_returns_previous_value() {
        reset_table();
        let (proc, mut inner) = PROC_TABLE.alloc().unwrap();
        inner.state = ProcState::Runnable;
        let pid = inner.pid;
        drop(inner);

        let previous = set_priority(10, pid);
        assert_eq!(previous as usize, crate::param::DEFAULT_PRIORITY);
        assert_eq!(getpinfo(pid).unwrap().current_queue, 0);

        let _ = proc; // keep slot alive for the duration of the assertions
    }

    #[test]
    fn getpinfo_reports_unknown_pid_as_none() {
        reset_table();
        assert!(getpinfo(Pid::alloc()).is_none());
    }

    #[test]
    fn kill_unknown_pid_returns_false() {
        reset_table();
        assert!(!kill(Pid::alloc()));
    }

    #[test]
    fn waitx_reports_reaped_child_run_and_wait_time() {
        reset_table();
        let (parent, parent_inner) = PROC_TABLE.alloc().unwrap();
        drop(parent_inner);

        let (child, mut child_inner) = PROC_TABLE.alloc().unwrap();
        let child_pid = child_inner.pid;
        child_inner.state = ProcState::Zombie;
        child_inner.xstate = 7;
        child_inner.start_time = 0;
        child_inner.run_time = 4;
        child_inner.end_time = 10;
        drop(child_inner);
        PROC_TABLE.parents.lock()[child.id] = Some(parent.id);

        let cpu = unsafe { current_cpu() };
        cpu.proc = Some(parent);
        let result = waitx();
        cpu.proc = None;

        let (pid, status, rtime, wtime) = result.expect("zombie child should be reaped");
        assert_eq!(pid, child_pid);
        assert_eq!(status, 7);
        assert_eq!(rtime, 4);
        assert_eq!(wtime, 6);
    }
}
