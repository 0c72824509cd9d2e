/// maximum number of CPUs
pub const NCPU: usize = 8;
/// maximum number of processes
pub const NPROC: usize = 64;
/// open files per process
pub const NOFILE: usize = 16;
/// maximum debug process name length
pub const NAME_LEN: usize = 16;
/// kernel stack size per process, in bytes
#[cfg(debug_assertions)]
pub const KSTACK_SIZE: usize = 8 * 4096;
#[cfg(not(debug_assertions))]
pub const KSTACK_SIZE: usize = 4096;
/// default priority assigned to a freshly allocated process under PBS
pub const DEFAULT_PRIORITY: usize = 60;
/// lowest numeric priority value (highest importance)
pub const MIN_PRIORITY: usize = 0;
/// highest numeric priority value (lowest importance)
pub const MAX_PRIORITY: usize = 100;
/// number of MLFQ priority levels
pub const NMLFQ: usize = 5;
/// per-level time-slice limit, in ticks, index 0 is the highest-priority level
pub const QTICKS: [usize; NMLFQ] = [1, 2, 4, 8, 16];
/// ticks a process may wait before being aged one level toward 0
pub const MAXAGE: usize = 30;
/// capacity of each MLFQ ring queue
pub const MLFQ_QUEUE_CAP: usize = 100;
