//! Scheduling policy dispatch.
//!
//! The original selects one of four scheduling disciplines with a compile-time `#ifdef`. This
//! keeps that compile-time-only contract but expresses it as a `SchedulerPolicy` trait with a
//! single dispatch point, selected by Cargo feature instead of preprocessor macro, per the
//! teacher's own preference for trait objects over conditional compilation sprinkled through the
//! scheduler body (see `proc.rs`'s `SchedulerPolicy`-free but trait-heavy style elsewhere).
//!
//! Exactly one of `sched-rr`/`sched-fcfs`/`sched-pbs`/`sched-mlfq` is meant to be enabled; if more
//! than one is (Cargo features are additive, so `default-features` must be turned off to pick a
//! non-RR policy), precedence is mlfq > pbs > fcfs > rr, enforced by the nested `cfg` chain below.

use super::mlfq;
use super::{PROC_TABLE, ProcState};
use crate::param::{MAXAGE, NMLFQ, QTICKS};

pub trait SchedulerPolicy {
    /// Selects the next process table index to run, if any is runnable.
    fn pick_next(&self) -> Option<usize>;

    /// Whether a timer tick should force the current process to yield. `false` only for FCFS.
    fn preempt_on_tick(&self) -> bool {
        true
    }

    /// Called once per tick, under each process's own lock, after the common runTime/
    /// wait_queue_time bookkeeping in `update_proc_time`. Policies that need extra per-tick state
    /// (MLFQ's per-level ticks, aging, quantum expiry) hook in here.
    fn on_tick(&self, _id: usize, _inner: &mut super::ProcInner) {}

    /// Called when a process becomes runnable (fork, wakeup, allocation, or a voluntary yield
    /// lands it back as RUNNABLE), so a queue-based policy can (re)enqueue it. No-op for
    /// scan-based policies.
    fn on_runnable(&self, _id: usize, _inner: &mut super::ProcInner) {}

    /// Called from the `yield` syscall path specifically, before `on_runnable`. MLFQ
    /// unconditionally demotes here regardless of whether the time slice actually expired,
    /// preserving the original's documented ambiguity between voluntary and involuntary yields
    /// (see DESIGN.md).
    fn on_yield(&self, _id: usize, _inner: &mut super::ProcInner) {}

    fn name(&self) -> &'static str;
}

pub struct RoundRobin;

impl SchedulerPolicy for RoundRobin {
    fn pick_next(&self) -> Option<usize> {
        // A plain forward scan. Table-order scanning across the scheduler's own perpetual outer
        // loop already gives every runnable process a turn before repeating, as in the original.
        for (i, proc) in PROC_TABLE.iter().enumerate() {
            if proc.inner.lock().state == ProcState::Runnable {
                return Some(i);
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "round-robin"
    }
}

pub struct Fcfs;

impl SchedulerPolicy for Fcfs {
    fn pick_next(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None; // (start_time, index)
        for (i, proc) in PROC_TABLE.iter().enumerate() {
            let inner = proc.inner.lock();
            if inner.state != ProcState::Runnable {
                continue;
            }
            match best {
                Some((t, _)) if inner.start_time >= t => {}
                _ => best = Some((inner.start_time, i)),
            }
        }
        best.map(|(_, i)| i)
    }

    fn preempt_on_tick(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "fcfs"
    }
}

pub struct Pbs;

impl SchedulerPolicy for Pbs {
    fn pick_next(&self) -> Option<usize> {
        // Preserves the original's documented ambiguity: ties are broken by table order, and the
        // same minimal-priority process is re-selected on every call until it stops being
        // runnable, rather than rotating among equal-priority peers. See DESIGN.md.
        let mut best: Option<(usize, usize)> = None; // (priority, index)
        for (i, proc) in PROC_TABLE.iter().enumerate() {
            let inner = proc.inner.lock();
            if inner.state != ProcState::Runnable {
                continue;
            }
            match best {
                Some((p, _)) if inner.priority >= p => {}
                _ => best = Some((inner.priority, i)),
            }
        }
        best.map(|(_, i)| i)
    }

    fn name(&self) -> &'static str {
        "pbs"
    }
}

pub struct Mlfq;

impl SchedulerPolicy for Mlfq {
    fn pick_next(&self) -> Option<usize> {
        for level in 0..NMLFQ {
            let size = mlfq::QUEUES.len(level);
            for _ in 0..size {
                match mlfq::QUEUES.peek(level) {
                    Some(id) => {
                        let runnable = PROC_TABLE.get(id).inner.lock().state == ProcState::Runnable;
                        if runnable {
                            mlfq::QUEUES.dequeue(level);
                            return Some(id);
                        }
                        mlfq::QUEUES.rotate(level);
                    }
                    None => break,
                }
            }
        }

        // Every queue was empty or held nothing runnable; sweep in any unqueued runnable
        // processes and try exactly once more.
        if requeue_unqueued_runnable() {
            for level in 0..NMLFQ {
                if let Some(id) = mlfq::QUEUES.peek(level) {
                    if PROC_TABLE.get(id).inner.lock().state == ProcState::Runnable {
                        mlfq::QUEUES.dequeue(level);
                        return Some(id);
                    }
                }
            }
        }

        None
    }

    fn on_tick(&self, id: usize, inner: &mut super::ProcInner) {
        match inner.state {
            ProcState::Running => {
                inner.time[inner.queue] += 1;
                inner.cur_time += 1;
                if inner.cur_time > QTICKS[inner.queue] {
                    // Quantum expired: demote. The process isn't queued right now (it's
                    // running), so it is picked up by `requeue_unqueued_runnable` next time it's
                    // rescheduled runnable.
                    inner.queue = (inner.queue + 1).min(NMLFQ - 1);
                    inner.cur_time = 0;
                    inner.queued_at = None;
                }
            }
            _ => {
                if inner.queue > 0 && inner.wait_queue_time > MAXAGE {
                    let from = inner.queue;
                    let to = inner.queue - 1;
                    if inner.queued_at == Some(from) && mlfq::QUEUES.reinsert(from, to, id) {
                        inner.queued_at = Some(to);
                    }
                    inner.queue = to;
                    inner.wait_queue_time = 0;
                    inner.cur_time = 0;
                }
            }
        }
    }

    fn on_runnable(&self, id: usize, inner: &mut super::ProcInner) {
        if inner.queued_at.is_none() && mlfq::QUEUES.enqueue(inner.queue, id) {
            inner.queued_at = Some(inner.queue);
        }
    }

    fn on_yield(&self, _id: usize, inner: &mut super::ProcInner) {
        inner.queue = (inner.queue + 1).min(NMLFQ - 1);
        inner.cur_time = 0;
        inner.queued_at = None;
    }

    fn name(&self) -> &'static str {
        "mlfq"
    }
}

/// Enqueues any RUNNABLE process the ring queues have lost track of into level 0, the MLFQ
/// equivalent of the original's "if nothing found, sweep unqueued runnable procs in".
fn requeue_unqueued_runnable() -> bool {
    let mut moved = false;
    for (i, proc) in PROC_TABLE.iter().enumerate() {
        let mut inner = proc.inner.lock();
        if inner.state == ProcState::Runnable && inner.queued_at.is_none() {
            if mlfq::QUEUES.enqueue(0, i) {
                inner.queue = 0;
                inner.queued_at = Some(0);
                moved = true;
            }
        }
    }
    moved
}

#[cfg(feature = "sched-mlfq")]
pub static ACTIVE: Mlfq = Mlfq;
#[cfg(all(feature = "sched-pbs", not(feature = "sched-mlfq")))]
pub static ACTIVE: Pbs = Pbs;
#[cfg(all(
    feature = "sched-fcfs",
    not(any(feature = "sched-mlfq", feature = "sched-pbs"))
))]
pub static ACTIVE: Fcfs = Fcfs;
#[cfg(not(any(
    feature = "sched-mlfq",
    feature = "sched-pbs",
    feature = "sched-fcfs"
)))]
pub static ACTIVE: RoundRobin = RoundRobin;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::{MAXAGE, NPROC};

    /// Every policy struct (`RoundRobin`, `Fcfs`, `Pbs`, `Mlfq`) is usable directly regardless of
    /// which `sched-*` feature is active, since only `ACTIVE` is feature-gated; tests exercise all
    /// four against the shared `PROC_TABLE` the same way `scheduler()` would.
    fn reset_table() {
        for proc in PROC_TABLE.iter() {
            let mut inner = proc.inner.lock();
            *inner = super::super::ProcInner::new();
        }
        *PROC_TABLE.parents.lock() = [None; NPROC];
        for level in 0..NMLFQ {
            while mlfq::QUEUES.dequeue(level).is_some() {}
        }
    }

    fn spawn_runnable() -> usize {
        let (proc, mut inner) = PROC_TABLE.alloc().unwrap();
        inner.state = ProcState::Runnable;
        proc.id
    }

    #[test]
    fn round_robin_cycles_through_every_runnable_before_repeating() {
        reset_table();
        let ids = [spawn_runnable(), spawn_runnable(), spawn_runnable()];
        let rr = RoundRobin;

        let first = rr.pick_next().expect("a runnable proc");
        PROC_TABLE.get(first).inner.lock().state = ProcState::Running;
        let second = rr.pick_next().expect("a runnable proc");
        assert_ne!(first, second);
        PROC_TABLE.get(second).inner.lock().state = ProcState::Running;
        let third = rr.pick_next().expect("a runnable proc");
        assert_ne!(third, first);
        assert_ne!(third, second);
        assert!(ids.contains(&first) && ids.contains(&second) && ids.contains(&third));

        PROC_TABLE.get(third).inner.lock().state = ProcState::Running;
        assert!(
            rr.pick_next().is_none(),
            "every runnable proc has already had a turn"
        );
    }

    #[test]
    fn fcfs_picks_earliest_start_time_and_never_preempts_on_tick() {
        reset_table();
        let a = spawn_runnable();
        let b = spawn_runnable();
        let c = spawn_runnable();

        PROC_TABLE.get(a).inner.lock().start_time = 30;
        PROC_TABLE.get(b).inner.lock().start_time = 10;
        PROC_TABLE.get(c).inner.lock().start_time = 20;

        let fcfs = Fcfs;
        assert_eq!(fcfs.pick_next(), Some(b));
        assert!(!fcfs.preempt_on_tick());
    }

    #[test]
    fn pbs_picks_lowest_priority_number_breaking_ties_by_table_order() {
        reset_table();
        let a = spawn_runnable();
        let b = spawn_runnable();
        let c = spawn_runnable();

        PROC_TABLE.get(a).inner.lock().priority = 50;
        PROC_TABLE.get(b).inner.lock().priority = 10;
        PROC_TABLE.get(c).inner.lock().priority = 10;

        let pbs = Pbs;
        assert_eq!(pbs.pick_next(), Some(b), "tie between b and c goes to b");
    }

    #[test]
    fn mlfq_demotes_after_quantum_expires_while_running() {
        reset_table();
        let id = spawn_runnable();
        let mlfq = Mlfq;

        {
            let mut inner = PROC_TABLE.get(id).inner.lock();
            inner.state = ProcState::Running;
            inner.queue = 0;
            inner.cur_time = 0;
        }

        for _ in 0..(QTICKS[0] + 1) {
            let mut inner = PROC_TABLE.get(id).inner.lock();
            mlfq.on_tick(id, &mut inner);
        }

        assert_eq!(PROC_TABLE.get(id).inner.lock().queue, 1);
    }

    #[test]
    fn mlfq_ages_runnable_process_toward_level_zero_after_maxage() {
        reset_table();
        let id = spawn_runnable();
        let mlfq = Mlfq;

        {
            let mut inner = PROC_TABLE.get(id).inner.lock();
            inner.state = ProcState::Runnable;
            inner.queue = 2;
            inner.queued_at = Some(2);
            inner.wait_queue_time = 0;
        }
        assert!(mlfq::QUEUES.enqueue(2, id));

        for _ in 0..=MAXAGE {
            let mut inner = PROC_TABLE.get(id).inner.lock();
            inner.wait_queue_time += 1;
            mlfq.on_tick(id, &mut inner);
        }

        let inner = PROC_TABLE.get(id).inner.lock();
        assert_eq!(inner.queue, 1);
        assert_eq!(inner.queued_at, Some(1));
    }
}
