#![no_std]
#![no_main]

use core::hint::black_box;

use user::*;

const LONG_WORK: usize = 2_000_000;
const SHORT_JOBS: usize = 6;
const SHORT_WORK: usize = 10_000;

fn spin(work: usize) {
    let mut acc: usize = 0;
    for i in 0..work {
        acc = black_box(acc.wrapping_add(i));
    }
    black_box(acc);
}

/// Forks one long CPU-bound child (which demotes to a deep queue level) followed by several
/// short jobs that repeatedly occupy level 0. The long job's `wait_queue_time` should eventually
/// exceed `maxage` and get promoted back toward level 0; like `mlfq_demote`, the queue level
/// itself isn't observable from user space, so this only confirms the long job is still alive
/// and eventually gets reaped alongside the short jobs rather than starving.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    let Ok(long_pid) = fork() else {
        exit_with_msg("mlfq_aging: fork failed");
    };
    if long_pid == 0 {
        spin(LONG_WORK);
        exit(0);
    }

    for _ in 0..SHORT_JOBS {
        match fork() {
            Ok(0) => {
                spin(SHORT_WORK);
                exit(0);
            }
            Ok(_) => {}
            Err(_) => exit_with_msg("mlfq_aging: fork failed"),
        }
    }

    for _ in 0..(SHORT_JOBS + 1) {
        match wait() {
            Ok(pid) if pid == long_pid => println!("long job {} reaped", pid),
            Ok(pid) => println!("reaped {}", pid),
            Err(e) => {
                eprintln!("mlfq_aging: {}", e);
                exit(1);
            }
        }
    }
}
