#![no_std]
#![no_main]

use core::hint::black_box;

use user::*;

const WORK: usize = 200_000;

fn spin() {
    let mut acc: usize = 0;
    for i in 0..WORK {
        acc = black_box(acc.wrapping_add(i));
    }
    black_box(acc);
}

/// Forks three CPU-bound children and immediately assigns them priorities 10, 50, 90 (lower
/// numeric value is more important). Under PBS the lowest-priority-number child should finish
/// first with overwhelming probability.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    const PRIORITIES: [usize; 3] = [10, 50, 90];
    let mut pids = [0usize; 3];

    for (i, &priority) in PRIORITIES.iter().enumerate() {
        match fork() {
            Ok(0) => {
                spin();
                exit(0);
            }
            Ok(pid) => {
                pids[i] = pid;
                if set_priority(priority, pid).is_err() {
                    eprintln!("pbs_order: set_priority failed for {}", pid);
                }
            }
            Err(_) => exit_with_msg("pbs_order: fork failed"),
        }
    }

    for _ in 0..PRIORITIES.len() {
        match wait() {
            Ok(pid) => println!("reaped {}", pid),
            Err(e) => {
                eprintln!("pbs_order: {}", e);
                exit(1);
            }
        }
    }
}
