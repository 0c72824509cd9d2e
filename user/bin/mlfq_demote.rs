#![no_std]
#![no_main]

use core::hint::black_box;

use user::*;

const WORK: usize = 1_000_000;

fn spin() {
    let mut acc: usize = 0;
    for i in 0..WORK {
        acc = black_box(acc.wrapping_add(i));
    }
    black_box(acc);
}

/// Forks a single CPU-bound child and polls `getpinfo` while it runs. The per-level queue a
/// process sits at (it starts at level 0 and demotes every time it overruns its quantum) is only
/// observable in-kernel, not across this syscall boundary (see `kernel::sysproc::sys_getpinfo`),
/// so this only confirms the child keeps running rather than printing the queue it demoted to.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    let Ok(pid) = fork() else {
        exit_with_msg("mlfq_demote: fork failed");
    };

    if pid == 0 {
        spin();
        exit(0);
    }

    for _ in 0..5 {
        println!("pid {} live: {}", pid, getpinfo(pid));
        let _ = sleep(2);
    }

    match wait() {
        Ok(reaped) => println!("reaped {}", reaped),
        Err(e) => {
            eprintln!("mlfq_demote: {}", e);
            exit(1);
        }
    }
}
