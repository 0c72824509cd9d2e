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

/// Forks two CPU-bound children back to back and reports the order they're reaped in. Under
/// FCFS the earlier-forked child runs to completion without preemption before the later one
/// accrues any time, so it should always be reaped first; under a preemptive policy the order
/// is not guaranteed.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    let Ok(first) = fork() else {
        exit_with_msg("fcfs_order: fork failed");
    };
    if first == 0 {
        spin();
        exit(0);
    }

    let Ok(second) = fork() else {
        exit_with_msg("fcfs_order: fork failed");
    };
    if second == 0 {
        spin();
        exit(0);
    }

    for _ in 0..2 {
        match wait() {
            Ok(pid) if pid == first => println!("first child ({}) reaped first", pid),
            Ok(pid) => println!("reaped {}", pid),
            Err(e) => {
                eprintln!("fcfs_order: {}", e);
                exit(1);
            }
        }
    }
}
