#![no_std]
#![no_main]

use core::hint::black_box;

use user::*;

const SLEEP_TICKS: usize = 5;
const SPIN_WORK: usize = 500_000;

fn spin() {
    let mut acc: usize = 0;
    for i in 0..SPIN_WORK {
        acc = black_box(acc.wrapping_add(i));
    }
    black_box(acc);
}

/// Forks a child that sleeps for `SLEEP_TICKS` then spins, and reaps it with `waitx`. The exact
/// `rtime`/`wtime` split `waitx` computes is only visible to in-kernel callers (see
/// `kernel::sysproc::sys_waitx`); from here the only observable signal is the elapsed wall-clock
/// ticks, which should be at least `SLEEP_TICKS`.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    let start = uptime();

    let Ok(pid) = fork() else {
        exit_with_msg("waitx_demo: fork failed");
    };

    if pid == 0 {
        let _ = sleep(SLEEP_TICKS);
        spin();
        exit(0);
    }

    match waitx() {
        Ok(reaped) => println!("reaped {} after {} ticks", reaped, uptime() - start),
        Err(e) => {
            eprintln!("waitx_demo: {}", e);
            exit(1);
        }
    }
}
