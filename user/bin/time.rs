#![no_std]
#![no_main]

use user::*;

/// `time <ticks>` forks a child that sleeps for `ticks` and reports the wall-clock ticks the
/// parent actually waited. There is no `exec` here to run an arbitrary command (exec-support is
/// out of scope for this core, see `bin/init.rs`), so the workload is the sleep itself; this is
/// still the same measurement `waitx` was meant to make from inside the kernel, just timed from
/// user space via `uptime()` since `rtime`/`wtime` don't cross the syscall boundary (see
/// `kernel::sysproc::sys_waitx`).
#[unsafe(no_mangle)]
fn main(args: Args) {
    if args.len() != 2 {
        exit_with_msg("usage: time ticks");
    }

    let Some(ticks) = args.args_as_str().next().and_then(|s| s.parse::<usize>().ok()) else {
        exit_with_msg("time: invalid ticks");
    };

    let start = uptime();

    let Ok(pid) = fork() else {
        exit_with_msg("time: fork failed");
    };

    if pid == 0 {
        let _ = sleep(ticks);
        exit(0);
    }

    match waitx() {
        Ok(_) => println!("elapsed {} ticks", uptime() - start),
        Err(e) => {
            eprintln!("time: {}", e);
            exit(1);
        }
    }
}
