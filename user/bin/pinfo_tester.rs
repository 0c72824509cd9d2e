#![no_std]
#![no_main]

use user::*;

/// Checks whether `pid` is currently known to the process table.
///
/// The syscall boundary only reports a hit/miss sentinel (see `kernel::sysproc::sys_getpinfo`);
/// the full `PInfo` snapshot it would otherwise copy out (runtime, queue, per-level ticks) has
/// no destination without a real MMU, so it stays an in-kernel-only API.
#[unsafe(no_mangle)]
fn main(args: Args) {
    if args.len() != 2 {
        exit_with_msg("usage: pinfo_tester pid");
    }

    let Some(pid) = args.args_as_str().next().and_then(|s| s.parse::<usize>().ok()) else {
        exit_with_msg("pinfo_tester: invalid pid");
    };

    if getpinfo(pid) {
        println!("pid {} is live", pid);
    } else {
        println!("pid {} not found", pid);
    }
}
