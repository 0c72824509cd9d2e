#![no_std]
#![no_main]

use core::hint::black_box;

use user::*;

const CHILDREN: usize = 8;
const WORK: usize = 50_000;

fn spin() {
    let mut acc: usize = 0;
    for i in 0..WORK {
        acc = black_box(acc.wrapping_add(i));
    }
    black_box(acc);
}

/// Forks `CHILDREN` CPU-bound children and reaps all of them, printing each pid as it's
/// reaped. Under round-robin every child gets a turn before any repeats, so none of them should
/// starve the others; the absence of a starved straggler is the property this demonstrates.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    for _ in 0..CHILDREN {
        match fork() {
            Ok(0) => {
                spin();
                exit(0);
            }
            Ok(_) => {}
            Err(_) => exit_with_msg("rr_fair: fork failed"),
        }
    }

    for _ in 0..CHILDREN {
        match wait() {
            Ok(pid) => println!("reaped {}", pid),
            Err(e) => {
                eprintln!("rr_fair: {}", e);
                exit(1);
            }
        }
    }
}
