#![no_std]
#![no_main]

use user::*;

#[unsafe(no_mangle)]
fn main(args: Args) {
    if args.len() != 3 {
        exit_with_msg("usage: changeP priority pid");
    }

    let mut argv = args.args_as_str();

    let Some(priority) = argv.next().and_then(|s| s.parse::<usize>().ok()) else {
        exit_with_msg("changeP: invalid priority");
    };
    let Some(pid) = argv.next().and_then(|s| s.parse::<usize>().ok()) else {
        exit_with_msg("changeP: invalid pid");
    };

    match set_priority(priority, pid) {
        Ok(previous) => println!("pid {} priority {} -> {}", pid, previous, priority),
        Err(e) => {
            eprintln!("changeP: {}", e);
            exit(1);
        }
    }
}
