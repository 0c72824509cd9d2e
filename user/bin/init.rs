#![no_std]
#![no_main]

use user::*;

/// Exec-support is out of scope for this core: there is no loader to replace a process's image
/// with a different binary, so init cannot fork-and-exec a shell the way the original does.
/// Its job reduces to what it would still be doing underneath a shell anyway: reap orphaned
/// children as they're re-parented here by `exit`.
#[unsafe(no_mangle)]
fn main(_args: Args) {
    loop {
        let _ = wait();
        r#yield();
    }
}
