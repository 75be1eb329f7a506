//! Process-wide logger setup.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Install the message-only logger. `RUST_LOG` overrides the default level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = Builder::from_env(Env::default().filter_or("RUST_LOG", default))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}

pub fn init_test_logger() {
    let _ = Builder::new()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .try_init();
}
