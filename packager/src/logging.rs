//! Logger initialisation for the binaries.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger.
///
/// `default_level` applies unless `RUST_LOG` is set. Calling this twice
/// leaves the first logger in place.
pub fn init(default_level: LevelFilter) {
    let env = Env::default().default_filter_or(default_level.as_str());
    if Builder::from_env(env)
        .format_timestamp(None)
        .try_init()
        .is_err()
    {
        log::debug!("logger already initialised");
    }
}
