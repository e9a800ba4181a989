//! Logging backend setup
//!
//! Library code logs through the `log` facade. On macOS records go to the
//! Unified Logging System under `APP_SUBSYSTEM`; elsewhere they go to stderr.

use anyhow::Result;
use log::LevelFilter;

/// Level used for the verbosity flags; `verbose` wins over `quiet`
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}

/// Install the platform logger
#[cfg(target_os = "macos")]
pub fn init(level: LevelFilter) -> Result<()> {
    use tccinspect::constants::APP_SUBSYSTEM;
    use oslog::OsLogger;

    let logger = OsLogger::new(APP_SUBSYSTEM);
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;
    log::set_max_level(level);
    Ok(())
}

/// Install the platform logger
#[cfg(not(target_os = "macos"))]
pub fn init(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(false, false), LevelFilter::Warn);
        assert_eq!(level_for(true, false), LevelFilter::Debug);
        assert_eq!(level_for(false, true), LevelFilter::Error);
        assert_eq!(level_for(true, true), LevelFilter::Debug);
    }
}
