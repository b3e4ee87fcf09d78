use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to defaults when nothing has been
/// initialized yet.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration from "config.toml" in the current
/// directory. If the file doesn't exist, uses in-memory defaults.
///
/// # Examples
/// ```no_run
/// use snaplink::config::init_config;
/// init_config().expect("invalid configuration");
/// ```
pub fn init_config() -> Result<()> {
    init_config_from(None)
}

/// Initialize the global configuration from an explicit TOML path
///
/// Only the first successful call has an effect. Invalid values are
/// reported instead of being replaced by defaults.
pub fn init_config_from(path: Option<&str>) -> Result<()> {
    if CONFIG.get().is_some() {
        return Ok(());
    }
    let config = StaticConfig::load_from(path)?;
    // 并发初始化时保留先写入的那份
    let _ = CONFIG.set(ArcSwap::from_pointee(config));
    Ok(())
}
