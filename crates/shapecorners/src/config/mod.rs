//! Effect configuration.
//!
//! `kconfig` reads the on-disk key/value file; `state` turns one group of it into
//! a sanitized [`ConfigState`].

mod kconfig;
mod state;

pub use kconfig::{
    default_config_path, ConfigGroup, KConfig, KConfigGroup, CONFIG_FILE_NAME, GENERAL_GROUP,
};
pub use state::{
    ClassPatterns, ConfigState, CornerStyle, DEFAULT_RADIUS, DEFAULT_TYPE, KEY_BLACKLIST,
    KEY_FILTER_SHADOW, KEY_RADIUS, KEY_SQUARE_AT_SCREEN_EDGE, KEY_TYPE, KEY_WHITELIST, MAX_RADIUS,
};
