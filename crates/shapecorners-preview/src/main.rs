//! Runs the corner effect over a fake desktop.
//!
//! The config file is the same one the effect reads everywhere
//! (`$XDG_CONFIG_HOME/shapecornersrc`, group `[General]`); edit it and press R.

mod app;
mod desk;
mod gpu;
mod host;
mod quads;

use shapecorners::logging::{init_logging, LoggingConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());
    app::run(app::PreviewConfig::default())
}
