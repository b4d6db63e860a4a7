//! Rounded or chiseled window corners for a compositing window manager.
//!
//! The crate is host-agnostic: a compositor implements [`window::EffectWindow`]
//! and [`host::EffectsHost`], picks a [`host::CornerGpu`] (the wgpu one lives in
//! [`render`]), and calls [`effect::ShapeCorners::paint_window`] for every
//! window it draws.

pub mod coords;
pub mod config;
pub mod mask;
pub mod window;
pub mod classify;
pub mod host;
pub mod compositor;
pub mod effect;
pub mod shader;
pub mod render;
pub mod logging;

pub use effect::{ShapeCorners, CHAIN_POSITION};
