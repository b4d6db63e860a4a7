//! wgpu backend for the corner effect.
//!
//! Convention:
//! - Frame coordinates are device pixels (top-left origin, +Y down).
//! - The vertex shader converts to NDC using a viewport uniform.
//! - Scratch captures and masks are addressed top-down, like the frame.

mod common;
mod corners;
mod ctx;
mod pass;

pub use corners::{shader_version_for, CornerProgram, MaskTexture, WgpuCornerGpu};
pub use ctx::{RenderCtx, RenderTarget};
pub use pass::{CornerPass, ScratchTexture};
