//! Integer geometry shared by the effect core and the GPU backend.
//!
//! Canonical space:
//! - Device pixels of the virtual screen
//! - Origin top-left
//! - +X right, +Y down

mod corner_radii;
mod point;
mod rect;
mod region;

pub use corner_radii::{Corner, CornerRadius};
pub use point::{Point, Size};
pub use rect::Rect;
pub use region::Region;
