//! Shared GPU types for the corner program.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Size};

// ── blend ─────────────────────────────────────────────────────────────────

/// `(src_alpha, 1 - src_alpha)` for color; alpha accumulates over.
pub(super) fn corner_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── corner uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct CornerUniform {
    pub viewport: [f32; 2],
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl CornerUniform {
    pub(super) fn new(viewport: Size, dst: Rect) -> Self {
        Self {
            viewport: [viewport.width.max(1) as f32, viewport.height.max(1) as f32],
            origin: [dst.x as f32, dst.y as f32],
            size: [dst.width as f32, dst.height as f32],
            _pad: [0.0; 2],
        }
    }

    pub(super) fn min_binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<Self>() as u64)
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── scissor rect ──────────────────────────────────────────────────────────

/// Clamps a frame-pixel clip rect to the framebuffer.
///
/// Returns `None` if nothing is left (the draw must be skipped).
pub(super) fn clip_to_scissor(clip: Rect, frame: Size) -> Option<(u32, u32, u32, u32)> {
    let r = clip.intersect(Rect::new(0, 0, frame.width, frame.height))?;
    Some((r.x as u32, r.y as u32, r.width as u32, r.height as u32))
}

// ── background capture ────────────────────────────────────────────────────

/// Frame-to-scratch copy for a capture, in texels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) struct CaptureCopy {
    /// Top-left of the copied area in the frame.
    pub src: (u32, u32),
    /// Where that area lands in the scratch texture.
    pub dst: (u32, u32),
    pub width: u32,
    pub height: u32,
}

/// Clips a capture of `source` to the frame.
///
/// The scratch texture keeps the full `source` size; texels that fall outside
/// the frame are not copied. `None` if no texel of `source` is on the frame.
pub(super) fn capture_copy(source: Rect, frame: Size) -> Option<CaptureCopy> {
    if source.is_empty() {
        return None;
    }
    let visible = source.intersect(Rect::new(0, 0, frame.width, frame.height))?;
    Some(CaptureCopy {
        src: (visible.x as u32, visible.y as u32),
        dst: ((visible.x - source.x) as u32, (visible.y - source.y) as u32),
        width: visible.width as u32,
        height: visible.height as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_32_bytes() {
        assert_eq!(std::mem::size_of::<CornerUniform>(), 32);
        assert!(CornerUniform::min_binding_size().is_some());
    }

    #[test]
    fn uniform_places_quad() {
        let u = CornerUniform::new(Size::new(800, 600), Rect::new(10, 20, 12, 12));
        assert_eq!(u.viewport, [800.0, 600.0]);
        assert_eq!(u.origin, [10.0, 20.0]);
        assert_eq!(u.size, [12.0, 12.0]);
    }

    #[test]
    fn scissor_is_clamped_to_frame() {
        let frame = Size::new(100, 50);
        assert_eq!(clip_to_scissor(Rect::new(90, 40, 20, 20), frame), Some((90, 40, 10, 10)));
        assert_eq!(clip_to_scissor(Rect::new(-5, -5, 10, 10), frame), Some((0, 0, 5, 5)));
        assert_eq!(clip_to_scissor(Rect::new(100, 0, 10, 10), frame), None);
    }

    const FRAME: Size = Size::new(200, 100);

    #[test]
    fn capture_inside_frame_is_copied_whole() {
        let copy = capture_copy(Rect::new(20, 30, 10, 10), FRAME);
        assert_eq!(copy, Some(CaptureCopy { src: (20, 30), dst: (0, 0), width: 10, height: 10 }));
    }

    #[test]
    fn capture_past_left_edge_shifts_destination() {
        let copy = capture_copy(Rect::new(-4, 30, 10, 10), FRAME);
        assert_eq!(copy, Some(CaptureCopy { src: (0, 30), dst: (4, 0), width: 6, height: 10 }));
    }

    #[test]
    fn capture_past_top_edge_shifts_destination() {
        let copy = capture_copy(Rect::new(20, -7, 10, 10), FRAME);
        assert_eq!(copy, Some(CaptureCopy { src: (20, 0), dst: (0, 7), width: 10, height: 3 }));
    }

    #[test]
    fn capture_past_right_and_bottom_edges_is_truncated() {
        let right = capture_copy(Rect::new(195, 30, 10, 10), FRAME);
        assert_eq!(right, Some(CaptureCopy { src: (195, 30), dst: (0, 0), width: 5, height: 10 }));

        let bottom = capture_copy(Rect::new(20, 92, 10, 10), FRAME);
        assert_eq!(bottom, Some(CaptureCopy { src: (20, 92), dst: (0, 0), width: 10, height: 8 }));
    }

    #[test]
    fn capture_past_a_frame_corner_clips_both_axes() {
        let copy = capture_copy(Rect::new(-3, -2, 10, 10), FRAME);
        assert_eq!(copy, Some(CaptureCopy { src: (0, 0), dst: (3, 2), width: 7, height: 8 }));
    }

    #[test]
    fn capture_off_frame_or_empty_is_none() {
        assert_eq!(capture_copy(Rect::new(-10, 30, 10, 10), FRAME), None);
        assert_eq!(capture_copy(Rect::new(200, 30, 10, 10), FRAME), None);
        assert_eq!(capture_copy(Rect::new(20, 100, 10, 10), FRAME), None);
        assert_eq!(capture_copy(Rect::new(20, -10, 10, 10), FRAME), None);
        assert_eq!(capture_copy(Rect::new(20, 30, 0, 10), FRAME), None);
    }
}
