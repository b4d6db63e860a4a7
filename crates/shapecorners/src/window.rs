//! Host window capabilities and per-call paint data.

use crate::coords::Rect;

/// Introspection the effect needs from a host-owned window.
///
/// The effect never assumes a concrete window type; hosts implement this for
/// whatever they manage.
pub trait EffectWindow {
    /// Frame geometry on the virtual screen, excluding shadows.
    fn geometry(&self) -> Rect;

    /// Window class identifier (e.g. `"navigator firefox"`).
    fn window_class(&self) -> &str;

    fn is_normal_window(&self) -> bool;
    fn is_dialog(&self) -> bool;
    fn is_modal(&self) -> bool;
    fn is_desktop(&self) -> bool;
    fn is_popup_menu(&self) -> bool;

    /// False while the window is hidden, minimized or otherwise not drawn.
    fn is_painting_enabled(&self) -> bool;
}

/// Category of a window draw primitive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WindowQuadType {
    Contents,
    Decoration,
    Shadow,
}

/// One draw primitive of a window, in screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowQuad {
    pub kind: WindowQuadType,
    pub rect: Rect,
}

impl WindowQuad {
    #[inline]
    pub const fn new(kind: WindowQuadType, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// Ordered draw primitives of a window (back-to-front).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowQuadList {
    quads: Vec<WindowQuad>,
}

impl WindowQuadList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, quad: WindowQuad) {
        self.quads.push(quad);
    }

    /// Returns a copy without quads of `kind`.
    pub fn filter_out(&self, kind: WindowQuadType) -> Self {
        Self {
            quads: self.quads.iter().copied().filter(|q| q.kind != kind).collect(),
        }
    }

    #[inline]
    pub fn contains_kind(&self, kind: WindowQuadType) -> bool {
        self.quads.iter().any(|q| q.kind == kind)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &WindowQuad> {
        self.quads.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

impl FromIterator<WindowQuad> for WindowQuadList {
    fn from_iter<I: IntoIterator<Item = WindowQuad>>(iter: I) -> Self {
        Self { quads: iter.into_iter().collect() }
    }
}

/// Mutable data handed through one window paint call.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPaintData {
    pub quads: WindowQuadList,
    pub opacity: f32,
}

impl WindowPaintData {
    pub fn new(quads: WindowQuadList) -> Self {
        Self { quads, opacity: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quads() -> WindowQuadList {
        [
            WindowQuad::new(WindowQuadType::Shadow, Rect::new(-4, -4, 108, 4)),
            WindowQuad::new(WindowQuadType::Decoration, Rect::new(0, 0, 100, 20)),
            WindowQuad::new(WindowQuadType::Shadow, Rect::new(-4, 100, 108, 4)),
            WindowQuad::new(WindowQuadType::Contents, Rect::new(0, 20, 100, 80)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn filter_out_drops_only_that_kind() {
        let list = quads();
        let filtered = list.filter_out(WindowQuadType::Shadow);
        assert_eq!(filtered.len(), 2);
        assert!(!filtered.contains_kind(WindowQuadType::Shadow));
        assert!(filtered.contains_kind(WindowQuadType::Decoration));
        // Source list is untouched.
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn filter_out_keeps_order() {
        let kinds: Vec<_> = quads().filter_out(WindowQuadType::Shadow).iter().map(|q| q.kind).collect();
        assert_eq!(kinds, [WindowQuadType::Decoration, WindowQuadType::Contents]);
    }
}
