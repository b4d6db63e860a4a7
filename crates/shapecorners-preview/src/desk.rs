//! A fake desktop: window list, their draw quads, and the wallpaper.

use shapecorners::coords::{Rect, Size};
use shapecorners::window::{EffectWindow, WindowQuad, WindowQuadList, WindowQuadType};

use crate::quads::{rgba, Color, SolidQuad};

/// Shadow ring thickness around each window.
pub const SHADOW_EXTENT: i32 = 10;

/// Title bar height of decorated windows.
pub const TITLE_HEIGHT: i32 = 28;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeskKind {
    Normal,
    Dialog,
    Panel,
    PopupMenu,
}

/// A window on the fake desktop.
#[derive(Debug, Clone)]
pub struct DeskWindow {
    pub class: String,
    pub geometry: Rect,
    pub kind: DeskKind,
    pub modal: bool,
    pub title: Color,
    pub body: Color,
}

impl DeskWindow {
    pub fn new(class: &str, geometry: Rect, kind: DeskKind) -> Self {
        Self {
            class: class.to_string(),
            geometry,
            kind,
            modal: false,
            title: rgba(0.16, 0.18, 0.22, 1.0),
            body: rgba(0.92, 0.92, 0.90, 1.0),
        }
    }

    pub fn with_colors(mut self, title: Color, body: Color) -> Self {
        self.title = title;
        self.body = body;
        self
    }

    fn decorated(&self) -> bool {
        matches!(self.kind, DeskKind::Normal | DeskKind::Dialog)
    }

    /// Geometry plus the shadow ring.
    pub fn paint_bounds(&self) -> Rect {
        let g = self.geometry;
        Rect::new(
            g.x - SHADOW_EXTENT,
            g.y - SHADOW_EXTENT,
            g.width + 2 * SHADOW_EXTENT,
            g.height + 2 * SHADOW_EXTENT,
        )
    }

    /// Back-to-front draw quads: shadow ring, title bar, contents.
    pub fn quads(&self) -> WindowQuadList {
        let g = self.geometry;
        let s = SHADOW_EXTENT;
        let mut list = WindowQuadList::new();

        for rect in [
            Rect::new(g.x - s, g.y - s, g.width + 2 * s, s),
            Rect::new(g.x - s, g.bottom() + 1, g.width + 2 * s, s),
            Rect::new(g.x - s, g.y, s, g.height),
            Rect::new(g.right() + 1, g.y, s, g.height),
        ] {
            list.push(WindowQuad::new(WindowQuadType::Shadow, rect));
        }

        let title = if self.decorated() { TITLE_HEIGHT.min(g.height) } else { 0 };
        if title > 0 {
            list.push(WindowQuad::new(WindowQuadType::Decoration, Rect::new(g.x, g.y, g.width, title)));
        }
        list.push(WindowQuad::new(
            WindowQuadType::Contents,
            Rect::new(g.x, g.y + title, g.width, g.height - title),
        ));
        list
    }

    /// Fill color for one quad of this window.
    pub fn color_of(&self, kind: WindowQuadType) -> Color {
        match kind {
            WindowQuadType::Shadow => rgba(0.0, 0.0, 0.0, 0.35),
            WindowQuadType::Decoration => self.title,
            WindowQuadType::Contents => self.body,
        }
    }
}

impl EffectWindow for DeskWindow {
    fn geometry(&self) -> Rect {
        self.geometry
    }

    fn window_class(&self) -> &str {
        &self.class
    }

    fn is_normal_window(&self) -> bool {
        self.kind == DeskKind::Normal
    }

    fn is_dialog(&self) -> bool {
        self.kind == DeskKind::Dialog
    }

    fn is_modal(&self) -> bool {
        self.modal
    }

    fn is_desktop(&self) -> bool {
        false
    }

    fn is_popup_menu(&self) -> bool {
        self.kind == DeskKind::PopupMenu
    }

    fn is_painting_enabled(&self) -> bool {
        true
    }
}

/// Sample windows laid out for a `screen`-sized frame, back-to-front.
///
/// Covers the cases worth looking at: a plain window, a window flush with the
/// left screen edge, a modal dialog, Plasma shell surfaces and a context menu.
pub fn sample_desk(screen: Size) -> Vec<DeskWindow> {
    let w = screen.width;
    let h = screen.height;
    let panel_h = 36;

    let mut dialog = DeskWindow::new(
        "org.kde.dolphin",
        Rect::new(w / 2 - 160, h / 2 - 40, 320, 180),
        DeskKind::Dialog,
    );
    dialog.modal = true;

    vec![
        DeskWindow::new("org.kde.konsole", Rect::new(0, 60, w / 3, h / 2), DeskKind::Normal)
            .with_colors(rgba(0.10, 0.10, 0.12, 1.0), rgba(0.05, 0.06, 0.07, 1.0)),
        DeskWindow::new("Navigator firefox", Rect::new(w / 4, h / 8, w / 2, h / 2), DeskKind::Normal)
            .with_colors(rgba(0.85, 0.35, 0.10, 1.0), rgba(0.98, 0.97, 0.95, 1.0)),
        dialog,
        DeskWindow::new("kate", Rect::new(w - w / 3 - 40, h / 3, w / 3, h / 2), DeskKind::Normal)
            .with_colors(rgba(0.20, 0.35, 0.60, 1.0), rgba(0.94, 0.95, 0.97, 1.0)),
        DeskWindow::new("plasmashell", Rect::new(0, h - panel_h, w, panel_h), DeskKind::Panel)
            .with_colors(rgba(0.12, 0.13, 0.15, 0.95), rgba(0.12, 0.13, 0.15, 0.95)),
        DeskWindow::new("plasmashell", Rect::new(40, h - panel_h - 220, 200, 210), DeskKind::PopupMenu)
            .with_colors(rgba(0.18, 0.19, 0.21, 1.0), rgba(0.18, 0.19, 0.21, 1.0)),
        DeskWindow::new("kate", Rect::new(w - w / 3, h / 3 + 60, 180, 140), DeskKind::PopupMenu)
            .with_colors(rgba(0.97, 0.97, 0.97, 1.0), rgba(0.97, 0.97, 0.97, 1.0)),
    ]
}

/// Horizontal stripes, so a captured corner shows whether rows line up.
pub fn wallpaper(screen: Size) -> Vec<SolidQuad> {
    const STRIPE: i32 = 24;
    let colors = [rgba(0.20, 0.42, 0.55, 1.0), rgba(0.28, 0.52, 0.62, 1.0)];

    (0..screen.height)
        .step_by(STRIPE as usize)
        .enumerate()
        .map(|(i, y)| SolidQuad {
            rect: Rect::new(0, y, screen.width, STRIPE.min(screen.height - y)),
            color: colors[i % colors.len()],
        })
        .collect()
}
