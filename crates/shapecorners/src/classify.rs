//! Per-window eligibility.

use crate::config::ConfigState;
use crate::window::EffectWindow;

/// Class substring identifying Plasma shell surfaces (panels, widgets, OSDs).
const PLASMA_CLASS: &str = "plasma";

/// Which rule decided a window's eligibility.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The corner shader is unavailable; the effect is inert.
    ShaderUnavailable,
    /// Class matched the whitelist.
    Whitelisted,
    /// Class matched the blacklist.
    Blacklisted,
    /// Plasma surface that is not a normal window, dialog or modal.
    PlasmaShell,
    /// Window is not painted, is the desktop, or is a popup menu.
    Excluded,
    /// Nothing excluded the window.
    Default,
}

impl Verdict {
    #[inline]
    pub fn is_eligible(self) -> bool {
        matches!(self, Verdict::Whitelisted | Verdict::Default)
    }
}

/// Decides whether a window gets its corners shaped.
///
/// Rules are checked in this order, first hit wins:
/// 1. shader unavailable → no
/// 2. whitelist → yes
/// 3. blacklist → no
/// 4. plasma surface that is not normal/dialog/modal → no
/// 5. not paintable, desktop, or popup menu → no
/// 6. otherwise → yes
///
/// The final default is permissive: window types nobody thought of are shaped.
#[derive(Debug, Copy, Clone)]
pub struct WindowClassifier<'a> {
    config: &'a ConfigState,
    shader_valid: bool,
}

impl<'a> WindowClassifier<'a> {
    #[inline]
    pub fn new(config: &'a ConfigState, shader_valid: bool) -> Self {
        Self { config, shader_valid }
    }

    pub fn classify<W: EffectWindow + ?Sized>(&self, window: &W) -> Verdict {
        if !self.shader_valid {
            return Verdict::ShaderUnavailable;
        }

        let class = window.window_class().to_lowercase();

        if self.config.whitelist.matches(&class) {
            return Verdict::Whitelisted;
        }

        if self.config.blacklist.matches(&class) {
            return Verdict::Blacklisted;
        }

        if class.contains(PLASMA_CLASS)
            && !window.is_normal_window()
            && !window.is_dialog()
            && !window.is_modal()
        {
            return Verdict::PlasmaShell;
        }

        if !window.is_painting_enabled() || window.is_desktop() || window.is_popup_menu() {
            return Verdict::Excluded;
        }

        Verdict::Default
    }

    #[inline]
    pub fn is_eligible<W: EffectWindow + ?Sized>(&self, window: &W) -> bool {
        self.classify(window).is_eligible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassPatterns;
    use crate::coords::Rect;

    #[derive(Debug, Clone)]
    struct Win {
        class: &'static str,
        normal: bool,
        dialog: bool,
        modal: bool,
        desktop: bool,
        popup: bool,
        painting: bool,
    }

    impl Win {
        fn normal(class: &'static str) -> Self {
            Self {
                class,
                normal: true,
                dialog: false,
                modal: false,
                desktop: false,
                popup: false,
                painting: true,
            }
        }
    }

    impl EffectWindow for Win {
        fn geometry(&self) -> Rect { Rect::new(0, 0, 100, 100) }
        fn window_class(&self) -> &str { self.class }
        fn is_normal_window(&self) -> bool { self.normal }
        fn is_dialog(&self) -> bool { self.dialog }
        fn is_modal(&self) -> bool { self.modal }
        fn is_desktop(&self) -> bool { self.desktop }
        fn is_popup_menu(&self) -> bool { self.popup }
        fn is_painting_enabled(&self) -> bool { self.painting }
    }

    fn config(white: &[&str], black: &[&str]) -> ConfigState {
        ConfigState {
            whitelist: ClassPatterns::new(white),
            blacklist: ClassPatterns::new(black),
            ..ConfigState::default()
        }
    }

    #[test]
    fn shader_failure_fails_closed() {
        let cfg = config(&["firefox"], &[]);
        let c = WindowClassifier::new(&cfg, false);
        assert_eq!(c.classify(&Win::normal("firefox")), Verdict::ShaderUnavailable);
        assert!(!c.is_eligible(&Win::normal("konsole")));
    }

    #[test]
    fn whitelist_beats_blacklist() {
        let cfg = config(&["firefox"], &["fire"]);
        let c = WindowClassifier::new(&cfg, true);
        assert_eq!(c.classify(&Win::normal("Firefox")), Verdict::Whitelisted);
    }

    #[test]
    fn whitelist_beats_heuristics() {
        let cfg = config(&["plasmashell"], &[]);
        let c = WindowClassifier::new(&cfg, true);
        let panel = Win { normal: false, popup: true, ..Win::normal("plasmashell") };
        assert!(c.is_eligible(&panel));
    }

    #[test]
    fn blacklist_is_case_insensitive() {
        let cfg = config(&[], &["KONSOLE"]);
        let c = WindowClassifier::new(&cfg, true);
        assert_eq!(c.classify(&Win::normal("org.kde.konsole")), Verdict::Blacklisted);
    }

    #[test]
    fn plasma_non_normal_windows_are_skipped() {
        let cfg = config(&[], &[]);
        let c = WindowClassifier::new(&cfg, true);
        let panel = Win { normal: false, ..Win::normal("plasmashell") };
        assert_eq!(c.classify(&panel), Verdict::PlasmaShell);
    }

    #[test]
    fn plasma_dialogs_stay_eligible() {
        let cfg = config(&[], &[]);
        let c = WindowClassifier::new(&cfg, true);
        let dialog = Win { normal: false, dialog: true, ..Win::normal("plasmashell") };
        let modal = Win { normal: false, modal: true, ..Win::normal("Plasma-Discover") };
        assert!(c.is_eligible(&dialog));
        assert!(c.is_eligible(&modal));
        assert!(c.is_eligible(&Win::normal("systemsettings plasma")));
    }

    #[test]
    fn unpainted_desktop_and_popups_are_excluded() {
        let cfg = config(&[], &[]);
        let c = WindowClassifier::new(&cfg, true);
        assert_eq!(c.classify(&Win { painting: false, ..Win::normal("a") }), Verdict::Excluded);
        assert_eq!(c.classify(&Win { desktop: true, ..Win::normal("a") }), Verdict::Excluded);
        assert_eq!(c.classify(&Win { popup: true, ..Win::normal("a") }), Verdict::Excluded);
    }

    #[test]
    fn unknown_windows_default_to_eligible() {
        let cfg = config(&[], &["konsole"]);
        let c = WindowClassifier::new(&cfg, true);
        let odd = Win { normal: false, ..Win::normal("xterm") };
        assert_eq!(c.classify(&odd), Verdict::Default);
    }
}
