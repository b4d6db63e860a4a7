use crate::coords::CornerRadius;

use super::ConfigGroup;

pub const KEY_RADIUS: &str = "Radius";
pub const KEY_TYPE: &str = "Type";
pub const KEY_SQUARE_AT_SCREEN_EDGE: &str = "SquareAtScreenEdge";
pub const KEY_FILTER_SHADOW: &str = "FilterShadow";
pub const KEY_WHITELIST: &str = "Whitelist";
pub const KEY_BLACKLIST: &str = "Blacklist";

/// Radius list used when the key is missing, empty or unparsable.
pub const DEFAULT_RADIUS: [i64; 4] = [10, 10, 10, 10];

/// Style text used when the `Type` key is missing.
pub const DEFAULT_TYPE: &str = "rounded";

/// Upper bound on a single corner radius.
///
/// Masks are `radius²` bitmaps uploaded as textures; this keeps a typo from
/// allocating gigabytes.
pub const MAX_RADIUS: u32 = 1024;

/// Shape cut out of each corner.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CornerStyle {
    /// Corners stay square; the effect paints windows unmodified.
    #[default]
    None,
    /// Circular arc.
    Rounded,
    /// Straight 45° cut.
    Chiseled,
}

impl CornerStyle {
    /// Interprets free text by case-insensitive substring match.
    ///
    /// "rounded" wins over "chiseled" when both appear; anything else is `None`.
    pub fn from_config_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("rounded") {
            CornerStyle::Rounded
        } else if text.contains("chiseled") {
            CornerStyle::Chiseled
        } else {
            CornerStyle::None
        }
    }
}

/// Ordered, case-insensitive substring patterns matched against window classes.
///
/// Patterns are lowercased once at load time. Blank entries are dropped since an
/// empty substring would match every window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatterns {
    patterns: Vec<String>,
}

impl ClassPatterns {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    /// True if any pattern occurs in `class_lower` (already lowercased).
    pub fn matches(&self, class_lower: &str) -> bool {
        self.patterns.iter().any(|p| class_lower.contains(p.as_str()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }
}

/// Sanitized effect configuration.
///
/// Built wholesale by [`ConfigState::load`] on every reconfigure and replaced,
/// never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    pub radii: CornerRadius,
    pub style: CornerStyle,
    pub square_at_edge: bool,
    pub filter_shadow: bool,
    pub whitelist: ClassPatterns,
    pub blacklist: ClassPatterns,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            radii: default_radii(),
            style: CornerStyle::from_config_text(DEFAULT_TYPE),
            square_at_edge: false,
            filter_shadow: false,
            whitelist: ClassPatterns::default(),
            blacklist: ClassPatterns::default(),
        }
    }
}

impl ConfigState {
    /// Reads every key from `group` and sanitizes the result.
    ///
    /// - `Radius`: a missing, empty or unparsable list uses the default; only the
    ///   first four entries are used; negatives become 0.
    /// - all radii 0 forces [`CornerStyle::None`] regardless of `Type`.
    pub fn load(group: &dyn ConfigGroup) -> Self {
        let radii = group
            .read_int_list(KEY_RADIUS)
            .and_then(|list| {
                if list.len() > 4 {
                    log::warn!("{KEY_RADIUS} has {} entries; using the first four", list.len());
                }
                CornerRadius::expand(&list, MAX_RADIUS)
            })
            .unwrap_or_else(default_radii);

        let type_text = group.read_string(KEY_TYPE).unwrap_or_else(|| DEFAULT_TYPE.to_string());
        let mut style = CornerStyle::from_config_text(&type_text);
        if radii.is_zero() {
            style = CornerStyle::None;
        }

        Self {
            radii,
            style,
            square_at_edge: group.read_bool(KEY_SQUARE_AT_SCREEN_EDGE).unwrap_or(false),
            filter_shadow: group.read_bool(KEY_FILTER_SHADOW).unwrap_or(false),
            whitelist: ClassPatterns::new(group.read_string_list(KEY_WHITELIST).unwrap_or_default()),
            blacklist: ClassPatterns::new(group.read_string_list(KEY_BLACKLIST).unwrap_or_default()),
        }
    }
}

fn default_radii() -> CornerRadius {
    CornerRadius::expand(&DEFAULT_RADIUS, MAX_RADIUS).unwrap_or(CornerRadius::all(10))
}
