use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ini::{Ini, ParseOption, Properties};

/// File name of the effect's configuration under the XDG config directory.
pub const CONFIG_FILE_NAME: &str = "shapecornersrc";

/// Group the effect reads its keys from.
pub const GENERAL_GROUP: &str = "General";

/// A key/value configuration group.
///
/// Implementors only provide raw string lookup; typed readers are derived from it.
/// Every reader returns `None` when the key is missing *or* its value cannot be
/// interpreted, so callers fall back to their default in both cases.
pub trait ConfigGroup {
    /// Returns the raw (still escaped) value stored under `key`.
    fn raw_entry(&self, key: &str) -> Option<&str>;

    fn read_string(&self, key: &str) -> Option<String> {
        self.raw_entry(key).map(unescape)
    }

    fn read_bool(&self, key: &str) -> Option<bool> {
        let value = self.raw_entry(key)?.trim().to_ascii_lowercase();
        match value.as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    fn read_string_list(&self, key: &str) -> Option<Vec<String>> {
        self.raw_entry(key).map(split_list)
    }

    /// Reads a comma separated integer list. Any unparsable item rejects the
    /// whole list.
    fn read_int_list(&self, key: &str) -> Option<Vec<i64>> {
        self.read_string_list(key)?
            .iter()
            .map(|item| item.trim().parse::<i64>().ok())
            .collect()
    }
}

/// Parsed KConfig-style file: `[Group]` headers followed by `key=value` lines.
///
/// Only plain keys are read; localized or flagged keys (`Key[de]`, `Key[$e]`)
/// are ignored. Later duplicates override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct KConfig {
    ini: Ini,
}

impl KConfig {
    /// Parses configuration text.
    ///
    /// Values are kept verbatim: KConfig escapes (`\s`, `\,`) are resolved by
    /// the [`ConfigGroup`] readers, not by the INI layer.
    pub fn parse(text: &str) -> Result<Self> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, opt).context("malformed config text")?;
        Ok(Self { ini })
    }

    /// Reads and parses the file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Opens `shapecornersrc` in the user config directory.
    ///
    /// A missing file is not an error: it reads as an empty configuration, so
    /// every key takes its default.
    pub fn open_default() -> Result<Self> {
        let Some(path) = default_config_path() else {
            log::debug!("no config directory (HOME and XDG_CONFIG_HOME unset); using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            log::debug!("{} does not exist; using defaults", path.display());
            return Ok(Self::default());
        }
        Self::open(&path)
    }

    /// Returns a view of one group. Missing groups read as empty.
    pub fn group(&self, name: &str) -> KConfigGroup<'_> {
        KConfigGroup { entries: self.ini.section(Some(name)) }
    }
}

/// Borrowed view over one group of a [`KConfig`].
#[derive(Debug, Copy, Clone)]
pub struct KConfigGroup<'a> {
    entries: Option<&'a Properties>,
}

impl ConfigGroup for KConfigGroup<'_> {
    fn raw_entry(&self, key: &str) -> Option<&str> {
        if key.contains('[') {
            return None;
        }
        self.entries?.get_all(key).last()
    }
}

/// `$XDG_CONFIG_HOME/shapecornersrc`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join(CONFIG_FILE_NAME))
}

/// Splits a list value on unescaped commas, unescaping each item.
///
/// Empty input is an empty list; a trailing comma does not add an item.
fn split_list(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    if raw.is_empty() {
        return items;
    }

    let mut item = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                item.push('\\');
                if let Some(next) = chars.next() {
                    item.push(next);
                }
            }
            ',' => items.push(unescape(&std::mem::take(&mut item))),
            _ => item.push(c),
        }
    }
    if !item.is_empty() {
        items.push(unescape(&item));
    }
    items
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general(text: &str) -> KConfig {
        KConfig::parse(text).unwrap()
    }

    #[test]
    fn keys_are_scoped_to_groups() {
        let cfg = general("[Other]\nRadius=3\n[General]\nType=chiseled\n");
        let g = cfg.group(GENERAL_GROUP);
        assert_eq!(g.read_string("Type").as_deref(), Some("chiseled"));
        assert_eq!(g.raw_entry("Radius"), None);
        assert_eq!(cfg.group("Other").read_int_list("Radius"), Some(vec![3]));
    }

    #[test]
    fn missing_group_reads_empty() {
        let cfg = general("Radius=3\n");
        assert_eq!(cfg.group(GENERAL_GROUP).raw_entry("Radius"), None);
    }

    #[test]
    fn comments_are_ignored() {
        let cfg = general("# comment\n[General]\n; another\nFilterShadow = true\n");
        assert_eq!(cfg.group(GENERAL_GROUP).read_bool("FilterShadow"), Some(true));
    }

    #[test]
    fn unterminated_group_header_is_an_error() {
        assert!(KConfig::parse("[General\nRadius=3\n").is_err());
    }

    #[test]
    fn later_duplicate_wins() {
        let cfg = general("[General]\nRadius=3\nRadius=7\n");
        assert_eq!(cfg.group(GENERAL_GROUP).read_int_list("Radius"), Some(vec![7]));
    }

    #[test]
    fn backslashes_reach_the_readers_verbatim() {
        let cfg = general("[General]\nWhitelist=a\\sb\\,c\n");
        let g = cfg.group(GENERAL_GROUP);
        assert_eq!(g.raw_entry("Whitelist"), Some("a\\sb\\,c"));
        assert_eq!(g.read_string_list("Whitelist"), Some(vec!["a b,c".to_string()]));
    }

    #[test]
    fn open_reads_a_file() {
        let path = std::env::temp_dir().join(format!("shapecornersrc-{}", std::process::id()));
        std::fs::write(&path, "[General]\nType=chiseled\n").unwrap();
        let cfg = KConfig::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.group(GENERAL_GROUP).read_string("Type").as_deref(), Some("chiseled"));
    }

    #[test]
    fn localized_keys_are_skipped() {
        let cfg = general("[General]\nType[de]=chiseled\nType=rounded\n");
        assert_eq!(cfg.group(GENERAL_GROUP).read_string("Type").as_deref(), Some("rounded"));
    }

    #[test]
    fn bool_spellings() {
        let cfg = general("[General]\na=TRUE\nb=0\nc=On\nd=no\ne=maybe\n");
        let g = cfg.group(GENERAL_GROUP);
        assert_eq!(g.read_bool("a"), Some(true));
        assert_eq!(g.read_bool("b"), Some(false));
        assert_eq!(g.read_bool("c"), Some(true));
        assert_eq!(g.read_bool("d"), Some(false));
        assert_eq!(g.read_bool("e"), None);
    }

    #[test]
    fn int_list_rejects_garbage_items() {
        let cfg = general("[General]\nok=1, -2 ,3\nbad=1,x,3\n");
        let g = cfg.group(GENERAL_GROUP);
        assert_eq!(g.read_int_list("ok"), Some(vec![1, -2, 3]));
        assert_eq!(g.read_int_list("bad"), None);
    }

    #[test]
    fn empty_value_is_empty_list() {
        let cfg = general("[General]\nWhitelist=\n");
        assert_eq!(cfg.group(GENERAL_GROUP).read_string_list("Whitelist"), Some(vec![]));
    }

    #[test]
    fn escaped_comma_stays_in_item() {
        let cfg = general("[General]\nBlacklist=a\\,b,c,\n");
        assert_eq!(
            cfg.group(GENERAL_GROUP).read_string_list("Blacklist"),
            Some(vec!["a,b".to_string(), "c".to_string()]),
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(unescape(r"a\sb\\c"), "a b\\c");
    }
}
