//! Shader resource lookup.
//!
//! The corner program ships as an external file in two variants. The variant is
//! picked from the device's shading-language version, then searched for in the
//! XDG data directories.

mod error;

pub use error::ShaderError;

use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the corner shader inside a variant directory.
pub const SHADER_FILE_NAME: &str = "shapecorners.wgsl";

/// Directory holding the variant directories, relative to a data directory.
pub const SHADER_DIR: &str = "shapecorners/shaders";

/// Shading-language version, compared lexicographically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderVersion {
    pub major: u32,
    pub minor: u32,
}

impl ShaderVersion {
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ShaderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

/// Shader variant directory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderVariant {
    /// Integer texel fetches only; no filtering sampler.
    Legacy,
    /// Sampled texture reads.
    Modern,
}

impl ShaderVariant {
    /// Lowest version that gets [`ShaderVariant::Modern`].
    pub const MODERN_THRESHOLD: ShaderVersion = ShaderVersion::new(1, 40);

    pub fn for_version(version: ShaderVersion) -> Self {
        if version >= Self::MODERN_THRESHOLD {
            ShaderVariant::Modern
        } else {
            ShaderVariant::Legacy
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            ShaderVariant::Legacy => "1.10",
            ShaderVariant::Modern => "1.40",
        }
    }

    /// Path relative to a data directory.
    pub fn relative_path(self) -> PathBuf {
        Path::new(SHADER_DIR).join(self.dir_name()).join(SHADER_FILE_NAME)
    }
}

/// Loaded shader source and where it came from.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub variant: ShaderVariant,
    pub path: PathBuf,
    pub source: String,
}

/// Finds shader files in an ordered list of data directories.
#[derive(Debug, Clone, Default)]
pub struct ShaderLocator {
    data_dirs: Vec<PathBuf>,
}

impl ShaderLocator {
    /// Searches exactly `data_dirs`, in order.
    pub fn new(data_dirs: Vec<PathBuf>) -> Self {
        Self { data_dirs }
    }

    /// `$XDG_DATA_HOME` (default `~/.local/share`) followed by `$XDG_DATA_DIRS`
    /// (default `/usr/local/share:/usr/share`).
    pub fn from_env() -> Self {
        let data_home = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty());
        let home = std::env::var_os("HOME").filter(|v| !v.is_empty());
        let data_dirs = std::env::var_os("XDG_DATA_DIRS").filter(|v| !v.is_empty());
        Self::new(xdg_data_dirs(
            data_home.as_deref().map(Path::new),
            home.as_deref().map(Path::new),
            data_dirs.as_deref().and_then(|v| v.to_str()),
        ))
    }

    /// Puts `dir` in front of the search list.
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
        self.data_dirs.insert(0, dir.into());
    }

    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    /// First existing file for `variant`.
    pub fn locate(&self, variant: ShaderVariant) -> Option<PathBuf> {
        let relative = variant.relative_path();
        self.data_dirs
            .iter()
            .map(|dir| dir.join(&relative))
            .find(|path| path.is_file())
    }

    /// Locates and reads the variant matching `version`.
    pub fn load(&self, version: ShaderVersion) -> Result<ShaderSource, ShaderError> {
        let variant = ShaderVariant::for_version(version);
        let path = self
            .locate(variant)
            .ok_or_else(|| ShaderError::NotFound { relative: variant.relative_path() })?;
        let source = std::fs::read_to_string(&path)
            .map_err(|source| ShaderError::Read { path: path.clone(), source })?;
        Ok(ShaderSource { variant, path, source })
    }
}

fn xdg_data_dirs(data_home: Option<&Path>, home: Option<&Path>, data_dirs: Option<&str>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    match (data_home, home) {
        (Some(dir), _) => dirs.push(dir.to_path_buf()),
        (None, Some(home)) => dirs.push(home.join(".local/share")),
        (None, None) => {}
    }
    let system = data_dirs.unwrap_or("/usr/local/share:/usr/share");
    dirs.extend(system.split(':').filter(|d| !d.is_empty()).map(PathBuf::from));
    dirs
}
