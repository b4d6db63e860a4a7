use std::fmt;
use std::path::PathBuf;

/// Why the corner program is unavailable.
#[derive(Debug)]
pub enum ShaderError {
    /// No data directory contains the shader file.
    NotFound { relative: PathBuf },
    /// The file exists but could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// The device rejected the shader or pipeline.
    Build(String),
    /// The backend lacks a capability the effect needs.
    Unsupported(&'static str),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::NotFound { relative } => {
                write!(f, "shader {} not found in any data directory", relative.display())
            }
            ShaderError::Read { path, source } => {
                write!(f, "failed to read shader {}: {source}", path.display())
            }
            ShaderError::Build(msg) => write!(f, "failed to build corner program: {msg}"),
            ShaderError::Unsupported(what) => write!(f, "backend unsupported: {what}"),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
