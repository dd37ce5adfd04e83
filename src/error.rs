use std::path::PathBuf;
use thiserror::Error;

/// Setup errors. Any of these aborts a run before a single shader is compiled.
#[derive(Error, Debug)]
pub enum ShaderBuildError {
    #[error("Could not read SDK install root {}: {source}", .path.display())]
    InstallRootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No Vulkan SDK versions found in {}", .0.display())]
    NoSdkVersions(PathBuf),

    #[error("Shader compiler not found at {}", .0.display())]
    CompilerNotFound(PathBuf),

    #[error("Invalid SPIR-V artifact {}: {reason}", .path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("File watcher error: {0}")]
    Watcher(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShaderBuildError>;
