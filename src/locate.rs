use crate::{DEFAULT_COMPILER_RELATIVE_PATH, DEFAULT_SDK_ROOT, Result, ShaderBuildError};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Where to find the shader compiler executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerLocation {
    /// Used verbatim. A bad path only shows up when compilation is attempted.
    Fixed(PathBuf),
    /// Newest versioned directory under `install_root`, joined with `relative_path`.
    LatestSdk {
        install_root: PathBuf,
        relative_path: PathBuf,
    },
}

impl Default for CompilerLocation {
    fn default() -> Self {
        Self::LatestSdk {
            install_root: PathBuf::from(DEFAULT_SDK_ROOT),
            relative_path: PathBuf::from(DEFAULT_COMPILER_RELATIVE_PATH),
        }
    }
}

impl CompilerLocation {
    /// Resolves the compiler path.
    ///
    /// # Errors
    ///
    /// For [`CompilerLocation::LatestSdk`], returns an error if:
    /// - The install root cannot be read
    /// - The install root has no subdirectories
    /// - The executable does not exist inside the newest one
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            Self::Fixed(path) => Ok(path.clone()),
            Self::LatestSdk {
                install_root,
                relative_path,
            } => {
                let sdk_dir = latest_sdk_version(install_root)?;
                let compiler = sdk_dir.join(relative_path);
                if !compiler.exists() {
                    return Err(ShaderBuildError::CompilerNotFound(compiler));
                }
                log::debug!("Using shader compiler {}", compiler.display());
                Ok(compiler)
            }
        }
    }
}

/// Returns the subdirectory of `install_root` with the greatest [`SdkVersion`].
pub fn latest_sdk_version(install_root: &Path) -> Result<PathBuf> {
    let entries =
        fs::read_dir(install_root).map_err(|source| ShaderBuildError::InstallRootUnreadable {
            path: install_root.to_path_buf(),
            source,
        })?;

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            Some((SdkVersion::parse(&name), entry.path()))
        })
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, path)| path)
        .ok_or_else(|| ShaderBuildError::NoSdkVersions(install_root.to_path_buf()))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum VersionPart {
    // Declared first so text components sort below numeric ones.
    Text(String),
    Number(u64),
}

/// A version-named directory such as `1.3.290.0`.
///
/// Components are split on `.` and compared left to right, numbers by value,
/// so `1.3.290.0` sorts above `1.3.50.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkVersion {
    name: String,
    parts: Vec<VersionPart>,
}

impl SdkVersion {
    pub fn parse(name: &str) -> Self {
        let parts = name
            .split('.')
            .map(|part| match part.parse::<u64>() {
                Ok(number) => VersionPart::Number(number),
                Err(_) => VersionPart::Text(part.to_string()),
            })
            .collect();

        Self {
            name: name.to_string(),
            parts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Ord for SdkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts
            .cmp(&other.parts)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for SdkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
