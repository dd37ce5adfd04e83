use crate::{Result, ShaderBuildError};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

const SPIRV_MAGIC: u32 = 0x0723_0203;

/// Why a single shader failed to compile.
///
/// A broken compiler and a broken shader look the same from here; either way
/// the file is logged as failed and the run carries on.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to launch {}: {source}", .compiler.display())]
    Spawn {
        compiler: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler exited with {0}")]
    ExitStatus(ExitStatus),

    /// Failure reported by a custom [`ShaderCompiler`] implementation.
    #[error("{0}")]
    Other(String),
}

/// Compiles one shader source into one artifact.
pub trait ShaderCompiler: Send + Sync {
    fn compile(&self, source: &Path, output: &Path) -> std::result::Result<(), CompileError>;
}

/// Runs `glslc <source> -o <output>`.
///
/// The compiler's own stdout and stderr pass straight through to ours. There is
/// no timeout: a hung compiler hangs the run.
#[derive(Debug, Clone)]
pub struct GlslcCompiler {
    path: PathBuf,
}

impl GlslcCompiler {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShaderCompiler for GlslcCompiler {
    fn compile(&self, source: &Path, output: &Path) -> std::result::Result<(), CompileError> {
        let status = Command::new(&self.path)
            .arg(source)
            .arg("-o")
            .arg(output)
            .status()
            .map_err(|source| CompileError::Spawn {
                compiler: self.path.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CompileError::ExitStatus(status));
        }

        Ok(())
    }
}

/// Reads a compiled SPIR-V artifact as little-endian words, ready to hand to a
/// graphics API.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - Its length is not a whole number of words
/// - It does not start with the SPIR-V magic number
pub fn load_spirv(path: impl AsRef<Path>) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    if bytes.len() % 4 != 0 {
        return Err(ShaderBuildError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: format!("length {} is not a multiple of 4", bytes.len()),
        });
    }

    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    match words.first() {
        Some(&SPIRV_MAGIC) => Ok(words),
        _ => Err(ShaderBuildError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: "missing SPIR-V magic number".to_string(),
        }),
    }
}
