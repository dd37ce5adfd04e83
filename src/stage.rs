use std::path::{Path, PathBuf};

/// Shader stage extensions and the suffix their compiled artifact gets.
///
/// Order matters: [`match_extension`] takes the first entry that matches.
pub const SHADER_TYPES: &[(&str, &str)] = &[
    (".frag", "-f.spv"),
    (".vert", "-v.spv"),
    (".geom", "-g.spv"),
    (".tesc", "-tc.spv"),
    (".tese", "-te.spv"),
    (".comp", "-c.spv"),
];

/// Returns the first `(extension, suffix)` pair whose extension ends `file_name`.
pub fn match_extension(file_name: &str) -> Option<(&'static str, &'static str)> {
    SHADER_TYPES
        .iter()
        .find(|(extension, _)| file_name.ends_with(extension))
        .copied()
}

/// Computes where the artifact for `source_path` is written.
///
/// The first occurrence of `extension` anywhere in the file name is replaced,
/// not only the trailing one, so `a.frag.b.frag` becomes `a-f.spv.b.frag`.
/// Returns `None` if the file name is missing or not valid UTF-8.
pub fn output_path(source_path: &Path, extension: &str, suffix: &str) -> Option<PathBuf> {
    let file_name = source_path.file_name()?.to_str()?;
    let output_name = file_name.replacen(extension, suffix, 1);

    Some(match source_path.parent() {
        Some(parent) => parent.join(output_name),
        None => PathBuf::from(output_name),
    })
}

/// A discovered shader source and the artifact it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub source: PathBuf,
    pub extension: &'static str,
    pub output: PathBuf,
}

impl ShaderSource {
    /// Classifies `path`, returning `None` when it is not a recognised shader.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let source = path.as_ref();
        let file_name = source.file_name()?.to_str()?;
        let (extension, suffix) = match_extension(file_name)?;
        let output = output_path(source, extension, suffix)?;

        Some(Self {
            source: source.to_path_buf(),
            extension,
            output,
        })
    }
}
