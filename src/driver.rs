use crate::ShaderBuildDriverBuilder;
use crate::compile::ShaderCompiler;
use crate::stage::ShaderSource;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A shader that compiled successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// A shader whose compilation failed, with the reason as logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedShader {
    pub source: PathBuf,
    pub output: PathBuf,
    pub reason: String,
}

/// Outcome of one pass over the shader tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub compiled: Vec<CompiledShader>,
    pub failed: Vec<FailedShader>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.compiled.len() + self.failed.len()
    }
}

/// Walks a directory tree and compiles every shader source found in it.
///
/// Construct one through [`ShaderBuildDriver::builder`], which resolves the
/// compiler up front so a missing SDK is reported before any file is touched.
pub struct ShaderBuildDriver {
    root: PathBuf,
    compiler: Box<dyn ShaderCompiler>,
}

impl ShaderBuildDriver {
    /// Creates a builder for a driver rooted at `root`.
    pub fn builder(root: impl AsRef<Path>) -> ShaderBuildDriverBuilder {
        ShaderBuildDriverBuilder::new(root)
    }

    pub(crate) fn new(root: PathBuf, compiler: Box<dyn ShaderCompiler>) -> Self {
        Self { root, compiler }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compiles every recognised shader under the root, one at a time.
    ///
    /// A failed shader is logged and skipped; it never stops the walk. Files
    /// are visited in whatever order the filesystem lists them.
    pub fn run(&self) -> BuildReport {
        let mut report = BuildReport::default();

        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };

            // Follows file symlinks; directory symlinks are still not descended into.
            if !entry.path().is_file() {
                continue;
            }

            let Some(shader) = ShaderSource::from_path(entry.path()) else {
                continue;
            };

            self.compile_one(shader, &mut report);
        }

        report
    }

    fn compile_one(&self, shader: ShaderSource, report: &mut BuildReport) {
        match self.compiler.compile(&shader.source, &shader.output) {
            Ok(()) => {
                log::info!(
                    "Successfully compiled {} to {}",
                    shader.source.display(),
                    shader.output.display()
                );
                report.compiled.push(CompiledShader {
                    source: shader.source,
                    output: shader.output,
                });
            }
            Err(e) => {
                log::error!("Error compiling {}: {}", shader.source.display(), e);
                report.failed.push(FailedShader {
                    source: shader.source,
                    output: shader.output,
                    reason: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::compile::CompileError;
    use parking_lot::Mutex;
    use std::fs;
    use std::sync::Arc;

    /// Records every invocation and fails sources whose name contains `fail_on`.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingCompiler {
        pub calls: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
        pub fail_on: Option<&'static str>,
        pub delay: std::time::Duration,
    }

    impl ShaderCompiler for RecordingCompiler {
        fn compile(&self, source: &Path, output: &Path) -> Result<(), CompileError> {
            self.calls
                .lock()
                .push((source.to_path_buf(), output.to_path_buf()));
            std::thread::sleep(self.delay);

            let name = source.file_name().unwrap().to_string_lossy();
            match self.fail_on {
                Some(pattern) if name.contains(pattern) => {
                    Err(CompileError::Other(format!("syntax error in {name}")))
                }
                _ => Ok(()),
            }
        }
    }

    pub(crate) fn fresh_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn driver(root: &Path, compiler: &RecordingCompiler) -> ShaderBuildDriver {
        ShaderBuildDriver::builder(root)
            .compiler(compiler.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_compiles_each_shader_once_and_skips_others() {
        let root = fresh_dir("spv_build_test_driver_walk");
        fs::create_dir_all(root.join("post/blur")).unwrap();
        for file in [
            "mesh.vert",
            "mesh.frag",
            "post/blur/blur.comp",
            "post/tonemap.frag",
            "post/terrain.tesc",
            "post/terrain.tese",
            "post/blur/grass.geom",
        ] {
            fs::write(root.join(file), b"#version 450\n").unwrap();
        }
        for file in ["README.md", "common.glsl", "post/old-f.spv", "post/blur/notes.txt"] {
            fs::write(root.join(file), b"").unwrap();
        }

        let compiler = RecordingCompiler::default();
        let report = driver(&root, &compiler).run();

        let mut calls = compiler.calls.lock().clone();
        calls.sort();
        let mut expected = vec![
            (root.join("mesh.vert"), root.join("mesh-v.spv")),
            (root.join("mesh.frag"), root.join("mesh-f.spv")),
            (root.join("post/blur/blur.comp"), root.join("post/blur/blur-c.spv")),
            (root.join("post/tonemap.frag"), root.join("post/tonemap-f.spv")),
            (root.join("post/terrain.tesc"), root.join("post/terrain-tc.spv")),
            (root.join("post/terrain.tese"), root.join("post/terrain-te.spv")),
            (root.join("post/blur/grass.geom"), root.join("post/blur/grass-g.spv")),
        ];
        expected.sort();

        assert_eq!(calls, expected);
        assert_eq!(report.compiled.len(), 7);
        assert!(report.is_success());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let root = fresh_dir("spv_build_test_driver_continue");
        fs::write(root.join("broken.frag"), b"").unwrap();
        fs::write(root.join("fine.vert"), b"").unwrap();

        let compiler = RecordingCompiler {
            fail_on: Some("broken"),
            ..Default::default()
        };
        let report = driver(&root, &compiler).run();

        assert_eq!(compiler.calls.lock().len(), 2);
        assert_eq!(report.attempted(), 2);
        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].source, root.join("broken.frag"));
        assert_eq!(report.failed[0].reason, "syntax error in broken.frag");
        assert_eq!(
            report.compiled,
            vec![CompiledShader {
                source: root.join("fine.vert"),
                output: root.join("fine-v.spv"),
            }]
        );

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_directories_named_like_shaders_are_not_compiled() {
        let root = fresh_dir("spv_build_test_driver_dirs");
        fs::create_dir_all(root.join("lighting.frag")).unwrap();
        fs::write(root.join("lighting.frag/inner.comp"), b"").unwrap();

        let compiler = RecordingCompiler::default();
        driver(&root, &compiler).run();

        assert_eq!(
            *compiler.calls.lock(),
            vec![(
                root.join("lighting.frag/inner.comp"),
                root.join("lighting.frag/inner-c.spv")
            )]
        );

        let _ = fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_shader_files_are_compiled() {
        let root = fresh_dir("spv_build_test_driver_symlink");
        let shared = fresh_dir("spv_build_test_driver_symlink_shared");
        fs::write(shared.join("common.frag"), b"").unwrap();
        fs::create_dir_all(shared.join("lib")).unwrap();
        fs::write(shared.join("lib/nested.vert"), b"").unwrap();
        std::os::unix::fs::symlink(shared.join("common.frag"), root.join("common.frag")).unwrap();
        std::os::unix::fs::symlink(shared.join("lib"), root.join("lib")).unwrap();

        let compiler = RecordingCompiler::default();
        driver(&root, &compiler).run();

        assert_eq!(
            *compiler.calls.lock(),
            vec![(root.join("common.frag"), root.join("common-f.spv"))]
        );

        let _ = fs::remove_dir_all(&root);
        let _ = fs::remove_dir_all(&shared);
    }

    #[test]
    fn test_missing_root_compiles_nothing() {
        let root = std::env::temp_dir().join("spv_build_test_driver_no_root");
        let _ = fs::remove_dir_all(&root);

        let compiler = RecordingCompiler::default();
        let report = driver(&root, &compiler).run();

        assert!(compiler.calls.lock().is_empty());
        assert_eq!(report, BuildReport::default());
    }
}
