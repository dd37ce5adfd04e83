use crate::compile::{GlslcCompiler, ShaderCompiler};
use crate::locate::CompilerLocation;
use crate::{DEFAULT_DEBOUNCE_MS, Result, ShaderBuildDriver, ShaderWatcher};
use std::path::{Path, PathBuf};

/// Builder for configuring a [`ShaderBuildDriver`] or [`ShaderWatcher`].
///
/// By default the compiler is discovered in the newest Vulkan SDK under
/// [`DEFAULT_SDK_ROOT`](crate::DEFAULT_SDK_ROOT).
///
/// # Example
///
/// ```rust,no_run
/// use spv_build::ShaderBuildDriver;
///
/// let watcher = ShaderBuildDriver::builder("assets/shaders")
///     .compiler_path("C:/VulkanSDK/1.3.290.0/Bin/glslc.exe")
///     .debounce_ms(250)
///     .build_watcher()
///     .expect("Failed to start shader watcher");
/// ```
pub struct ShaderBuildDriverBuilder {
    root: PathBuf,
    location: CompilerLocation,
    compiler: Option<Box<dyn ShaderCompiler>>,
    debounce_ms: u64,
}

impl ShaderBuildDriverBuilder {
    /// Creates a new builder with default settings.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory searched recursively for shader sources
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            location: CompilerLocation::default(),
            compiler: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Uses the compiler at `path` as-is.
    pub fn compiler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = CompilerLocation::Fixed(path.into());
        self.compiler = None;
        self
    }

    /// Looks for the compiler in the newest versioned directory of an SDK install.
    ///
    /// # Arguments
    ///
    /// * `install_root` - Directory holding one subdirectory per SDK version
    /// * `relative_path` - Path of the executable inside a version directory
    pub fn discover_compiler(
        mut self,
        install_root: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
    ) -> Self {
        self.location = CompilerLocation::LatestSdk {
            install_root: install_root.into(),
            relative_path: relative_path.into(),
        };
        self.compiler = None;
        self
    }

    /// Sets where the compiler is looked up.
    pub fn compiler_location(mut self, location: CompilerLocation) -> Self {
        self.location = location;
        self.compiler = None;
        self
    }

    /// Replaces `glslc` with a custom compiler. No location is resolved.
    pub fn compiler(mut self, compiler: impl ShaderCompiler + 'static) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    /// Sets the minimum interval between watch-triggered rebuilds.
    ///
    /// # Arguments
    ///
    /// * `ms` - Debounce interval in milliseconds
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Resolves the compiler and builds the driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler cannot be located. See
    /// [`CompilerLocation::resolve`].
    pub fn build(self) -> Result<ShaderBuildDriver> {
        let compiler = match self.compiler {
            Some(compiler) => compiler,
            None => Box::new(GlslcCompiler::new(self.location.resolve()?)),
        };

        Ok(ShaderBuildDriver::new(self.root, compiler))
    }

    /// Builds the driver, runs it once, then rebuilds whenever a shader changes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The compiler cannot be located
    /// - The file watcher cannot be initialised
    pub fn build_watcher(self) -> Result<ShaderWatcher> {
        let debounce_ms = self.debounce_ms;
        ShaderWatcher::new(self.build()?, debounce_ms)
    }
}
