//! Recursive GLSL → SPIR-V compilation driven by the Vulkan SDK's `glslc`.
//!
//! The driver walks a directory tree, picks out shader sources by their stage
//! extension and compiles each one next to its source:
//!
//! | source   | artifact    |
//! |----------|-------------|
//! | `x.frag` | `x-f.spv`   |
//! | `x.vert` | `x-v.spv`   |
//! | `x.geom` | `x-g.spv`   |
//! | `x.tesc` | `x-tc.spv`  |
//! | `x.tese` | `x-te.spv`  |
//! | `x.comp` | `x-c.spv`   |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use spv_build::ShaderBuildDriver;
//!
//! let driver = match ShaderBuildDriver::builder("assets/shaders")
//!     .discover_compiler("C:/VulkanSDK", "Bin/glslc.exe")
//!     .build()
//! {
//!     Ok(driver) => driver,
//!     Err(e) => {
//!         eprintln!("{}", e);
//!         std::process::exit(1);
//!     }
//! };
//!
//! let report = driver.run();
//! println!("{} compiled, {} failed", report.compiled.len(), report.failed.len());
//! ```
//!
//! Every matching file is recompiled on every run; there is no timestamp or
//! dependency tracking.

pub mod builder;
pub mod cli;
pub mod compile;
pub mod driver;
pub mod error;
pub mod locate;
pub mod stage;
pub mod watcher;

pub use builder::ShaderBuildDriverBuilder;
pub use cli::run;
pub use compile::{CompileError, GlslcCompiler, ShaderCompiler, load_spirv};
pub use driver::{BuildReport, CompiledShader, FailedShader, ShaderBuildDriver};
pub use error::{Result, ShaderBuildError};
pub use locate::{CompilerLocation, SdkVersion, latest_sdk_version};
pub use stage::{SHADER_TYPES, ShaderSource};
pub use watcher::ShaderWatcher;

const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Root directory the Vulkan SDK installs its versioned directories into.
#[cfg(windows)]
pub const DEFAULT_SDK_ROOT: &str = "C:/VulkanSDK";
#[cfg(not(windows))]
pub const DEFAULT_SDK_ROOT: &str = "/opt/VulkanSDK";

/// Location of `glslc` inside a single versioned SDK directory.
#[cfg(windows)]
pub const DEFAULT_COMPILER_RELATIVE_PATH: &str = "Bin/glslc.exe";
#[cfg(not(windows))]
pub const DEFAULT_COMPILER_RELATIVE_PATH: &str = "x86_64/bin/glslc";
