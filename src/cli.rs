use crate::ShaderBuildDriver;
use crate::locate::CompilerLocation;
use std::path::Path;
use std::process::ExitCode;

/// One full build of `root` as the `spv-build` binary performs it.
///
/// Returns failure only when the compiler cannot be located, in which case no
/// shader is compiled. Individual shader failures are logged and still end in
/// success.
pub fn run(root: &Path, location: CompilerLocation) -> ExitCode {
    ExitCode::from(exit_status(root, location))
}

fn exit_status(root: &Path, location: CompilerLocation) -> u8 {
    let driver = match ShaderBuildDriver::builder(root)
        .compiler_location(location)
        .build()
    {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("{}", e);
            return 1;
        }
    };

    let report = driver.run();
    log::debug!(
        "{} shaders compiled, {} failed",
        report.compiled.len(),
        report.failed.len()
    );

    0
}
