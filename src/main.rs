use spv_build::CompilerLocation;
use std::path::PathBuf;
use std::process::ExitCode;

fn base_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?.canonicalize()?;
    Ok(exe.parent().map(PathBuf::from).unwrap_or_default())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();

    let root = match base_dir() {
        Ok(root) => root,
        Err(e) => {
            log::error!("Could not determine the shader directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Newest SDK under the platform's default install root.
    spv_build::run(&root, CompilerLocation::default())
}
