//! Thin driver around the native build tool.
//!
//! Both steps are synchronous external invocations with inherited stdio so
//! the tool's own diagnostics stream to the terminal. The driver does not
//! retry and does not parse output; the exit code is the entire contract.

use std::path::Path;

use anyhow::Result;

use crate::exec::Executor;
use crate::logging::Logger;

/// Run the configure step: `cmake -S . -B <build_dir> -G <generator>`.
///
/// # Errors
///
/// Returns an error only if the tool cannot be spawned; a non-zero exit is
/// reported through the returned code.
pub fn configure(
    executor: &dyn Executor,
    log: &Logger,
    root: &Path,
    build_dir: &str,
    generator: &str,
) -> Result<i32> {
    log.debug(&format!("cmake -S . -B {build_dir} -G \"{generator}\""));
    let result = executor.run_interactive(
        root,
        "cmake",
        &["-S", ".", "-B", build_dir, "-G", generator],
    )?;
    Ok(result.code.unwrap_or(-1))
}

/// Run the build step: `cmake --build <build_dir>`.
///
/// # Errors
///
/// Returns an error only if the tool cannot be spawned; a non-zero exit is
/// reported through the returned code.
pub fn build(executor: &dyn Executor, log: &Logger, root: &Path, build_dir: &str) -> Result<i32> {
    log.debug(&format!("cmake --build {build_dir}"));
    let result = executor.run_interactive(root, "cmake", &["--build", build_dir])?;
    Ok(result.code.unwrap_or(-1))
}
