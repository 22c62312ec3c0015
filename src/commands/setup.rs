//! The bootstrap orchestration state machine.
//!
//! Steps run strictly in sequence; each gated step owns its own abort.
//! Configure/build failures are reported but never prevent the guidance
//! output, so a run that passes the gates always completes with exit code 0.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::cli::GlobalOpts;
use crate::cmake;
use crate::error::IdeError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::mode::RunMode;
use crate::net;
use crate::platform::Platform;
use crate::settings;
use crate::submodules::{self, Submodule};
use crate::support::{self, BuildConfig, Ide, PlatformSupport, vscode};

/// Relative path of the settings document.
pub const SETTINGS_PATH: &str = "config/app_settings.yml";

/// Relative path of the build descriptor.
pub const DESCRIPTOR_PATH: &str = "CMakeLists.txt";

/// Build output directory, created if absent.
pub const BUILD_DIR: &str = "build";

/// External source trees tracked by the bootstrap.
///
/// Disabled entries are declared for visibility but intentionally not
/// synchronized; they keep whatever ref the parent tree records. The enabled
/// record is non-required: a failed update warns and continues.
pub const SUBMODULES: [Submodule; 5] = [
    Submodule {
        path: "vendor/glfw",
        branch: "master",
        enabled: true,
        required: false,
    },
    Submodule {
        path: "vendor/glm",
        branch: "master",
        enabled: false,
        required: false,
    },
    Submodule {
        path: "vendor/imgui",
        branch: "docking",
        enabled: false,
        required: false,
    },
    Submodule {
        path: "vendor/implot",
        branch: "master",
        enabled: false,
        required: false,
    },
    Submodule {
        path: "vendor/Catch2",
        branch: "devel",
        enabled: false,
        required: false,
    },
];

/// Run the setup command against the real system.
///
/// # Errors
///
/// Returns an error on any gated abort: no connectivity (interactive mode),
/// missing system dependencies, failed submodule initialization, settings
/// errors, or no detectable IDE.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let mode = RunMode::detect(global.unattended);
    let platform = Platform::detect();
    let support = support::for_platform(&platform);
    let root = resolve_root(global)?;
    execute(&root, mode, &platform, &SystemExecutor, support.as_ref(), log)
}

/// Resolve the project root from CLI arguments or the working directory.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }
    std::env::current_dir().context("cannot determine working directory")
}

/// The orchestration state machine, with every collaborator injected.
///
/// # Errors
///
/// Returns an error on any gated abort; see [`run`].
pub fn execute(
    root: &Path,
    mode: RunMode,
    platform: &Platform,
    executor: &dyn Executor,
    support: &dyn PlatformSupport,
    log: &Logger,
) -> Result<()> {
    log.debug(&format!("run mode: {mode}, platform: {}", platform.os));

    // 1. Connectivity precheck (interactive only)
    if mode.is_interactive() {
        log.stage("Checking internet connectivity");
        if !net::check_internet(net::PROBE_TIMEOUT) {
            bail!("no internet connection found");
        }
        log.info("online");
    }

    // 2. Environment validation
    log.stage("Checking system dependencies");
    if !support.validate(executor, log) {
        bail!("missing required packages - setup aborted");
    }

    // 3. Submodule initialization
    log.stage("Initializing submodules");
    submodules::init(executor, log, root)
        .context("submodule initialization failed - setup aborted")?;

    // 4. Submodule synchronization (per-record failure policy)
    log.stage("Updating submodules");
    submodules::sync_all(executor, log, root, &SUBMODULES)?;

    // 5. Settings application
    log.stage("Applying settings");
    log.hint(&format!(
        "settings are defined at [{SETTINGS_PATH}]; re-run setup after changing them"
    ));
    let settings_path = root.join(SETTINGS_PATH);
    let app_name = settings::get_application_name(&settings_path)?;
    settings::apply(&settings_path, &root.join(DESCRIPTOR_PATH), log)?;
    log.info(&format!("name: {app_name}"));

    // 6. IDE selection
    log.stage("Setting up IDE");
    let ides = support.detect_ides(executor);
    let selected = select_ide(mode, &ides, log)?;
    log.info(&format!("selected IDE: {selected}"));

    // 7. IDE-specific project generation
    if selected.is_vscode() {
        let build_config = if mode.is_unattended() {
            BuildConfig::Debug
        } else {
            support::prompt_build_config(log)?
        };
        support.setup_ide_configs(root, build_config, &app_name)?;
        log.info(&format!("VSCode configuration written ({build_config})"));
    }

    // 8. Build directory (create-if-absent)
    std::fs::create_dir_all(root.join(BUILD_DIR))
        .with_context(|| format!("creating {BUILD_DIR} directory"))?;

    // 9. Generator resolution
    let generator = support.resolve_generator(selected);
    log.debug(&format!("generator: {generator}"));

    // 10. Configure + conditional build (reported, not fatal)
    log.stage("Configuring build");
    run_build_steps(executor, log, root, generator);

    // 11. Guidance
    if selected.is_vscode() {
        vscode::print_help(log);
    }
    print_guidance(platform, selected, &app_name, log);
    Ok(())
}

/// Pick the IDE for this run: first detected candidate when unattended,
/// interactive menu otherwise.
fn select_ide(mode: RunMode, ides: &[Ide], log: &Logger) -> Result<Ide, IdeError> {
    if mode.is_unattended() {
        ides.first().copied().ok_or(IdeError::NoneDetected)
    } else {
        support::prompt_ide_selection(log, ides)
    }
}

/// Configure, then build only if configuration succeeded. Exit codes are
/// surfaced as diagnostics; neither step aborts the run.
fn run_build_steps(executor: &dyn Executor, log: &Logger, root: &Path, generator: &str) {
    match cmake::configure(executor, log, root, BUILD_DIR, generator) {
        Ok(0) => {
            log.success("CMake configuration successful");
            match cmake::build(executor, log, root, BUILD_DIR) {
                Ok(0) => log.success("BUILD SUCCESSFUL"),
                Ok(code) => {
                    log.error(&format!("BUILD FAILED! compilation errors occurred [{code}]"));
                }
                Err(e) => log.error(&format!("BUILD FAILED! {e:#}")),
            }
        }
        Ok(code) => log.error(&format!("BUILD FAILED! CMake configuration failed [{code}]")),
        Err(e) => log.error(&format!("BUILD FAILED! {e:#}")),
    }
}

/// Closing hints, platform- and selection-dependent.
fn print_guidance(platform: &Platform, selected: Ide, app_name: &str, log: &Logger) {
    log.stage("Helpful hints");
    if platform.is_linux() {
        log.info(&format!("  Reconfigure:         cmake -S . -B {BUILD_DIR}"));
        log.info(&format!("  Compile application: cmake --build {BUILD_DIR}"));
        log.info(&format!(
            "  Cleanup build files: cmake --build {BUILD_DIR} --target clean"
        ));
        log.info(&format!("  Run application:     ./{BUILD_DIR}/{app_name}"));
    } else {
        match selected {
            Ide::VisualStudio2022 | Ide::VisualStudio2019 | Ide::VisualStudio2017 | Ide::Rider => {
                log.info(&format!("  Open solution file:  {BUILD_DIR}\\*.sln"));
                log.info(&format!("  Build solution:      cmake --build {BUILD_DIR}"));
            }
            _ => {
                log.info(&format!("  Compile application: cmake --build {BUILD_DIR}"));
                log.info(&format!("  Run application:     {BUILD_DIR}\\{app_name}.exe"));
            }
        }
        log.info("  More help:           cmake --help");
    }
}
