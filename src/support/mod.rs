//! Platform capability layer.
//!
//! One [`PlatformSupport`] implementation exists per platform, chosen once at
//! startup via [`for_platform`]; the orchestration flow itself contains no
//! platform conditionals.

pub mod linux;
pub mod vscode;
pub mod windows;

use std::fmt;
use std::io;
use std::path::Path;

use anyhow::Result;

pub use linux::LinuxSupport;
pub use windows::WindowsSupport;

use crate::error::IdeError;
use crate::exec::Executor;
use crate::logging::Logger;
use crate::platform::{Os, Platform};

/// A locally detectable IDE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ide {
    VsCode,
    Rider,
    /// Plain Makefile-driven editing, offered on Linux when `make` is present.
    Makefile,
    VisualStudio2022,
    VisualStudio2019,
    VisualStudio2017,
}

impl Ide {
    /// Human-readable label shown in menus and messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Ide::VsCode => "VSCode",
            Ide::Rider => "JetBrains Rider",
            Ide::Makefile => "Makefile",
            Ide::VisualStudio2022 => "Visual Studio 2022",
            Ide::VisualStudio2019 => "Visual Studio 2019",
            Ide::VisualStudio2017 => "Visual Studio 2017",
        }
    }

    /// Whether this selection drives VS Code project generation.
    #[must_use]
    pub fn is_vscode(self) -> bool {
        self == Ide::VsCode
    }
}

impl fmt::Display for Ide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build configuration offered at setup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildConfig {
    Debug,
    Release,
}

impl BuildConfig {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BuildConfig::Debug => "Debug",
            BuildConfig::Release => "Release",
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform-specific capabilities consumed by the orchestrator.
pub trait PlatformSupport: Send + Sync {
    /// Check that every required system tool is present, printing a
    /// diagnostic per missing item. A `false` result is the sole error
    /// signal; this never errors.
    fn validate(&self, executor: &dyn Executor, log: &Logger) -> bool;

    /// Probe for locally detectable IDEs.
    ///
    /// The probe order is fixed and doubles as the unattended tie-break:
    /// the first entry wins when no user is available to choose.
    fn detect_ides(&self, executor: &dyn Executor) -> Vec<Ide>;

    /// Map an IDE selection to the build tool's generator token.
    ///
    /// Total: every selection (including ones detected on the other
    /// platform) resolves to a non-empty generator via a default branch.
    fn resolve_generator(&self, ide: Ide) -> &'static str;

    /// Write IDE-specific project files under `root`. Overwrites on re-run.
    ///
    /// # Errors
    ///
    /// Returns an error if the files cannot be written.
    fn setup_ide_configs(&self, root: &Path, build_config: BuildConfig, app_name: &str)
    -> Result<()>;
}

/// Select the capability implementation for the detected platform.
#[must_use]
pub fn for_platform(platform: &Platform) -> Box<dyn PlatformSupport> {
    match platform.os {
        Os::Linux => Box::new(LinuxSupport),
        Os::Windows => Box::new(WindowsSupport),
    }
}

/// Interactively choose an IDE from the detected candidates, re-prompting on
/// invalid input.
///
/// # Errors
///
/// Returns [`IdeError::NoneDetected`] for an empty candidate list, or
/// [`IdeError::Prompt`] if stdin is closed.
pub fn prompt_ide_selection(log: &Logger, ides: &[Ide]) -> Result<Ide, IdeError> {
    if ides.is_empty() {
        return Err(IdeError::NoneDetected);
    }
    let labels: Vec<String> = ides.iter().map(|i| i.label().to_string()).collect();
    loop {
        match log.prompt_select("Select your IDE:", &labels) {
            Ok(index) => {
                // prompt_select validates the range, so the index is in bounds.
                if let Some(ide) = ides.get(index) {
                    return Ok(*ide);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {
                log.warn("invalid selection, try again");
            }
            Err(e) => return Err(IdeError::Prompt(e)),
        }
    }
}

/// Interactively choose a build configuration, re-prompting on invalid input.
///
/// # Errors
///
/// Returns [`IdeError::Prompt`] if stdin is closed.
pub fn prompt_build_config(log: &Logger) -> Result<BuildConfig, IdeError> {
    let options = [
        BuildConfig::Debug.as_str().to_string(),
        BuildConfig::Release.as_str().to_string(),
    ];
    loop {
        match log.prompt_select("Select build configuration:", &options) {
            Ok(0) => return Ok(BuildConfig::Debug),
            Ok(_) => return Ok(BuildConfig::Release),
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {
                log.warn("invalid selection, try again");
            }
            Err(e) => return Err(IdeError::Prompt(e)),
        }
    }
}
