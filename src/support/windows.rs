use std::path::Path;

use anyhow::Result;

use crate::exec::Executor;
use crate::logging::Logger;
use crate::platform::Os;
use crate::support::{BuildConfig, Ide, PlatformSupport, vscode};

/// Standard install location of the Visual Studio locator tool.
const VSWHERE: &str =
    r"C:\Program Files (x86)\Microsoft Visual Studio\Installer\vswhere.exe";

/// Tools that must be on PATH before setup can proceed on Windows.
const REQUIRED_TOOLS: [&str; 2] = ["git", "cmake"];

/// Windows capability implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsSupport;

/// Query installed Visual Studio product-line versions via vswhere,
/// newest first. An unusable or absent vswhere yields an empty list.
fn visual_studio_versions(executor: &dyn Executor) -> Vec<Ide> {
    let output = executor
        .run(
            VSWHERE,
            &["-products", "*", "-property", "catalog_productLineVersion"],
        )
        .map(|r| r.stdout)
        .unwrap_or_default();

    let mut versions = Vec::new();
    for candidate in [
        ("2022", Ide::VisualStudio2022),
        ("2019", Ide::VisualStudio2019),
        ("2017", Ide::VisualStudio2017),
    ] {
        if output.lines().any(|line| line.trim() == candidate.0) {
            versions.push(candidate.1);
        }
    }
    versions
}

impl PlatformSupport for WindowsSupport {
    fn validate(&self, executor: &dyn Executor, log: &Logger) -> bool {
        let mut ok = true;
        for tool in REQUIRED_TOOLS {
            if executor.which(tool) {
                log.debug(&format!("found {tool}"));
            } else {
                log.error(&format!("required tool not found: {tool}"));
                ok = false;
            }
        }
        let has_msvc = !visual_studio_versions(executor).is_empty();
        if has_msvc || executor.which("gcc") {
            log.debug("compiler toolchain present");
        } else {
            log.error("no compiler toolchain found (install Visual Studio or MinGW)");
            ok = false;
        }
        ok
    }

    /// Probe order (fixed, first entry wins unattended):
    /// VS Code, Visual Studio 2022/2019/2017, JetBrains Rider.
    fn detect_ides(&self, executor: &dyn Executor) -> Vec<Ide> {
        let mut ides = Vec::new();
        if executor.which("code") {
            ides.push(Ide::VsCode);
        }
        ides.extend(visual_studio_versions(executor));
        if executor.which("rider") {
            ides.push(Ide::Rider);
        }
        ides
    }

    fn resolve_generator(&self, ide: Ide) -> &'static str {
        match ide {
            // MinGW for VS Code builds on Windows
            Ide::VsCode => "MinGW Makefiles",
            Ide::VisualStudio2022 => "Visual Studio 17 2022",
            Ide::VisualStudio2019 => "Visual Studio 16 2019",
            Ide::VisualStudio2017 => "Visual Studio 15 2017",
            Ide::Rider => "CodeBlocks - MinGW Makefiles",
            // Default to the current Visual Studio solution generator
            _ => "Visual Studio 17 2022",
        }
    }

    fn setup_ide_configs(
        &self,
        root: &Path,
        build_config: BuildConfig,
        app_name: &str,
    ) -> Result<()> {
        vscode::write_configs(root, build_config, app_name, Os::Windows)
    }
}
