use std::path::Path;

use anyhow::Result;

use crate::exec::Executor;
use crate::logging::Logger;
use crate::platform::Os;
use crate::support::{BuildConfig, Ide, PlatformSupport, vscode};

/// Tools that must be on PATH before setup can proceed on Linux.
const REQUIRED_TOOLS: [&str; 3] = ["git", "cmake", "make"];

/// Accepted C compiler front-ends, any one of which satisfies the check.
const COMPILERS: [&str; 3] = ["gcc", "clang", "cc"];

/// Linux capability implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxSupport;

impl PlatformSupport for LinuxSupport {
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
        if COMPILERS.iter().any(|c| executor.which(c)) {
            log.debug("C compiler present");
        } else {
            log.error("no C compiler found (install gcc or clang)");
            ok = false;
        }
        ok
    }

    /// Probe order (fixed, first entry wins unattended):
    /// VS Code, JetBrains Rider, plain Makefile when `make` is present.
    fn detect_ides(&self, executor: &dyn Executor) -> Vec<Ide> {
        let mut ides = Vec::new();
        if executor.which("code") || executor.which("code-insiders") {
            ides.push(Ide::VsCode);
        }
        if executor.which("rider") {
            ides.push(Ide::Rider);
        }
        if executor.which("make") {
            ides.push(Ide::Makefile);
        }
        ides
    }

    fn resolve_generator(&self, ide: Ide) -> &'static str {
        match ide {
            // Rider understands CodeBlocks projects
            Ide::Rider => "CodeBlocks - Unix Makefiles",
            Ide::VsCode | Ide::Makefile => "Unix Makefiles",
            // Default fallback for selections without a dedicated mapping
            _ => "Unix Makefiles",
        }
    }

    fn setup_ide_configs(
        &self,
        root: &Path,
        build_config: BuildConfig,
        app_name: &str,
    ) -> Result<()> {
        vscode::write_configs(root, build_config, app_name, Os::Linux)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::ExecResult;
    use std::collections::HashSet;

    /// Executor whose `which` answers from a fixed set of available programs.
    #[derive(Default)]
    pub(crate) struct ToolSetExecutor {
        available: HashSet<String>,
    }

    impl ToolSetExecutor {
        pub(crate) fn with(mut self, programs: &[&str]) -> Self {
            self.available
                .extend(programs.iter().map(ToString::to_string));
            self
        }
    }

    impl Executor for ToolSetExecutor {
        fn run(&self, program: &str, _: &[&str]) -> Result<ExecResult> {
            anyhow::bail!("unexpected run call in test ({program})")
        }
        fn run_in_unchecked(&self, _: &Path, program: &str, _: &[&str]) -> Result<ExecResult> {
            anyhow::bail!("unexpected run_in_unchecked call in test ({program})")
        }
        fn run_interactive(&self, _: &Path, program: &str, _: &[&str]) -> Result<ExecResult> {
            anyhow::bail!("unexpected run_interactive call in test ({program})")
        }
        fn which(&self, program: &str) -> bool {
            self.available.contains(program)
        }
    }

    #[test]
    fn validate_passes_with_full_toolchain() {
        let executor = ToolSetExecutor::default().with(&["git", "cmake", "make", "gcc"]);
        let log = Logger::new(false);
        assert!(LinuxSupport.validate(&executor, &log));
    }

    #[test]
    fn validate_fails_without_cmake() {
        let executor = ToolSetExecutor::default().with(&["git", "make", "gcc"]);
        let log = Logger::new(false);
        assert!(!LinuxSupport.validate(&executor, &log));
    }

    #[test]
    fn validate_fails_without_any_compiler() {
        let executor = ToolSetExecutor::default().with(&["git", "cmake", "make"]);
        let log = Logger::new(false);
        assert!(!LinuxSupport.validate(&executor, &log));
    }

    #[test]
    fn validate_accepts_clang_as_compiler() {
        let executor = ToolSetExecutor::default().with(&["git", "cmake", "make", "clang"]);
        let log = Logger::new(false);
        assert!(LinuxSupport.validate(&executor, &log));
    }

    #[test]
    fn detection_order_is_stable() {
        let executor = ToolSetExecutor::default().with(&["code", "rider", "make"]);
        let ides = LinuxSupport.detect_ides(&executor);
        assert_eq!(ides, vec![Ide::VsCode, Ide::Rider, Ide::Makefile]);
    }

    #[test]
    fn detection_accepts_code_insiders() {
        let executor = ToolSetExecutor::default().with(&["code-insiders"]);
        let ides = LinuxSupport.detect_ides(&executor);
        assert_eq!(ides, vec![Ide::VsCode]);
    }

    #[test]
    fn detection_empty_without_tools() {
        let executor = ToolSetExecutor::default();
        assert!(LinuxSupport.detect_ides(&executor).is_empty());
    }

    #[test]
    fn generator_for_rider_is_codeblocks() {
        assert_eq!(
            LinuxSupport.resolve_generator(Ide::Rider),
            "CodeBlocks - Unix Makefiles"
        );
    }

    #[test]
    fn generator_defaults_to_unix_makefiles() {
        assert_eq!(
            LinuxSupport.resolve_generator(Ide::VisualStudio2022),
            "Unix Makefiles"
        );
    }
}
