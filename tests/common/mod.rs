// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project fixture and a scripted
// executor so each integration test can exercise the orchestration state
// machine without touching git, cmake or the network.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use setup_cli::exec::{ExecResult, Executor};

/// An isolated project root backed by a [`tempfile::TempDir`], seeded with a
/// settings document and a build descriptor.
pub struct ProjectFixture {
    /// Temporary directory containing the test project.
    pub root: tempfile::TempDir,
}

impl ProjectFixture {
    /// Create a fixture with valid default settings (`name: Asteroid`) and a
    /// descriptor carrying a `project()` declaration with a trailing comment.
    pub fn new() -> Self {
        let fixture = Self {
            root: tempfile::tempdir().expect("create temp dir"),
        };
        fixture.write_settings("general_settings:\n  name: Asteroid\n");
        fixture.write_descriptor(
            "cmake_minimum_required(VERSION 3.16)\nproject(OldName C)  # comment\n",
        );
        fixture
    }

    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Overwrite `config/app_settings.yml`.
    pub fn write_settings(&self, content: &str) {
        let config = self.root.path().join("config");
        std::fs::create_dir_all(&config).expect("create config dir");
        std::fs::write(config.join("app_settings.yml"), content).expect("write settings");
    }

    /// Overwrite `CMakeLists.txt`.
    pub fn write_descriptor(&self, content: &str) {
        std::fs::write(self.root.path().join("CMakeLists.txt"), content)
            .expect("write descriptor");
    }

    /// Current contents of `CMakeLists.txt`.
    pub fn descriptor_contents(&self) -> String {
        std::fs::read_to_string(self.root.path().join("CMakeLists.txt"))
            .expect("read descriptor")
    }
}

/// Scripted [`Executor`]: answers `which` from a fixed tool set, replays git
/// results keyed by subcommand, and feeds cmake invocations from a queue of
/// exit codes while recording every call.
#[derive(Default)]
pub struct ScriptedSystem {
    tools: HashSet<String>,
    git_failures: HashSet<String>,
    vswhere_output: Option<String>,
    cmake_codes: Mutex<VecDeque<i32>>,
    /// Every interactive invocation, program first.
    pub cmake_calls: Mutex<Vec<Vec<String>>>,
    /// Every git invocation (arguments only).
    pub git_calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedSystem {
    /// Mark programs as present on PATH.
    pub fn with_tools(mut self, programs: &[&str]) -> Self {
        self.tools.extend(programs.iter().map(ToString::to_string));
        self
    }

    /// Make a git subcommand (e.g. `"submodule"`) fail.
    pub fn with_git_failure(mut self, subcommand: &str) -> Self {
        self.git_failures.insert(subcommand.to_string());
        self
    }

    /// Provide a vswhere response (Windows Visual Studio probing).
    pub fn with_vswhere(mut self, stdout: &str) -> Self {
        self.vswhere_output = Some(stdout.to_string());
        self
    }

    /// Queue exit codes for successive cmake invocations (default 0).
    pub fn with_cmake_codes(self, codes: &[i32]) -> Self {
        self.cmake_codes
            .lock()
            .expect("cmake_codes lock")
            .extend(codes.iter().copied());
        self
    }

    /// Number of interactive (cmake) invocations so far.
    pub fn cmake_call_count(&self) -> usize {
        self.cmake_calls.lock().expect("cmake_calls lock").len()
    }

    /// Number of git invocations so far.
    pub fn git_call_count(&self) -> usize {
        self.git_calls.lock().expect("git_calls lock").len()
    }
}

impl Executor for ScriptedSystem {
    fn run(&self, program: &str, _: &[&str]) -> Result<ExecResult> {
        if program.ends_with("vswhere.exe")
            && let Some(stdout) = &self.vswhere_output
        {
            return Ok(ExecResult {
                stdout: stdout.clone(),
                stderr: String::new(),
                success: true,
                code: Some(0),
            });
        }
        anyhow::bail!("failed to execute: {program}")
    }

    fn run_in_unchecked(&self, _: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        assert_eq!(program, "git", "only git goes through run_in_unchecked");
        let call: Vec<String> = args.iter().map(ToString::to_string).collect();
        self.git_calls.lock().expect("git_calls lock").push(call);
        let sub = args.first().copied().unwrap_or_default();
        let success = !self.git_failures.contains(sub);
        Ok(ExecResult {
            stdout: String::new(),
            stderr: if success {
                String::new()
            } else {
                format!("fatal: scripted failure for '{sub}'")
            },
            success,
            code: Some(i32::from(!success)),
        })
    }

    fn run_interactive(&self, _: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(ToString::to_string));
        self.cmake_calls.lock().expect("cmake_calls lock").push(call);
        let code = self
            .cmake_codes
            .lock()
            .expect("cmake_codes lock")
            .pop_front()
            .unwrap_or(0);
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: code == 0,
            code: Some(code),
        })
    }

    fn which(&self, program: &str) -> bool {
        self.tools.contains(program)
    }
}

/// Tool set that satisfies Linux validation and detects VS Code first.
pub const LINUX_FULL_TOOLSET: [&str; 6] = ["git", "cmake", "make", "gcc", "code", "rider"];
