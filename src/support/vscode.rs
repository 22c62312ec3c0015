//! VS Code project file generation.
//!
//! Writes `.vscode/tasks.json`, `.vscode/launch.json` and
//! `.vscode/settings.json` under the project root. Files are overwritten
//! wholesale so re-running setup never appends or duplicates entries.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::logging::Logger;
use crate::platform::Os;
use crate::support::BuildConfig;

/// Directory that receives the generated configuration files.
const VSCODE_DIR: &str = ".vscode";

/// Write the VS Code task, launch and workspace settings files.
///
/// # Errors
///
/// Returns an error if the `.vscode` directory or any file cannot be written.
pub fn write_configs(root: &Path, build_config: BuildConfig, app_name: &str, os: Os) -> Result<()> {
    let dir = root.join(VSCODE_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;

    write_pretty(&dir.join("tasks.json"), &tasks_json(build_config))?;
    write_pretty(&dir.join("launch.json"), &launch_json(app_name, os))?;
    write_pretty(&dir.join("settings.json"), &settings_json())?;
    Ok(())
}

fn write_pretty(path: &Path, value: &serde_json::Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

fn tasks_json(build_config: BuildConfig) -> serde_json::Value {
    json!({
        "version": "2.0.0",
        "tasks": [
            {
                "label": "CMake: configure",
                "type": "shell",
                "command": "cmake",
                "args": ["-S", ".", "-B", "build"],
                "problemMatcher": []
            },
            {
                "label": "CMake: build",
                "type": "shell",
                "command": "cmake",
                "args": ["--build", "build", "--config", build_config.as_str()],
                "group": { "kind": "build", "isDefault": true },
                "dependsOn": "CMake: configure",
                "problemMatcher": ["$gcc"]
            }
        ]
    })
}

fn launch_json(app_name: &str, os: Os) -> serde_json::Value {
    let (debugger_type, program) = match os {
        Os::Linux => ("cppdbg", format!("${{workspaceFolder}}/build/{app_name}")),
        Os::Windows => (
            "cppvsdbg",
            format!("${{workspaceFolder}}/build/{app_name}.exe"),
        ),
    };
    let mut config = json!({
        "name": format!("Debug {app_name}"),
        "type": debugger_type,
        "request": "launch",
        "program": program,
        "cwd": "${workspaceFolder}",
        "preLaunchTask": "CMake: build"
    });
    if os == Os::Linux
        && let Some(map) = config.as_object_mut()
    {
        map.insert("MIMode".to_string(), json!("gdb"));
    }
    json!({
        "version": "0.2.0",
        "configurations": [config]
    })
}

fn settings_json() -> serde_json::Value {
    json!({
        "search.exclude": {
            "build": true,
            "vendor": true
        },
        "files.associations": {
            "*.yml": "yaml"
        }
    })
}

/// Print short usage guidance for the generated VS Code setup.
pub fn print_help(log: &Logger) {
    log.hint("VSCode quickstart");
    log.info("  Build:        Ctrl+Shift+B runs the default CMake build task");
    log.info("  Debug:        F5 launches the app with the generated configuration");
    log.info("  Regenerate:   re-run setup after changing config/app_settings.yml");
}
