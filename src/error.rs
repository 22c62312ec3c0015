//! Domain-specific error types for the setup orchestrator.
//!
//! Internal modules return typed errors ([`SettingsError`], [`SyncError`],
//! [`IdeError`]) while the command layer at the CLI boundary converts them to
//! [`anyhow::Error`] via the standard `?` operator. Every variant corresponds
//! to a gated abort in the orchestration state machine; reported-but-non-fatal
//! conditions (configure/build exit codes) are plain values, not errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading the settings document or projecting it
/// into the build descriptor.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A settings or descriptor file could not be read or written.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path of the file involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings document is not valid YAML or lacks the required shape.
    #[error("invalid settings document {path}: {source}")]
    Parse {
        /// Path of the settings document.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_yaml::Error,
    },

    /// `general_settings.name` is present but empty.
    #[error("general_settings.name must not be empty in {path}")]
    EmptyName {
        /// Path of the settings document.
        path: PathBuf,
    },
}

/// Errors that arise while synchronizing submodules.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The project root is not a git work tree.
    #[error("{root} is not a git repository")]
    NotARepository {
        /// The directory that was probed.
        root: PathBuf,
    },

    /// `git submodule update --init` failed.
    #[error("submodule initialization failed: {message}")]
    InitFailed {
        /// Trimmed stderr of the failed git invocation.
        message: String,
    },

    /// A submodule directory is missing after initialization.
    #[error("submodule path {path} does not exist")]
    MissingPath {
        /// Expected checkout location of the submodule.
        path: PathBuf,
    },

    /// Updating an individual submodule to its target ref failed.
    #[error("updating {path} to '{branch}' failed: {message}")]
    UpdateFailed {
        /// Submodule path relative to the project root.
        path: String,
        /// Branch or tag that was being checked out.
        branch: String,
        /// Trimmed stderr of the failed git invocation.
        message: String,
    },
}

/// Errors that arise during IDE selection.
#[derive(Error, Debug)]
pub enum IdeError {
    /// No IDE could be detected on this system.
    #[error("no supported IDE detected on this system")]
    NoneDetected,

    /// Reading the interactive selection failed.
    #[error("failed to read selection: {0}")]
    Prompt(#[from] std::io::Error),
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn settings_io_display() {
        let e = SettingsError::Io {
            path: PathBuf::from("config/app_settings.yml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("config/app_settings.yml"));
        assert!(e.to_string().contains("IO error"));
    }

    #[test]
    fn settings_empty_name_display() {
        let e = SettingsError::EmptyName {
            path: PathBuf::from("config/app_settings.yml"),
        };
        assert_eq!(
            e.to_string(),
            "general_settings.name must not be empty in config/app_settings.yml"
        );
    }

    #[test]
    fn sync_init_failed_display() {
        let e = SyncError::InitFailed {
            message: "fatal: not a git repository".to_string(),
        };
        assert!(e.to_string().contains("submodule initialization failed"));
    }

    #[test]
    fn sync_update_failed_display() {
        let e = SyncError::UpdateFailed {
            path: "vendor/glfw".to_string(),
            branch: "master".to_string(),
            message: "couldn't find remote ref".to_string(),
        };
        assert!(e.to_string().contains("vendor/glfw"));
        assert!(e.to_string().contains("'master'"));
    }

    #[test]
    fn ide_none_detected_display() {
        assert_eq!(
            IdeError::NoneDetected.to_string(),
            "no supported IDE detected on this system"
        );
    }

    #[test]
    fn settings_io_has_source() {
        use std::error::Error as _;
        let e = SettingsError::Io {
            path: PathBuf::from("x"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<SettingsError>();
        assert_send_sync::<SyncError>();
        assert_send_sync::<IdeError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _: anyhow::Error = IdeError::NoneDetected.into();
        let _: anyhow::Error = SyncError::InitFailed {
            message: "boom".to_string(),
        }
        .into();
    }
}
